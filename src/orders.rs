//! Randomized buy-order generation
//!
//! Demo players place uniform-random bids inside an operator-supplied
//! price/quantity range. Draws are inclusive of both endpoints; a degenerate
//! range (min == max) is a constant.

use alloy::primitives::{
    utils::{format_ether, parse_ether},
    U256,
};
use rand::Rng;
use thiserror::Error;

/// 1e18: quote-token base units per whole token, and the fixed-point scale
/// used by the contracts for prices.
pub const WAD: u64 = 1_000_000_000_000_000_000;

/// Order range validation errors
#[derive(Debug, Error)]
pub enum OrderRangeError {
    #[error("minimum {field} exceeds maximum {field}")]
    Inverted { field: &'static str },
    #[error("{field} must be positive")]
    Zero { field: &'static str },
}

/// Inclusive price and quantity bounds for random orders, in base units.
#[derive(Debug, Clone, Copy)]
pub struct OrderRange {
    pub min_price: U256,
    pub max_price: U256,
    pub min_quantity: U256,
    pub max_quantity: U256,
}

impl OrderRange {
    pub fn new(
        min_price: U256,
        max_price: U256,
        min_quantity: U256,
        max_quantity: U256,
    ) -> Result<Self, OrderRangeError> {
        if min_price.is_zero() {
            return Err(OrderRangeError::Zero { field: "price" });
        }
        if min_quantity.is_zero() {
            return Err(OrderRangeError::Zero { field: "quantity" });
        }
        if min_price > max_price {
            return Err(OrderRangeError::Inverted { field: "price" });
        }
        if min_quantity > max_quantity {
            return Err(OrderRangeError::Inverted { field: "quantity" });
        }
        Ok(Self {
            min_price,
            max_price,
            min_quantity,
            max_quantity,
        })
    }

    /// Parse a range from operator units: decimal quote-token prices and
    /// whole-token quantities.
    pub fn from_display_units(
        min_price: &str,
        max_price: &str,
        min_quantity: u64,
        max_quantity: u64,
    ) -> anyhow::Result<Self> {
        let wad = U256::from(WAD);
        Ok(Self::new(
            parse_ether(min_price)?,
            parse_ether(max_price)?,
            U256::from(min_quantity) * wad,
            U256::from(max_quantity) * wad,
        )?)
    }
}

/// A single buy order: price per token and token quantity, both in base
/// units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSpec {
    pub price: U256,
    pub quantity: U256,
}

impl OrderSpec {
    /// Quote-token cost of the order: `price * quantity / 1e18`.
    pub fn cost(&self) -> U256 {
        self.price * self.quantity / U256::from(WAD)
    }
}

impl std::fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} USDC x {} tokens",
            format_ether(self.price),
            format_ether(self.quantity)
        )
    }
}

/// Draw one order uniformly from the range.
pub fn draw_order(rng: &mut impl Rng, range: &OrderRange) -> OrderSpec {
    OrderSpec {
        price: uniform_u256(rng, range.min_price, range.max_price),
        quantity: uniform_u256(rng, range.min_quantity, range.max_quantity),
    }
}

// Inclusive uniform draw over [lo, hi]. Modulo bias is negligible for the
// spans this tool sees.
fn uniform_u256(rng: &mut impl Rng, lo: U256, hi: U256) -> U256 {
    debug_assert!(lo <= hi);
    let span = hi - lo + U256::from(1u64);
    let mut limbs = [0u64; 4];
    for limb in &mut limbs {
        *limb = rng.gen();
    }
    lo + U256::from_limbs(limbs) % span
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wad(n: u64) -> U256 {
        U256::from(n) * U256::from(WAD)
    }

    #[test]
    fn test_range_validation() {
        assert!(OrderRange::new(wad(100), wad(10_000), wad(10), wad(100)).is_ok());
        assert!(matches!(
            OrderRange::new(wad(200), wad(100), wad(10), wad(100)),
            Err(OrderRangeError::Inverted { field: "price" })
        ));
        assert!(matches!(
            OrderRange::new(wad(100), wad(200), wad(50), wad(10)),
            Err(OrderRangeError::Inverted { field: "quantity" })
        ));
        assert!(matches!(
            OrderRange::new(U256::ZERO, wad(100), wad(10), wad(100)),
            Err(OrderRangeError::Zero { field: "price" })
        ));
    }

    #[test]
    fn test_from_display_units() {
        let range = OrderRange::from_display_units("100", "10000", 10, 100).unwrap();
        assert_eq!(range.min_price, wad(100));
        assert_eq!(range.max_price, wad(10_000));
        assert_eq!(range.min_quantity, wad(10));
        assert_eq!(range.max_quantity, wad(100));

        // Fractional prices parse at 18 decimals
        let range = OrderRange::from_display_units("0.5", "1.5", 1, 1).unwrap();
        assert_eq!(range.min_price, U256::from(WAD) / U256::from(2u64));
    }

    #[test]
    fn test_draws_stay_in_range() {
        let range = OrderRange::new(wad(100), wad(10_000), wad(10), wad(100)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let order = draw_order(&mut rng, &range);
            assert!(order.price >= range.min_price && order.price <= range.max_price);
            assert!(order.quantity >= range.min_quantity && order.quantity <= range.max_quantity);
        }
    }

    #[test]
    fn test_degenerate_range_is_constant() {
        let range = OrderRange::new(wad(42), wad(42), wad(5), wad(5)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let order = draw_order(&mut rng, &range);
        assert_eq!(order.price, wad(42));
        assert_eq!(order.quantity, wad(5));
    }

    #[test]
    fn test_seeded_draws_are_deterministic() {
        let range = OrderRange::new(wad(100), wad(10_000), wad(10), wad(100)).unwrap();
        let a: Vec<OrderSpec> = {
            let mut rng = StdRng::seed_from_u64(99);
            (0..10).map(|_| draw_order(&mut rng, &range)).collect()
        };
        let b: Vec<OrderSpec> = {
            let mut rng = StdRng::seed_from_u64(99);
            (0..10).map(|_| draw_order(&mut rng, &range)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_order_cost() {
        // 250 USDC/token * 40 tokens = 10_000 USDC
        let order = OrderSpec {
            price: wad(250),
            quantity: wad(40),
        };
        assert_eq!(order.cost(), wad(10_000));
    }

    #[test]
    fn test_order_display() {
        let order = OrderSpec {
            price: wad(250),
            quantity: wad(40),
        };
        let rendered = order.to_string();
        assert!(rendered.contains("250"));
        assert!(rendered.contains("40"));
    }
}
