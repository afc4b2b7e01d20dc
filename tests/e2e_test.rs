//! End-to-end configuration tests
//!
//! Everything here runs without a node: environment assembly, deployment
//! state, artifact loading, and order-range plumbing across module seams.

use ipo_cross::abi;
use ipo_cross::config::{Config, Deployment};
use ipo_cross::orders::{draw_order, OrderRange};
use ipo_cross::wallet;
use std::collections::HashMap;
use std::io::Write;

fn env_fixture(contract_dir: &str) -> HashMap<String, String> {
    HashMap::from([
        ("CHAIN_ID".to_string(), "31337".to_string()),
        ("RPC_URL".to_string(), "http://127.0.0.1:8545".to_string()),
        ("CONTRACT_DIR".to_string(), contract_dir.to_string()),
        (
            "FACTORY_ABI_PATH".to_string(),
            "IPOCrossFactory.json".to_string(),
        ),
        ("IPOCROSS_ABI_PATH".to_string(), "IPOCross.json".to_string()),
        ("ERC20_ABI_PATH".to_string(), "MockUSDC.json".to_string()),
        ("PLAYER_NAMES".to_string(), "alice,bob".to_string()),
        (
            "PLAYER_PRIVATE_KEYS".to_string(),
            // anvil dev keys 0 and 1
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80,\
             0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d"
                .to_string(),
        ),
    ])
}

#[test]
fn test_full_config_assembly() {
    let dir = tempfile::tempdir().unwrap();
    let env = env_fixture(dir.path().to_str().unwrap());
    let config = Config::from_lookup(|var| env.get(var).cloned()).unwrap();

    assert_eq!(config.chain_id, 31337);
    assert_eq!(config.players.len(), 2);
    assert_eq!(
        config.abi_path(&config.ipocross_abi_path),
        dir.path().join("IPOCross.json")
    );

    // Keys resolve to the well-known anvil addresses
    let alice = wallet::signer_address(&config.players[0].private_key).unwrap();
    assert_eq!(
        alice,
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            .parse::<alloy::primitives::Address>()
            .unwrap()
    );
}

#[test]
fn test_deployment_state_roundtrip_through_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut env = env_fixture(dir.path().to_str().unwrap());
    let deployment_path = dir.path().join("contract-config.json");
    env.insert(
        "DEPLOYMENT_PATH".to_string(),
        deployment_path.to_str().unwrap().to_string(),
    );

    let config = Config::from_lookup(|var| env.get(var).cloned()).unwrap();
    assert!(Deployment::load(&config.deployment_path).is_err());

    let deployment = Deployment {
        factory_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            .parse()
            .unwrap(),
        usdc_address: "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
            .parse()
            .unwrap(),
    };
    deployment.save(&config.deployment_path).unwrap();
    assert_eq!(Deployment::load(&config.deployment_path).unwrap(), deployment);
}

#[test]
fn test_artifact_paths_resolve_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let abi_path = dir.path().join("IPOCross.json");
    let mut file = std::fs::File::create(&abi_path).unwrap();
    file.write_all(
        br#"[
            {
                "type": "function",
                "name": "finalizeAuction",
                "inputs": [],
                "outputs": [],
                "stateMutability": "nonpayable"
            },
            {
                "type": "function",
                "name": "calculateWeightedAveragePrice",
                "inputs": [],
                "outputs": [{ "name": "", "type": "uint256" }],
                "stateMutability": "view"
            }
        ]"#,
    )
    .unwrap();

    let env = env_fixture(dir.path().to_str().unwrap());
    let config = Config::from_lookup(|var| env.get(var).cloned()).unwrap();

    let abi = abi::load_abi(&config.abi_path(&config.ipocross_abi_path)).unwrap();
    assert!(abi.functions.contains_key("finalizeAuction"));
    assert!(abi.functions.contains_key("calculateWeightedAveragePrice"));
}

#[test]
fn test_order_range_defaults_match_cli() {
    // The submit-orders defaults: 100..10000 USDC, 10..100 tokens
    let range = OrderRange::from_display_units("100", "10000", 10, 100).unwrap();
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let order = draw_order(&mut rng, &range);
        assert!(order.price >= range.min_price && order.price <= range.max_price);
        assert!(order.cost() >= range.min_price * alloy::primitives::U256::from(10u64));
    }
}
