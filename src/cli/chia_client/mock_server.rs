use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{extract::State, routing::post, Json, Router};
use chia::{
    bls::SecretKey,
    protocol::{Bytes32, Coin, CoinSpend, SpendBundle},
};
use chia_wallet_sdk::{driver::SpendContext, types::Condition};
use clvm_traits::FromClvm;
use clvmr::NodePtr;
use hex::FromHex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use super::{RpcClient, WalletClient};

/// Serves `app` on a random local port and returns its base url.
pub async fn serve_mock(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{addr}"))
}

#[derive(Debug, Clone)]
struct MockCoin {
    coin: Coin,
    confirmed_height: u32,
    spend: Option<(u32, CoinSpend)>,
}

/// Coin set of the mock full node. Pushed bundles are applied without validation.
#[derive(Debug, Default)]
pub struct MockChain {
    height: u32,
    coins: HashMap<Bytes32, MockCoin>,
    rejection: Option<String>,
    pub pushed: Vec<SpendBundle>,
}

impl MockChain {
    pub fn add_coin(&mut self, coin: Coin) {
        self.coins.insert(
            coin.coin_id(),
            MockCoin {
                coin,
                confirmed_height: self.height,
                spend: None,
            },
        );
    }

    pub fn apply(&mut self, spend_bundle: &SpendBundle) -> anyhow::Result<()> {
        if let Some(reason) = &self.rejection {
            anyhow::bail!("{reason}");
        }
        for coin_spend in &spend_bundle.coin_spends {
            let coin_id = coin_spend.coin.coin_id();
            if self.coins.get(&coin_id).is_some_and(|entry| entry.spend.is_some()) {
                anyhow::bail!("DOUBLE_SPEND 0x{}", hex::encode(coin_id));
            }
        }

        self.height += 1;

        for coin_spend in &spend_bundle.coin_spends {
            for coin in created_coins(coin_spend)? {
                self.add_coin(coin);
            }
        }

        for coin_spend in &spend_bundle.coin_spends {
            let coin_id = coin_spend.coin.coin_id();
            let entry = self.coins.entry(coin_id).or_insert(MockCoin {
                coin: coin_spend.coin,
                confirmed_height: self.height,
                spend: None,
            });
            entry.spend = Some((self.height, coin_spend.clone()));
        }

        Ok(())
    }

    /// Drops a coin from the coin set, as if it had never been created.
    pub fn forget_coin(&mut self, coin_id: Bytes32) {
        self.coins.remove(&coin_id);
    }

    fn record_json(entry: &MockCoin) -> Value {
        json!({
            "coin": coin_json(&entry.coin),
            "coinbase": false,
            "confirmed_block_index": entry.confirmed_height,
            "spent": entry.spend.is_some(),
            "spent_block_index": entry.spend.as_ref().map_or(0, |(height, _)| *height),
            "timestamp": 0,
        })
    }
}

fn created_coins(coin_spend: &CoinSpend) -> anyhow::Result<Vec<Coin>> {
    let mut ctx = SpendContext::new();
    let puzzle = ctx.alloc(&coin_spend.puzzle_reveal)?;
    let solution = ctx.alloc(&coin_spend.solution)?;
    let output = ctx.run(puzzle, solution)?;
    let conditions = Vec::<Condition<NodePtr>>::from_clvm(&*ctx, output)?;

    Ok(conditions
        .into_iter()
        .filter_map(|condition| {
            let Condition::CreateCoin(cc) = condition else {
                return None;
            };

            Some(Coin::new(
                coin_spend.coin.coin_id(),
                cc.puzzle_hash,
                cc.amount,
            ))
        })
        .collect())
}

fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn coin_json(coin: &Coin) -> Value {
    json!({
        "parent_coin_info": to_hex(coin.parent_coin_info),
        "puzzle_hash": to_hex(coin.puzzle_hash),
        "amount": coin.amount,
    })
}

fn coin_spend_json(coin_spend: &CoinSpend) -> Value {
    json!({
        "coin": coin_json(&coin_spend.coin),
        "puzzle_reveal": to_hex(coin_spend.puzzle_reveal.to_vec()),
        "solution": to_hex(coin_spend.solution.to_vec()),
    })
}

fn rpc_error(error: impl ToString) -> Json<Value> {
    Json(json!({ "error": error.to_string(), "success": false }))
}

fn parse_bytes32(value: &Value) -> Option<Bytes32> {
    <[u8; 32]>::from_hex(value.as_str()?.trim_start_matches("0x"))
        .ok()
        .map(Bytes32::new)
}

fn bytes32_param(body: &Value, key: &str) -> Option<Bytes32> {
    parse_bytes32(&body[key])
}

fn include_spent_param(body: &Value) -> bool {
    body["include_spent_coins"].as_bool().unwrap_or(false)
}

async fn get_coin_record_by_name(
    State(chain): State<Arc<Mutex<MockChain>>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let Ok(chain) = chain.lock() else {
        return rpc_error("poisoned");
    };
    match bytes32_param(&body, "name").and_then(|id| chain.coins.get(&id)) {
        Some(entry) => Json(json!({
            "coin_record": MockChain::record_json(entry),
            "success": true,
        })),
        None => rpc_error(format!("Coin record {} not found", body["name"])),
    }
}

async fn get_coin_records_by_puzzle_hash(
    State(chain): State<Arc<Mutex<MockChain>>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let Ok(chain) = chain.lock() else {
        return rpc_error("poisoned");
    };
    let puzzle_hash = bytes32_param(&body, "puzzle_hash");
    let include_spent = include_spent_param(&body);

    let records: Vec<Value> = chain
        .coins
        .values()
        .filter(|entry| Some(entry.coin.puzzle_hash) == puzzle_hash)
        .filter(|entry| include_spent || entry.spend.is_none())
        .map(MockChain::record_json)
        .collect();

    Json(json!({ "coin_records": records, "success": true }))
}

async fn get_coin_records_by_parent_ids(
    State(chain): State<Arc<Mutex<MockChain>>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let Ok(chain) = chain.lock() else {
        return rpc_error("poisoned");
    };
    let parent_ids: Vec<Bytes32> = body["parent_ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(parse_bytes32).collect())
        .unwrap_or_default();
    let include_spent = include_spent_param(&body);

    let records: Vec<Value> = chain
        .coins
        .values()
        .filter(|entry| parent_ids.contains(&entry.coin.parent_coin_info))
        .filter(|entry| include_spent || entry.spend.is_none())
        .map(MockChain::record_json)
        .collect();

    Json(json!({ "coin_records": records, "success": true }))
}

async fn get_puzzle_and_solution(
    State(chain): State<Arc<Mutex<MockChain>>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let Ok(chain) = chain.lock() else {
        return rpc_error("poisoned");
    };
    let spend = bytes32_param(&body, "coin_id")
        .and_then(|id| chain.coins.get(&id))
        .and_then(|entry| entry.spend.as_ref());

    match spend {
        Some((_, coin_spend)) => Json(json!({
            "coin_solution": coin_spend_json(coin_spend),
            "success": true,
        })),
        None => rpc_error("Coin not spent"),
    }
}

async fn push_tx(
    State(chain): State<Arc<Mutex<MockChain>>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let spend_bundle = match serde_json::from_value::<SpendBundle>(body["spend_bundle"].clone()) {
        Ok(spend_bundle) => spend_bundle,
        Err(err) => return rpc_error(err),
    };

    let Ok(mut chain) = chain.lock() else {
        return rpc_error("poisoned");
    };
    if let Err(err) = chain.apply(&spend_bundle) {
        return Json(json!({ "status": "FAILED", "error": err.to_string(), "success": false }));
    }
    chain.pushed.push(spend_bundle);

    Json(json!({ "status": "SUCCESS", "success": true }))
}

/// In-memory full node speaking the subset of the RPC the wallet uses.
#[derive(Debug, Clone, Default)]
pub struct MockFullNode {
    pub chain: Arc<Mutex<MockChain>>,
}

impl MockFullNode {
    pub fn router(&self) -> Router {
        Router::new()
            .route("/get_coin_record_by_name", post(get_coin_record_by_name))
            .route(
                "/get_coin_records_by_puzzle_hash",
                post(get_coin_records_by_puzzle_hash),
            )
            .route(
                "/get_coin_records_by_parent_ids",
                post(get_coin_records_by_parent_ids),
            )
            .route("/get_puzzle_and_solution", post(get_puzzle_and_solution))
            .route("/push_tx", post(push_tx))
            .with_state(self.chain.clone())
    }

    pub async fn client(&self) -> anyhow::Result<RpcClient> {
        Ok(RpcClient::new(&serve_mock(self.router()).await?, None)?)
    }

    pub fn add_coin(&self, coin: Coin) -> anyhow::Result<()> {
        self.chain
            .lock()
            .map_err(|_| anyhow::anyhow!("poisoned"))?
            .add_coin(coin);
        Ok(())
    }

    pub fn apply(&self, spend_bundle: &SpendBundle) -> anyhow::Result<()> {
        self.chain
            .lock()
            .map_err(|_| anyhow::anyhow!("poisoned"))?
            .apply(spend_bundle)
    }

    pub fn forget_coin(&self, coin_id: Bytes32) -> anyhow::Result<()> {
        self.chain
            .lock()
            .map_err(|_| anyhow::anyhow!("poisoned"))?
            .forget_coin(coin_id);
        Ok(())
    }

    /// Makes every following `push_tx` fail with `reason`.
    pub fn reject_pushes(&self, reason: &str) -> anyhow::Result<()> {
        self.chain
            .lock()
            .map_err(|_| anyhow::anyhow!("poisoned"))?
            .rejection = Some(reason.to_string());
        Ok(())
    }

    pub fn take_pushed(&self) -> anyhow::Result<Vec<SpendBundle>> {
        let mut chain = self.chain.lock().map_err(|_| anyhow::anyhow!("poisoned"))?;
        Ok(std::mem::take(&mut chain.pushed))
    }
}

/// Wallet service holding a single key.
pub async fn mock_wallet(fingerprint: u32, master_sk: &SecretKey) -> anyhow::Result<WalletClient> {
    let sk_hex = hex::encode(master_sk.to_bytes());

    let app = Router::new()
        .route(
            "/get_public_keys",
            post(move || async move {
                Json(json!({ "public_key_fingerprints": [fingerprint], "success": true }))
            }),
        )
        .route(
            "/log_in",
            post(move |Json(body): Json<Value>| async move {
                if body["fingerprint"] == fingerprint {
                    Json(json!({ "fingerprint": fingerprint, "success": true }))
                } else {
                    rpc_error("Unknown fingerprint")
                }
            }),
        )
        .route(
            "/get_private_key",
            post(move || {
                let sk_hex = sk_hex.clone();
                async move {
                    Json(json!({
                        "private_key": { "fingerprint": fingerprint, "sk": sk_hex },
                        "success": true,
                    }))
                }
            }),
        )
        .route(
            "/get_wallets",
            post(|| async {
                Json(json!({
                    "wallets": [{ "id": 1, "name": "Chia Wallet", "type": 0 }],
                    "success": true,
                }))
            }),
        );

    Ok(WalletClient::new(&serve_mock(app).await?, None)?)
}
