use serde_json::{json, Value};

use crate::{parse_launcher_id, sync_reai_nft, CliError, ReaiNftInfo, WalletOptions};

/// `{"version": n, "data": [[index, [key, value]], ...]}`, newest pair first.
pub fn reai_nft_data_json(info: &ReaiNftInfo) -> Value {
    let data = info
        .data
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            json!([
                i,
                [
                    String::from_utf8_lossy(&pair.key),
                    String::from_utf8_lossy(&pair.value)
                ]
            ])
        })
        .collect::<Vec<_>>();

    json!({
        "version": info.version,
        "data": data,
    })
}

pub async fn nft_get_data(options: WalletOptions, launcher_id_str: String) -> Result<(), CliError> {
    let launcher_id = parse_launcher_id(&launcher_id_str)?;
    let node = options.config()?.full_node_client()?;

    let nft = sync_reai_nft(&node, launcher_id).await?;
    println!("{}", reai_nft_data_json(&nft.info));

    Ok(())
}
