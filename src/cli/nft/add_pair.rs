use crate::{parse_launcher_id, CliError, WalletOptions};

pub async fn nft_add_pair(
    options: WalletOptions,
    launcher_id_str: String,
    key: String,
    value: String,
    fee: u64,
) -> Result<(), CliError> {
    let launcher_id = parse_launcher_id(&launcher_id_str)?;
    let wallet = options.connect().await?;

    println!("Adding pair ({}, {})...", key, value);
    let tx_id = wallet.add_pair(launcher_id, &key, &value, fee).await?;
    println!("Transaction id: 0x{}", hex::encode(tx_id));

    Ok(())
}
