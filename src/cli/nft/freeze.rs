use crate::{parse_launcher_id, CliError, WalletOptions};

pub async fn nft_freeze(
    options: WalletOptions,
    launcher_id_str: String,
    fee: u64,
) -> Result<(), CliError> {
    let launcher_id = parse_launcher_id(&launcher_id_str)?;
    let wallet = options.connect().await?;

    println!("Freezing NFT; its data won't be modifiable afterwards...");
    let tx_id = wallet.freeze(launcher_id, fee).await?;
    println!("Transaction id: 0x{}", hex::encode(tx_id));

    Ok(())
}
