use crate::{parse_launcher_id, CliError, WalletOptions};

pub async fn nft_remove_pair(
    options: WalletOptions,
    launcher_id_str: String,
    index: usize,
    fee: u64,
) -> Result<(), CliError> {
    let launcher_id = parse_launcher_id(&launcher_id_str)?;
    let wallet = options.connect().await?;

    println!("Removing pair at index {}...", index);
    let tx_id = wallet.remove_pair_at(launcher_id, index, fee).await?;
    println!("Transaction id: 0x{}", hex::encode(tx_id));

    Ok(())
}
