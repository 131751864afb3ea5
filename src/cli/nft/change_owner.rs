use crate::{hex_string_to_pubkey, parse_launcher_id, CliError, WalletOptions};

pub async fn nft_change_owner(
    options: WalletOptions,
    launcher_id_str: String,
    new_pub_key_str: String,
    fee: u64,
) -> Result<(), CliError> {
    let launcher_id = parse_launcher_id(&launcher_id_str)?;
    let new_owner = hex_string_to_pubkey(&new_pub_key_str)?;
    let wallet = options.connect().await?;

    println!("Transferring NFT to {}...", hex::encode(new_owner.to_bytes()));
    let tx_id = wallet.set_ownership(launcher_id, new_owner, fee).await?;
    println!("Transaction id: 0x{}", hex::encode(tx_id));

    Ok(())
}
