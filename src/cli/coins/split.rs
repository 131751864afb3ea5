use crate::{CliError, WalletOptions};

pub async fn coins_split_largest(options: WalletOptions, k: u64, fee: u64) -> Result<(), CliError> {
    let wallet = options.connect().await?;

    match wallet.split_largest_coin_into_k(k, fee).await? {
        Some(tx_id) => {
            println!("Split the largest coin into {} coins", k);
            println!("Transaction id: 0x{}", hex::encode(tx_id));
        }
        None => println!(
            "Couldn't split: no usable coin, or the largest one can't cover {} coins and the fee",
            k
        ),
    }

    Ok(())
}
