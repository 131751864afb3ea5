use crate::{CliError, WalletOptions};

pub async fn coins_available(options: WalletOptions) -> Result<(), CliError> {
    let wallet = options.connect().await?;

    println!("{}", wallet.number_of_available_coins().await?);

    Ok(())
}
