use crate::{CliError, WalletOptions};

pub async fn nft_mint(options: WalletOptions, fee: u64) -> Result<(), CliError> {
    let wallet = options.connect().await?;

    println!("Minting a reai NFT from wallet {}...", wallet.address);
    let (tx_id, launcher_id) = wallet.mint(fee).await?;

    println!("Launcher id: 0x{}", hex::encode(launcher_id));
    println!("Transaction id: 0x{}", hex::encode(tx_id));
    println!("Fee: {} mojos", fee);
    println!("Save the launcher id: every other command needs it to find the NFT.");

    Ok(())
}

pub async fn nft_mint_k(options: WalletOptions, fee: u64, k: usize) -> Result<(), CliError> {
    let wallet = options.connect().await?;

    println!("Minting {} reai NFTs from wallet {}...", k, wallet.address);
    let Some((tx_id, launcher_ids)) = wallet.mint_k(fee, k).await? else {
        println!("Number of coins < {}", k);
        return Ok(());
    };

    for launcher_id in launcher_ids {
        println!(
            "Launcher id: 0x{} (transaction id: 0x{})",
            hex::encode(launcher_id),
            hex::encode(tx_id)
        );
    }

    Ok(())
}
