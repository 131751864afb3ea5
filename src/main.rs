use reai_nft::run_cli;

#[tokio::main]
async fn main() {
    run_cli().await;
}
