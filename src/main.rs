use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tapterm::cli::run_cli().await
}
