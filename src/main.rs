use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    insights::cli::run().await
}
