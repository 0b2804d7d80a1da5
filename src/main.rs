use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    sage_lens::cli::run().await
}
