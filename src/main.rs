use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    photobot::run().await
}
