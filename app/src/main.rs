#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jobscout_app::run().await
}
