#[tokio::main]
async fn main() -> anyhow::Result<()> {
    slackkit_lib::run().await
}
