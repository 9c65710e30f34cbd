#[tokio::main]
async fn main() -> anyhow::Result<()> {
    posture_monitor_lib::run().await
}
