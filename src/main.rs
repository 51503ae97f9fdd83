#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tallybook_api::cli::run_with_sys_args().await
}
