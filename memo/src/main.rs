mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memo::client::{MemoApi, MemosApiClient};
use memo::config::Config;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().validate()?;

    let client = MemosApiClient::new(&config.service)?.with_page_size(config.list.page_size);
    tracing::debug!("Using memo host {}", client.host());
    let api: Arc<dyn MemoApi> = Arc::new(client);

    cli::run(cli.command, api, &config.list).await
}
