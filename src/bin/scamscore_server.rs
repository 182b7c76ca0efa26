

use scamscore::{server::run_server, ScamScoreConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("scamscore=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config = ScamScoreConfig::from_env()?;
    run_server(config).await?;
    Ok(())
}
