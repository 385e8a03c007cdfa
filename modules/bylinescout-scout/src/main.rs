use std::path::Path;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bylinescout_common::AppConfig;
use bylinescout_scout::{pipeline, writer};
use render_client::RenderClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("bylinescout_scout=info".parse()?)
                .add_directive("bylinescout_common=info".parse()?),
        )
        .init();

    info!("Byline Scout starting...");

    let app = AppConfig::from_env()?;
    app.log_redacted();
    let config = app.pipeline_config();

    let renderer = RenderClient::new(&app.renderer_url, app.renderer_token.as_deref());

    let (report, stats) = pipeline::run(&renderer, &config).await?;
    writer::write_report(&report, Path::new(&app.output_path))?;

    info!("Scout run complete. {stats}");
    Ok(())
}
