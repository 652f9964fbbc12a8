use anyhow::Context;
use chrono::Local;
use console_crud::config::{Settings, MOVIES_SETTINGS_FILE};
use console_crud::{demo, MovieTaskService};

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr; stdout carries the demo output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let settings = Settings::load(MOVIES_SETTINGS_FILE).context("Failed to load settings")?;
    let connection_string = settings
        .default_connection()
        .context("Failed to resolve connection string")?;
    let service = MovieTaskService::connect(connection_string)
        .context("Failed to parse connection string")?;

    let today = Local::now().date_naive();
    demo::movies::run(&service, today, &mut std::io::stdout())
        .await
        .context("Movie demo failed")?;
    Ok(())
}
