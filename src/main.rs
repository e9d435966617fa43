use clap::Parser;
use formwright::cli::Cli;
use formwright::commands;
use formwright::config::Settings;
use formwright::persistence::{create_repository, TemplateStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new_with_cli(&cli)?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        backend = ?settings.storage.backend,
        path = %settings.storage.path,
        "Opening template store"
    );
    let mut store = TemplateStore::open(create_repository(&settings.storage));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(
        &cli.command,
        &mut store,
        settings.form.session_options(),
        &mut out,
    )
}
