use clap::Parser;
use rollup_reformat::cli;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    // Logs go to stderr so a JSON summary on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    debug!(
        built = env!("BUILD_TIMESTAMP"),
        git = option_env!("GIT_HASH").unwrap_or("unknown"),
        "Starting rollup-reformat"
    );

    if let Err(e) = cli::handle_reformat(cli).await {
        eprintln!("Error: {}", e);
        let class = e.classify();
        debug!(error_type = class.error_type, "Run failed");
        std::process::exit(class.exit_code);
    }
}
