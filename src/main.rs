use colored::Colorize;
use tracing_subscriber::EnvFilter;

const ENV_LOG: &str = "FLEET_FILTER_LOG";

fn init_logging() {
    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_env_filter(EnvFilter::new(filter))
        .init();
}

fn main() {
    init_logging();

    if let Err(err) = fleet_filter::run() {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
