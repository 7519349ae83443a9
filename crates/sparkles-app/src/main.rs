use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sparkles_headless::{run_app, AppConfig};

fn main() {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    info!("Sparkles starting");
    let config = match std::env::args().nth(1) {
        Some(path) => match AppConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("failed to load {path}: {e}");
                std::process::exit(2);
            }
        },
        None => AppConfig::default(),
    };
    if let Err(e) = run_app(&config) {
        eprintln!("Sparkles error: {e}");
        std::process::exit(1);
    }
}
