use dotenv::dotenv;
use gift_exchange_backend::app::app::App;
use gift_exchange_backend::util::logger::Logger;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Load .env first so RUST_LOG and LOG_DIR apply to the logger
    let dotenv_result = dotenv();

    let _logger = match Logger::new() {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting Gift Exchange backend");
    match dotenv_result {
        Ok(_) => info!("Loaded .env file"),
        Err(e) => warn!("No .env file loaded: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
