use tracing_subscriber::EnvFilter;

use tryon_studio::app::TryOnStudio;
use tryon_studio::config::AppConfig;

fn main() -> iced::Result {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // The app cannot talk to the generation service without a key
    let config = AppConfig::from_env()
        .expect("Failed to load configuration. Set GEMINI_API_KEY in the environment or a .env file.");

    tracing::info!(model = %config.gemini_model, "starting try-on studio");

    iced::application("Virtual Try-On Studio", TryOnStudio::update, TryOnStudio::view)
        .theme(TryOnStudio::theme)
        .centered()
        .run_with(move || TryOnStudio::new(config))
}
