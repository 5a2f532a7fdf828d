use iced::Application;

use ritrovo::client::config::ClientConfig;
use ritrovo::client::gui::app::{AppFlags, LnfApp};
use ritrovo::client::services::api_client::ApiClient;

fn main() -> anyhow::Result<()> {
    // load environment from .env (optional), then RUST_LOG-driven logging
    let _ = dotenvy::dotenv();
    env_logger::init();

    let config = ClientConfig::from_env();
    log::info!("starting against {}", config.api_url);
    let api = ApiClient::new(&config)?;

    LnfApp::run(iced::Settings::with_flags(AppFlags { api }))?;
    Ok(())
}
