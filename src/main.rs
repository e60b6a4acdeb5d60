mod cards;
mod db;
mod server;
mod test;
mod utilities;
mod wiki_scraper;

use std::net::SocketAddr;
use std::sync::Arc;

use log::info;

use crate::db::card_store::CardStore;
use crate::server::AppState;
use crate::utilities::config::CONFIG;
use crate::wiki_scraper::WikiCardScraper;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    env_logger::init();
    info!("Starting Duel Masters card catalogue");

    let store = CardStore::open(&CONFIG.db_path)?;
    let scraper = WikiCardScraper::new(&CONFIG.wiki_base_url, reqwest::Client::new());
    let state = Arc::new(AppState::new(store, scraper));

    let addr = SocketAddr::from(([0, 0, 0, 0], CONFIG.port));
    server::run(addr, state).await?;
    Ok(())
}
