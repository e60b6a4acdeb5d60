use std::env;

use log::error;

use crate::utilities::constants::{DEFAULT_DB_PATH, DEFAULT_PORT, DUEL_MASTERS_WIKI_URL};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub wiki_base_url: String,
    pub db_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            wiki_base_url: DUEL_MASTERS_WIKI_URL.to_string(),
            db_path: DEFAULT_DB_PATH.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.update_from_env();
        config
    }

    fn update_from_env(&mut self) {
        if let Ok(port) = env::var("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => error!("Ignoring unparseable PORT value: {}", port),
            }
        }
        if let Ok(wiki_base_url) = env::var("WIKI_URL") {
            self.wiki_base_url = wiki_base_url.trim_end_matches('/').to_string();
        }
        if let Ok(db_path) = env::var("DB_PATH") {
            self.db_path = db_path;
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}
