pub const DUEL_MASTERS_WIKI_URL: &str = "https://duelmasters.fandom.com";

pub const DEFAULT_DB_PATH: &str = "cards.db";
pub const DEFAULT_PORT: u16 = 8080;

pub const NOISE_MARKER: char = '■';
