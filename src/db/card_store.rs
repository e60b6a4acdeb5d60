use rusqlite::{params, Connection};

use crate::cards::card::Card;
use crate::cards::deck::Deck;
use crate::BoxError;

/// Document store for cards and decks. Records are stored as JSON text
/// keyed by card name / deck id, matching the document layout of the
/// service this catalogue exports to.
pub struct CardStore {
    conn: Connection,
}

impl CardStore {
    pub fn open(path: &str) -> Result<Self, BoxError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, BoxError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, BoxError> {
        let store = CardStore { conn };
        store.create_tables()?;
        Ok(store)
    }

    fn create_tables(&self) -> Result<(), BoxError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS cards (
                name TEXT PRIMARY KEY,
                data TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS decks (
                id TEXT PRIMARY KEY,
                data TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Create-or-refresh: repeated writes for the same name overwrite.
    pub fn upsert_card(&self, card: &Card) -> Result<(), BoxError> {
        let data = serde_json::to_string(card)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO cards (name, data) VALUES (?1, ?2)",
            params![card.name, data],
        )?;
        Ok(())
    }

    pub fn get_card(&self, name: &str) -> Result<Option<Card>, BoxError> {
        let result = self.conn.query_row(
            "SELECT data FROM cards WHERE name = ?1",
            params![name],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_cards(&self) -> Result<Vec<Card>, BoxError> {
        let mut stmt = self.conn.prepare("SELECT data FROM cards ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut cards = Vec::new();
        for data in rows {
            cards.push(serde_json::from_str(&data?)?);
        }
        Ok(cards)
    }

    pub fn bulk_upsert_cards(&self, cards: &[Card]) -> Result<(), BoxError> {
        for card in cards {
            self.upsert_card(card)?;
        }
        Ok(())
    }

    /// Applies a signed increment to the stored count. Read-then-write:
    /// two concurrent increments for the same name can lose an update.
    pub fn update_card_count(&self, name: &str, increment: i64) -> Result<Card, BoxError> {
        let mut card = self
            .get_card(name)?
            .ok_or_else(|| format!("No stored card named {}", name))?;
        card.count += increment;
        self.upsert_card(&card)?;
        Ok(card)
    }

    pub fn upsert_deck(&self, deck: &Deck) -> Result<(), BoxError> {
        let data = serde_json::to_string(deck)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO decks (id, data) VALUES (?1, ?2)",
            params![deck.id, data],
        )?;
        Ok(())
    }

    pub fn list_decks(&self) -> Result<Vec<Deck>, BoxError> {
        let mut stmt = self.conn.prepare("SELECT data FROM decks ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut decks = Vec::new();
        for data in rows {
            decks.push(serde_json::from_str(&data?)?);
        }
        Ok(decks)
    }
}
