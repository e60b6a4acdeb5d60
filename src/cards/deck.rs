use serde::{Deserialize, Serialize};

use super::card::Card;

/// A saved deck. `id` is the canonical storage key; `name` is only the
/// display label. Each deck entry carries its own `count`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_roundtrip_keeps_card_counts() {
        let mut card = Card::new("Bolshack Dragon");
        card.count = 4;
        let deck = Deck {
            name: "Mono Fire".to_string(),
            id: "deck-1".to_string(),
            cards: vec![card],
        };

        let json = serde_json::to_string(&deck).unwrap();
        let parsed: Deck = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, deck);
        assert_eq!(parsed.cards[0].count, 4);
    }

    #[test]
    fn test_deck_without_cards_defaults_to_empty() {
        let deck: Deck = serde_json::from_str(r#"{"name":"Empty","id":"deck-2"}"#).unwrap();
        assert!(deck.cards.is_empty());
    }
}
