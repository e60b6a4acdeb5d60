use serde::{Deserialize, Serialize};

use crate::utilities::string_manipulators::parse_leading_int;

use super::field::CardField;

/// One catalogued card. Serialized field names match the documents the
/// frontend already consumes (`manaCost`, `flavorText`, `type`, ...).
///
/// The schema is total: a source page missing an attribute leaves the
/// field at its zero value, never absent. 0 means "no value" for the
/// numeric fields.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub civilization: String,
    #[serde(rename = "type", default)]
    pub card_type: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub mana_cost: i64,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub power: i64,
    #[serde(default)]
    pub mana_number: i64,
    #[serde(default)]
    pub flavor_text: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "count_default")]
    pub count: i64,
}

fn count_default() -> i64 {
    1
}

impl Card {
    /// A freshly catalogued card starts with a count of 1 and every
    /// other field at its zero value.
    pub fn new(name: &str) -> Self {
        Card {
            name: name.to_string(),
            civilization: String::new(),
            card_type: String::new(),
            text: String::new(),
            mana_cost: 0,
            race: String::new(),
            power: 0,
            mana_number: 0,
            flavor_text: String::new(),
            image: String::new(),
            count: count_default(),
        }
    }

    /// Writes one extracted value into the record. Numeric fields take
    /// the leading-digit parse of the raw text ("6000+" becomes 6000,
    /// no digits becomes 0).
    pub fn set_field(&mut self, field: CardField, value: String) {
        match field {
            CardField::Civilization => self.civilization = value,
            CardField::CardType => self.card_type = value,
            CardField::Text => self.text = value,
            CardField::Race => self.race = value,
            CardField::FlavorText => self.flavor_text = value,
            CardField::Image => self.image = value,
            CardField::ManaCost => self.mana_cost = parse_leading_int(&value),
            CardField::Power => self.power = parse_leading_int(&value),
            CardField::ManaNumber => self.mana_number = parse_leading_int(&value),
        }
    }
}
