/// The closed set of card attributes the wiki data table can fill in.
///
/// `Image` has no label on the page; it is produced by the positional
/// artwork-row rule in the scraper, never by `from_label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Civilization,
    CardType,
    Text,
    ManaCost,
    Race,
    Power,
    ManaNumber,
    FlavorText,
    Image,
}

impl CardField {
    /// Maps a row label exactly as it appears in the table's first cell.
    /// Labels are case-sensitive; anything unrecognized returns `None`
    /// and the row is skipped upstream.
    pub fn from_label(label: &str) -> Option<CardField> {
        match label {
            "Civilization" => Some(CardField::Civilization),
            "Card Type" => Some(CardField::CardType),
            "English Text" => Some(CardField::Text),
            "Mana Cost" => Some(CardField::ManaCost),
            "Race" => Some(CardField::Race),
            "Power" => Some(CardField::Power),
            "Mana Number" => Some(CardField::ManaNumber),
            "Flavor Text" => Some(CardField::FlavorText),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CardField::ManaCost | CardField::Power | CardField::ManaNumber
        )
    }
}
