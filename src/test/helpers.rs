#[cfg(test)]
use crate::cards::card::Card;

/// The record the bolshack_dragon_page.html fixture extracts to.
#[cfg(test)]
pub fn bolshack_dragon_card() -> Card {
    Card {
        name: "Bolshack Dragon".to_string(),
        civilization: "Fire".to_string(),
        card_type: "Creature".to_string(),
        text: "Power attacker +2000 (While attacking, this creature gets +2000 power.)"
            .to_string(),
        mana_cost: 6,
        race: "Armored Dragon".to_string(),
        power: 6000,
        mana_number: 1,
        flavor_text: "His anger is the pulse of the earth. His roar is the cry of battle."
            .to_string(),
        image: "https://static.wikia.nocookie.net/duelmasters/images/bolshack_dragon.jpg"
            .to_string(),
        count: 1,
    }
}
