pub mod card_store;
