pub mod decks;
pub mod mascots;
pub mod scores;
