pub mod actions;
pub mod decks;
pub mod mascots;
