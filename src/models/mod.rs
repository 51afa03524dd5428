pub mod actions;
pub mod mascots;
pub mod scores;
