//! egui front end for the swipe deck.

pub mod state;
pub mod ui;
