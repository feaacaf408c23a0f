//! Presentational widgets

pub mod layout;
pub mod reference_card;
pub mod search_bar;
pub mod theme;
