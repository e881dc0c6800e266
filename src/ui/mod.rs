//! Visual constants shared by the board's UI panels

pub mod theme;
