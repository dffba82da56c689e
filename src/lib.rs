// Ledge Runner: a tile-based 2D platformer

pub mod core;
pub mod engine;
pub mod game;
