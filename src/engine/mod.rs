// Engine modules: animation, assets, tilemaps, physics, rendering, input, audio

pub mod animation;
pub mod assets;
pub mod audio;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod tilemap;
