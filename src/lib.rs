//! **maze_game** generates perfect mazes and moves a player through them.
//!
//! The core is windowing agnostic: a presentation layer renders the grid, feeds
//! per-frame movement into a [`session::GameSession`] and reads the player back.

#[macro_use]
extern crate error_chain;

pub mod cells;
pub mod codec;
pub mod collision;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod renderers;
pub mod session;
pub mod settings;
pub mod units;
pub mod viewing;
