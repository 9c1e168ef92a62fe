//! Beast Tower - roguelike monster battler library
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some functions are only used by the binaries
#![allow(dead_code)]

pub mod combat;
pub mod content;
pub mod core;
pub mod inventory;
pub mod map;
pub mod progression;
pub mod provider;
pub mod simulator;
