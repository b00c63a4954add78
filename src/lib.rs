//! Slogi - learn to read Russian syllables in the terminal.
//!
//! This module exposes the trainer logic for testing and for the binary.

pub mod app;
pub mod cli;
pub mod drill;
pub mod input;
pub mod menu;
pub mod race;
pub mod speech;
pub mod syllables;
pub mod ui;
pub mod utils;
