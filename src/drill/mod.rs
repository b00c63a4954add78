//! Syllable flash cards.
//!
//! One syllable at a time, large and centered. Space moves to the next
//! card, reading the current one aloud first when sound is on.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
