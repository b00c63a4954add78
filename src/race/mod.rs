//! Syllable Race: the driving game.
//!
//! A syllable is spoken and two are shown, one per lane. Steering into the
//! right lane scores points; steering into the wrong one costs speed and a
//! collision with a traffic cone. The race ends when the car stops.

pub mod clock;
pub mod logic;
pub mod scene;
pub mod tween;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use logic::*;
pub use types::*;
