//! Key-event translation
//!
//! Maps raw crossterm key events to the discrete commands the controller
//! understands. Which physical key does what is decided entirely here.

pub mod handler;

pub use handler::{InputHandler, KeyAction};
