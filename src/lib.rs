//! Snake on a toroidal grid, played in the terminal
//!
//! The crate splits into a pure core and thin collaborators around it:
//! - Grid data model, rule engine, and controller state machine (game
//!   module); no I/O anywhere
//! - Crossterm key events to game commands (input module)
//! - Ratatui drawing, a read-only consumer of game state (render module)
//! - Persistence of the single high-score scalar (score module)
//! - Session counters for the header (metrics module)
//! - The cooperative tokio loop wiring everything together (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod score;
