use std::time::Duration;

use log::info;

use super::action::{Command, Direction};
use super::config::{Difficulty, GameConfig};
use super::engine::{GameEngine, StepResult};
use super::state::Grid;
use crate::score::ScoreStore;

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Fresh board, waiting for the first input
    Idle,
    /// Ticking
    Running,
    /// Ticking suspended, board intact
    Paused,
    /// Ended, by collision or by filling the board
    Over,
}

/// Owns everything mutable about a game in progress: the phase, the heading,
/// the score, the high score, and the grid. All transitions go through the
/// methods below; the engine supplies the per-tick rules.
pub struct GameController {
    engine: GameEngine,
    grid: Grid,
    config: GameConfig,
    phase: GamePhase,
    heading: Option<Direction>,
    score: u32,
    high_score: u32,
    won: bool,
    difficulty: Difficulty,
    store: Box<dyn ScoreStore>,
}

impl GameController {
    pub fn new(config: GameConfig, difficulty: Difficulty, mut store: Box<dyn ScoreStore>) -> Self {
        let mut engine = GameEngine::new(config.clone());
        let grid = engine.reset();
        let high_score = store.load();

        Self {
            engine,
            grid,
            config,
            phase: GamePhase::Idle,
            heading: None,
            score: 0,
            high_score,
            won: false,
            difficulty,
            store,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// True when the game ended by filling the board rather than by dying
    pub fn won(&self) -> bool {
        self.won
    }

    pub fn tick_interval(&self) -> Duration {
        self.difficulty.tick_interval()
    }

    /// Dispatch a discrete command from the input layer
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Move(direction) => self.set_direction(direction),
            Command::StartOrToggle => match self.phase {
                GamePhase::Idle => self.start(),
                GamePhase::Running | GamePhase::Paused => self.toggle_pause(),
                GamePhase::Over => {
                    // Play again
                    self.reset();
                    self.start();
                }
            },
            Command::Reset => self.reset(),
        }
    }

    /// Idle → Running. A neutral heading defaults to Right. No-op in every
    /// other phase, so repeated starts cannot spawn a second tick stream.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            return;
        }
        if self.heading.is_none() {
            self.heading = Some(Direction::Right);
        }
        self.phase = GamePhase::Running;
    }

    /// Running ⇄ Paused; no-op if Idle or Over
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    /// Accept a direction intent. Ignored while Paused or Over, and ignored
    /// unless the new direction is perpendicular to the current heading (a
    /// neutral heading accepts anything). An accepted intent while Idle also
    /// starts the game.
    pub fn set_direction(&mut self, direction: Direction) {
        if matches!(self.phase, GamePhase::Paused | GamePhase::Over) {
            return;
        }
        let accepted = match self.heading {
            None => true,
            Some(current) => current.is_perpendicular(direction),
        };
        if !accepted {
            return;
        }
        self.heading = Some(direction);
        if self.phase == GamePhase::Idle {
            self.start();
        }
    }

    /// Change the speed preset. Accepted only while Idle; returns whether the
    /// change applied.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    /// Advance the game by one tick. Returns None unless Running.
    pub fn tick(&mut self) -> Option<StepResult> {
        if self.phase != GamePhase::Running {
            return None;
        }
        let direction = self.heading?;

        let result = self.engine.step(&mut self.grid, direction);

        if result.collided {
            self.phase = GamePhase::Over;
            return Some(result);
        }

        if result.ate_food {
            self.score += self.config.score_increment;
            if self.score > self.high_score {
                self.high_score = self.score;
                info!("new high score: {}", self.high_score);
                self.store.save(self.high_score);
            }
        }

        if result.grid_full {
            self.won = true;
            self.phase = GamePhase::Over;
        }

        Some(result)
    }

    #[cfg(test)]
    pub(crate) fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Any phase → Idle with a fresh board, neutral heading, and zero score
    pub fn reset(&mut self) {
        self.grid = self.engine.reset();
        self.heading = None;
        self.score = 0;
        self.won = false;
        self.phase = GamePhase::Idle;
    }
}
