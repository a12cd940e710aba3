//! Interactive play mode
//!
//! One tokio task owns the whole game: the crossterm event stream, the
//! periodic game tick, and the render timer are raced in a single `select!`
//! loop, so every state transition runs to completion before the next one
//! starts and the core never needs a lock.
//!
//! The tick stream only exists while the game is running. Pausing, dying, or
//! resetting drops the interval; (re)starting creates a fresh one whose first
//! tick fires a full period later. Dropping before creating is what rules out
//! two concurrent tick streams.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval};

use crate::game::{Difficulty, GameConfig, GameController, GamePhase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::score::ScoreStore;

/// Render at 30 FPS regardless of game speed
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct PlayMode {
    controller: GameController,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, difficulty: Difficulty, store: Box<dyn ScoreStore>) -> Self {
        Self {
            controller: GameController::new(config, difficulty, store),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut render_timer = interval(RENDER_INTERVAL);
        let mut tick_timer: Option<Interval> = None;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick; pending forever unless the game is running
                _ = next_tick(&mut tick_timer) => {
                    self.on_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.controller, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            self.sync_tick_timer(&mut tick_timer);

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Keep the tick stream in step with the controller phase: exactly one
    /// interval while Running, none otherwise.
    fn sync_tick_timer(&self, timer: &mut Option<Interval>) {
        let running = self.controller.phase() == GamePhase::Running;
        match timer {
            Some(_) if !running => *timer = None,
            None if running => {
                let period = self.controller.tick_interval();
                *timer = Some(interval_at(Instant::now() + period, period));
            }
            _ => {}
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(command) => {
                    let before = self.controller.phase();
                    self.controller.apply(command);
                    let after = self.controller.phase();
                    // A fresh game (not a resume) restarts the session clock
                    if after == GamePhase::Running
                        && matches!(before, GamePhase::Idle | GamePhase::Over)
                    {
                        self.metrics.on_game_start();
                        info!(
                            "game started at {} speed",
                            self.controller.difficulty().label()
                        );
                    }
                }
                KeyAction::SelectDifficulty(difficulty) => {
                    if self.controller.set_difficulty(difficulty) {
                        info!("difficulty set to {}", difficulty.label());
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn on_tick(&mut self) {
        if let Some(result) = self.controller.tick() {
            if result.is_terminal() {
                self.metrics.on_game_over();
                if result.grid_full {
                    info!("board filled, score {}", self.controller.score());
                } else {
                    info!("game over, score {}", self.controller.score());
                }
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Await the next game tick, or forever when no game is running
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}
