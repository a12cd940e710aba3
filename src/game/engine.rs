use rand::rngs::ThreadRng;

use super::action::Direction;
use super::config::GameConfig;
use super::state::{random_free_cell, Grid, Position, Snake};

/// Result of one tick of the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the candidate head hit the body
    pub collided: bool,
    /// Whether the snake now fills the whole board, leaving no food cell
    pub grid_full: bool,
}

impl StepResult {
    /// True when this tick ended the game, by death or by filling the board
    pub fn is_terminal(&self) -> bool {
        self.collided || self.grid_full
    }
}

/// The rule engine. Holds no game state of its own; `step` is a transition
/// over a grid and a direction.
pub struct GameEngine {
    config: GameConfig,
    rng: ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    /// Build the starting grid: a single segment in the center, food on a
    /// random other cell
    pub fn reset(&mut self) -> Grid {
        let size = self.config.grid_size as i32;
        let snake = Snake::new(Position::new(size / 2, size / 2));
        let food = random_free_cell(snake.segments(), size, &mut self.rng)
            .expect("a fresh board always has a free cell");
        Grid::new(snake, food, size)
    }

    /// Advance the game by one tick in `direction`.
    ///
    /// The candidate head wraps around the board edges. It is tested against
    /// every body segment except the tail cell being vacated this tick; when
    /// food is eaten the tail stays put, so the exclusion does not apply and
    /// landing on the tail is fatal. On a collision the grid is left
    /// unchanged. Eating grows the snake by one and relocates the food; if no
    /// free cell remains the board is full and the game is won.
    pub fn step(&mut self, grid: &mut Grid, direction: Direction) -> StepResult {
        let candidate = grid.advance_head(direction);
        let ate_food = candidate == grid.food();

        if grid.hits_snake(candidate, !ate_food) {
            return StepResult {
                ate_food: false,
                collided: true,
                grid_full: false,
            };
        }

        grid.move_snake(candidate, ate_food);
        let grid_full = ate_food && !grid.place_food(&mut self.rng);

        StepResult {
            ate_food,
            collided: false,
            grid_full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig::default())
    }

    // Builds a snake with the given cells, head first
    fn snake(cells: &[(i32, i32)]) -> Snake {
        let mut body: Vec<Position> = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        let tail = body.pop().unwrap();
        let mut snake = Snake::new(tail);
        for pos in body.into_iter().rev() {
            snake.advance(pos, true);
        }
        snake
    }

    #[test]
    fn test_reset_layout() {
        let mut engine = engine();
        let grid = engine.reset();
        assert_eq!(grid.snake().len(), 1);
        assert_eq!(grid.snake().head(), Position::new(10, 10));
        assert_ne!(grid.food(), grid.snake().head());
    }

    #[test]
    fn test_single_segment_moves_without_growing() {
        let mut engine = engine();
        let mut grid = Grid::new(snake(&[(10, 10)]), Position::new(0, 0), 20);

        let result = engine.step(&mut grid, Direction::Right);

        assert!(!result.collided);
        assert!(!result.ate_food);
        assert_eq!(grid.snake().len(), 1);
        assert_eq!(grid.snake().head(), Position::new(11, 10));
    }

    #[test]
    fn test_eating_grows_and_relocates_food() {
        let mut engine = engine();
        let mut grid = Grid::new(snake(&[(10, 10), (9, 10)]), Position::new(11, 10), 20);

        let result = engine.step(&mut grid, Direction::Right);

        assert!(result.ate_food);
        assert!(!result.collided);
        assert_eq!(
            grid.snake().segments(),
            &[
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
        assert!(!grid.snake().contains(grid.food()));
    }

    #[test]
    fn test_length_change_tracks_ate_food() {
        let mut engine = engine();
        let mut grid = Grid::new(snake(&[(5, 5), (4, 5)]), Position::new(0, 0), 20);

        let before = grid.snake().len();
        let result = engine.step(&mut grid, Direction::Up);
        assert!(!result.ate_food);
        assert_eq!(grid.snake().len(), before);

        let head = grid.snake().head();
        let mut grid = Grid::new(
            grid.snake().clone(),
            head.moved_in_direction(Direction::Up).wrapped(20),
            20,
        );
        let before = grid.snake().len();
        let result = engine.step(&mut grid, Direction::Up);
        assert!(result.ate_food);
        assert_eq!(grid.snake().len(), before + 1);
    }

    #[test]
    fn test_moving_into_vacated_tail_is_allowed() {
        let mut engine = engine();
        let mut grid = Grid::new(snake(&[(5, 5), (6, 5), (7, 5)]), Position::new(0, 0), 20);

        let result = engine.step(&mut grid, Direction::Left);

        assert!(!result.collided);
        assert_eq!(grid.snake().head(), Position::new(4, 5));
    }

    #[test]
    fn test_moving_into_body_collides() {
        let mut engine = engine();
        let mut grid = Grid::new(snake(&[(5, 5), (4, 5), (3, 5)]), Position::new(0, 0), 20);
        let before = grid.clone();

        let result = engine.step(&mut grid, Direction::Left);

        assert!(result.collided);
        assert!(!result.ate_food);
        // Grid unchanged on collision
        assert_eq!(grid, before);
    }

    #[test]
    fn test_tail_is_fatal_when_eating() {
        // Square ring: head (5,5), tail (6,5). Moving right lands on the tail
        // cell, which stays put because the food is there too.
        let mut engine = engine();
        let mut grid = Grid::new(
            snake(&[(5, 5), (5, 6), (6, 6), (6, 5)]),
            Position::new(6, 5),
            20,
        );

        let result = engine.step(&mut grid, Direction::Right);

        assert!(result.collided);
        assert!(!result.ate_food);
    }

    #[test]
    fn test_tail_cell_passable_when_not_eating() {
        // Same ring, food elsewhere: the tail vacates and the move is legal
        let mut engine = engine();
        let mut grid = Grid::new(
            snake(&[(5, 5), (5, 6), (6, 6), (6, 5)]),
            Position::new(0, 0),
            20,
        );

        let result = engine.step(&mut grid, Direction::Right);

        assert!(!result.collided);
        assert_eq!(grid.snake().head(), Position::new(6, 5));
        assert_eq!(grid.snake().len(), 4);
    }

    #[test]
    fn test_wrap_across_right_edge() {
        let mut engine = engine();
        let mut grid = Grid::new(snake(&[(19, 10)]), Position::new(0, 0), 20);

        let result = engine.step(&mut grid, Direction::Right);

        assert!(!result.collided);
        assert_eq!(grid.snake().head(), Position::new(0, 10));
    }

    #[test]
    fn test_filling_the_board_wins() {
        // 2x2 board, snake on three cells, food on the last one
        let mut engine = GameEngine::new(GameConfig::new(4));
        let mut grid = Grid::new(
            snake(&[(0, 0), (1, 0), (1, 1)]),
            Position::new(0, 1),
            2,
        );

        let result = engine.step(&mut grid, Direction::Down);

        assert!(result.ate_food);
        assert!(result.grid_full);
        assert!(result.is_terminal());
        assert!(!result.collided);
        assert_eq!(grid.snake().len(), 4);
    }
}
