use rand::seq::SliceRandom;
use rand::Rng;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Wrap both coordinates into [0, size). Leaving one edge re-enters the
    /// opposite edge.
    pub fn wrapped(&self, size: i32) -> Self {
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }
}

/// The snake, head at index 0. Body order is significant and the length is
/// never below 1; a length-1 snake's single segment is both head and tail.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// Create a snake consisting of a single starting segment
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        *self.body.last().expect("snake body is never empty")
    }

    /// All segments from head to tail
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check whether any segment occupies the position
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move the head to `new_head`, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);
        if !grow {
            self.body.pop();
        }
    }
}

/// Pick a uniformly random cell not in `occupied`, or None when the board is
/// full. Rejection-samples at most one attempt per cell, then falls back to a
/// uniform choice over the enumerated free cells, so the search is bounded
/// even on a crowded board.
pub fn random_free_cell<R: Rng>(
    occupied: &[Position],
    size: i32,
    rng: &mut R,
) -> Option<Position> {
    let cell_count = (size * size) as usize;
    if occupied.len() >= cell_count {
        return None;
    }

    for _ in 0..cell_count {
        let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !occupied.contains(&pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
        .filter(|pos| !occupied.contains(pos))
        .collect();
    free.choose(rng).copied()
}

/// Snake and food on a square toroidal grid. Owns both; everything else
/// reads them through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    snake: Snake,
    food: Position,
    size: i32,
}

impl Grid {
    pub fn new(snake: Snake, food: Position, size: i32) -> Self {
        Self { snake, food, size }
    }

    /// Grid dimension (the board is size × size)
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    /// Candidate head position one step in `direction`, wrapped toroidally.
    /// Always succeeds.
    pub fn advance_head(&self, direction: Direction) -> Position {
        self.snake
            .head()
            .moved_in_direction(direction)
            .wrapped(self.size)
    }

    /// Test a candidate head against the body. The tail cell is skipped only
    /// when `exclude_tail` is set, i.e. when it will be vacated this tick.
    pub fn hits_snake(&self, pos: Position, exclude_tail: bool) -> bool {
        let body = self.snake.segments();
        let checked = if exclude_tail {
            &body[..body.len() - 1]
        } else {
            body
        };
        checked.contains(&pos)
    }

    /// Move the snake's head to `new_head`, growing by one when `grow` is set
    pub fn move_snake(&mut self, new_head: Position, grow: bool) {
        self.snake.advance(new_head, grow);
    }

    /// Relocate the food to a random free cell. Returns false, leaving the
    /// food untouched, only when the snake occupies every cell.
    pub fn place_food<R: Rng>(&mut self, rng: &mut R) -> bool {
        match random_free_cell(self.snake.segments(), self.size, rng) {
            Some(pos) => {
                self.food = pos;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
    }

    #[test]
    fn test_wrapping_both_axes() {
        assert_eq!(Position::new(20, 10).wrapped(20), Position::new(0, 10));
        assert_eq!(Position::new(-1, 10).wrapped(20), Position::new(19, 10));
        assert_eq!(Position::new(10, 20).wrapped(20), Position::new(10, 0));
        assert_eq!(Position::new(10, -1).wrapped(20), Position::new(10, 19));
        assert_eq!(Position::new(3, 3).wrapped(20), Position::new(3, 3));
    }

    #[test]
    fn test_advance_head_wraps_right_edge() {
        let grid = Grid::new(Snake::new(Position::new(19, 10)), Position::new(0, 0), 20);
        assert_eq!(
            grid.advance_head(Direction::Right),
            Position::new(0, 10)
        );
    }

    #[test]
    fn test_snake_starts_as_single_segment() {
        let snake = Snake::new(Position::new(10, 10));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.tail(), Position::new(10, 10));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(6, 5));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(snake.tail(), Position::new(6, 5));
    }

    #[test]
    fn test_hits_snake_tail_exclusion() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.advance(Position::new(6, 5), true);
        snake.advance(Position::new(7, 5), true);
        // Body: (7,5) (6,5) (5,5), tail at (5,5)
        let grid = Grid::new(snake, Position::new(0, 0), 20);

        assert!(grid.hits_snake(Position::new(6, 5), true));
        assert!(grid.hits_snake(Position::new(5, 5), false));
        assert!(!grid.hits_snake(Position::new(5, 5), true));
        assert!(!grid.hits_snake(Position::new(9, 9), false));
    }

    #[test]
    fn test_random_free_cell_avoids_occupied() {
        let occupied = vec![Position::new(0, 0), Position::new(1, 0)];
        let mut rng = thread_rng();
        for _ in 0..50 {
            let pos = random_free_cell(&occupied, 3, &mut rng).unwrap();
            assert!(!occupied.contains(&pos));
            assert!(pos.x >= 0 && pos.x < 3 && pos.y >= 0 && pos.y < 3);
        }
    }

    #[test]
    fn test_random_free_cell_single_gap() {
        // Every cell of a 2x2 board occupied except (1,1)
        let occupied = vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 1),
        ];
        let mut rng = thread_rng();
        assert_eq!(
            random_free_cell(&occupied, 2, &mut rng),
            Some(Position::new(1, 1))
        );
    }

    #[test]
    fn test_random_free_cell_full_board() {
        let occupied = vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ];
        let mut rng = thread_rng();
        assert_eq!(random_free_cell(&occupied, 2, &mut rng), None);
    }

    #[test]
    fn test_place_food_never_on_snake() {
        let mut snake = Snake::new(Position::new(1, 1));
        snake.advance(Position::new(1, 2), true);
        let mut grid = Grid::new(snake, Position::new(0, 0), 4);
        let mut rng = thread_rng();
        for _ in 0..50 {
            assert!(grid.place_food(&mut rng));
            assert!(!grid.snake().contains(grid.food()));
        }
    }
}
