use std::time::Duration;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use crate::food::{Food, FOOD_COUNT};
use crate::snake::{Direction::{self, *}, Point, Snake, DEFAULT_SNAKE_LENGTH};
use crate::state::GameState;

pub const MIN_BOARD_WIDTH: i32 = 2 * DEFAULT_SNAKE_LENGTH as i32 + 2;
pub const MIN_BOARD_HEIGHT: i32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board width {width} is too narrow (minimum is {})", MIN_BOARD_WIDTH)]
    TooNarrow { width: i32 },
    #[error("board height {height} is too short (minimum is {})", MIN_BOARD_HEIGHT)]
    TooShort { height: i32 },
}

// The outermost ring belongs to the border.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Result<Self, BoardError> {
        if width < MIN_BOARD_WIDTH {
            return Err(BoardError::TooNarrow { width });
        }
        if height < MIN_BOARD_HEIGHT {
            return Err(BoardError::TooShort { height });
        }
        Ok(Board { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    // Only one axis is corrected per call, x first.
    fn wrap(&self, mut p: Point) -> Point {
        if p.x < 1 {
            p.x = self.width - 2;
        } else if p.x >= self.width - 1 {
            p.x = 1;
        } else if p.y < 1 {
            p.y = self.height - 2;
        } else if p.y >= self.height - 1 {
            p.y = 1;
        }
        p
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Frozen,
    Moved,
    Ate(u32),
    Crashed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub state: GameState,
    pub score: u32,
    pub board: Board,
    pub heading: Option<Direction>,
    pub head: Point,
    pub body: Vec<Point>,
    pub foods: Vec<Point>,
}

pub trait Observer {
    fn on_update(&mut self, snapshot: &Snapshot);
}

impl Observer for () {
    fn on_update(&mut self, _: &Snapshot) {}
}

impl Observer for Option<Snapshot> {
    fn on_update(&mut self, snapshot: &Snapshot) {
        *self = Some(snapshot.clone());
    }
}

pub struct Game {
    snake: Snake,
    direction: Point,
    foods: Vec<Food>,
    board: Board,
    tick_interval: Duration,
    state: GameState,
    score: u32,
    rng: StdRng,
}

impl Game {
    pub fn new(board: Board, tick_interval: Duration) -> Self {
        Self::with_rng(board, tick_interval, StdRng::from_entropy())
    }

    pub fn with_seed(board: Board, tick_interval: Duration, seed: u64) -> Self {
        Self::with_rng(board, tick_interval, StdRng::seed_from_u64(seed))
    }

    fn with_rng(board: Board, tick_interval: Duration, rng: StdRng) -> Self {
        let half_width = board.width / 2;
        let head_x = half_width + half_width % 2 - 1;

        let mut game = Game {
            snake: Snake::new(head_x, board.height / 2, DEFAULT_SNAKE_LENGTH),
            direction: East.vector(),
            foods: Vec::with_capacity(FOOD_COUNT),
            board,
            tick_interval,
            state: GameState::default(),
            score: 0,
            rng,
        };
        game.spawn_foods();
        game
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn direction(&self) -> Point {
        self.direction
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            score: self.score,
            board: self.board,
            heading: Direction::from_vector(self.direction),
            head: self.snake.head(),
            body: self.snake.body().to_vec(),
            foods: self.foods.iter().map(Food::location).collect(),
        }
    }

    pub fn set_direction(&mut self, d: Direction) {
        let reversing = match d {
            North => self.direction.y == 1,
            South => self.direction.y == -1,
            East => self.direction.x == -1,
            West => self.direction.x == 1,
        };

        if !reversing {
            self.direction = d.vector();
        }
    }

    pub fn toggle_pause(&mut self) {
        self.state = self.state.toggled();
    }

    pub fn on_resize(&mut self, width: i32, height: i32) -> Result<(), BoardError> {
        self.board = Board::new(width, height)?;
        self.spawn_foods();
        debug!("board resized to {}x{}", width, height);
        Ok(())
    }

    pub fn tick<O: Observer + ?Sized>(&mut self, observer: &mut O) -> TickOutcome {
        if !self.state.is_started() {
            return TickOutcome::Frozen;
        }

        let old_head = self.snake.head();
        let last_part = self.snake.shift_body().unwrap_or(old_head);

        self.snake.set_head(self.board.wrap(old_head + self.direction));

        let eaten = self.eat_food(last_part);
        self.check_ate_itself();

        observer.on_update(&self.snapshot());

        match (self.state, eaten) {
            (GameState::Lost, _) => TickOutcome::Crashed,
            (_, 0) => TickOutcome::Moved,
            (_, n) => TickOutcome::Ate(n),
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn spawn_foods(&mut self) {
        self.foods.clear();
        for _ in 0..FOOD_COUNT {
            let food = Food::new(self.board.width, self.board.height, &mut self.rng);
            self.foods.push(food);
        }
    }

    // Every food under the head counts, each adding a segment where the tail was.
    fn eat_food(&mut self, last_part: Point) -> u32 {
        let head = self.snake.head();
        let mut eaten = 0;

        for i in 0..self.foods.len() {
            if self.foods[i].location() == head {
                self.score += 1;
                eaten += 1;
                self.snake.grow(last_part);
                self.foods[i] = Food::new(self.board.width, self.board.height, &mut self.rng);
                debug!("food eaten at {:?}, score {}", head, self.score);
            }
        }

        eaten
    }

    // Segment 0 and the very last segment are never checked.
    fn check_ate_itself(&mut self) {
        let head = self.snake.head();
        let body = self.snake.body();
        let checked = body.get(1..body.len().saturating_sub(1)).unwrap_or(&[]);

        if checked.contains(&head) {
            self.state = GameState::Lost;
            info!("snake ran into itself at {:?}, final score {}", head, self.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TICK: Duration = Duration::from_millis(80);

    fn game(width: i32, height: i32) -> Game {
        Game::with_seed(Board::new(width, height).unwrap(), TICK, 1)
    }

    #[test]
    fn new_game_layout() {
        let g = game(100, 100);

        assert_eq!(g.board(), Board::new(100, 100).unwrap());
        assert_eq!(g.state(), GameState::Started);
        assert_eq!(g.score(), 0);
        assert_eq!(g.snake().length(), 4);
        assert_eq!(g.snake().head(), Point::new(49, 50));
        assert_eq!(g.direction(), Point::new(1, 0));
        assert_eq!(g.foods().len(), FOOD_COUNT);
        assert_eq!(g.tick_interval(), TICK);

        // odd half width keeps the head on that column
        assert_eq!(game(22, 9).snake().head(), Point::new(11, 4));
    }

    #[test]
    fn undersized_boards_are_rejected() {
        assert_eq!(Board::new(9, 40), Err(BoardError::TooNarrow { width: 9 }));
        assert_eq!(Board::new(80, 4), Err(BoardError::TooShort { height: 4 }));
        assert!(Board::new(MIN_BOARD_WIDTH, MIN_BOARD_HEIGHT).is_ok());
    }

    #[test]
    fn reversal_from_south_is_blocked() {
        let mut g = game(100, 100);
        g.set_direction(South);
        assert_eq!(g.direction(), Point::new(0, 1));

        g.set_direction(North);
        assert_eq!(g.direction(), Point::new(0, 1));

        g.set_direction(East);
        assert_eq!(g.direction(), Point::new(1, 0));
    }

    #[test]
    fn steering_sequence() {
        let mut g = game(100, 100);

        g.set_direction(North);
        assert_eq!(g.direction(), Point::new(0, -1));

        // straight back into the neck
        g.set_direction(South);
        assert_eq!(g.direction(), Point::new(0, -1));

        g.set_direction(East);
        assert_eq!(g.direction(), Point::new(1, 0));

        g.set_direction(West);
        assert_eq!(g.direction(), Point::new(1, 0));

        g.set_direction(South);
        assert_eq!(g.direction(), Point::new(0, 1));

        g.set_direction(West);
        assert_eq!(g.direction(), Point::new(-1, 0));
    }

    #[test]
    fn eating_grows_the_tail_and_replaces_the_food() {
        let mut g = game(100, 100);
        // y = 97 is outside the spawn range, so the replacement has to differ
        let spot = Point::new(50, 97);
        g.foods[0] = Food::at(spot);
        g.snake.set_head(spot);
        let last_part = Point::new(3, 3);

        assert_eq!(g.eat_food(last_part), 1);
        assert_eq!(g.score(), 1);
        assert_ne!(g.foods()[0].location(), spot);
        assert_eq!(g.snake().length(), 5);
        assert_eq!(g.snake().body().last(), Some(&last_part));
    }

    #[test]
    fn overlapping_foods_are_each_eaten() {
        let mut g = game(100, 100);
        let spot = Point::new(50, 97);
        g.foods = vec![Food::at(spot), Food::at(spot), Food::at(Point::new(1, 1))];
        g.snake.set_head(spot);

        assert_eq!(g.eat_food(Point::new(0, 0)), 2);
        assert_eq!(g.score(), 2);
        assert_eq!(g.snake().length(), 6);
        assert_eq!(g.foods()[2].location(), Point::new(1, 1));
    }

    #[test]
    fn tick_eats_food_in_front_of_the_head() {
        let mut g = game(100, 100);
        let head = g.snake().head();
        let tail = *g.snake().body().last().unwrap();
        g.foods = vec![
            Food::at(head + East.vector()),
            Food::at(Point::new(1, 97)),
            Food::at(Point::new(2, 97)),
        ];

        assert_eq!(g.tick(&mut ()), TickOutcome::Ate(1));
        assert_eq!(g.score(), 1);
        assert_eq!(g.snake().head(), head + East.vector());
        assert_eq!(g.snake().length(), 5);
        assert_eq!(g.snake().body()[0], head);
        assert_eq!(g.snake().body().last(), Some(&tail));
    }

    #[test]
    fn head_on_second_segment_loses() {
        let mut g = game(100, 100);
        let neck = g.snake().body()[1];
        g.snake.set_head(neck);

        g.check_ate_itself();
        assert_eq!(g.state(), GameState::Lost);
    }

    #[test]
    fn collision_range_skips_first_and_last_segment() {
        let mut g = game(100, 100);

        let first = g.snake().body()[0];
        g.snake.set_head(first);
        g.check_ate_itself();
        assert_eq!(g.state(), GameState::Started);

        // the true tail is never compared against the head
        let tail = *g.snake().body().last().unwrap();
        g.snake.set_head(tail);
        g.check_ate_itself();
        assert_eq!(g.state(), GameState::Started);
    }

    #[test]
    fn running_in_a_tight_circle_is_fatal() {
        let mut g = game(100, 100);
        for _ in 0..5 {
            let mut tail = *g.snake().body().last().unwrap();
            tail.y += 1;
            g.snake.grow(tail);
        }

        g.set_direction(South);
        g.tick(&mut ());
        g.set_direction(West);
        g.tick(&mut ());
        g.set_direction(North);

        assert_eq!(g.tick(&mut ()), TickOutcome::Crashed);
        assert!(g.state().is_game_over());
    }

    #[test]
    fn wrap_corrects_one_axis() {
        let board = Board::new(100, 100).unwrap();

        assert_eq!(board.wrap(Point::new(0, 2)), Point::new(98, 2));
        assert_eq!(board.wrap(Point::new(2, 0)), Point::new(2, 98));
        assert_eq!(board.wrap(Point::new(99, 3)), Point::new(1, 3));
        assert_eq!(board.wrap(Point::new(3, 99)), Point::new(3, 1));
        // both axes out: x wins, y is left alone
        assert_eq!(board.wrap(Point::new(0, 0)), Point::new(98, 0));
    }

    #[test]
    fn tick_wraps_the_head_after_advancing() {
        let mut g = game(100, 100);
        g.set_direction(South);
        g.set_direction(West);

        g.snake.set_head(Point::new(0, 2));
        g.tick(&mut ());
        assert_eq!(g.snake().head(), Point::new(98, 2));

        g.snake.set_head(Point::new(2, 0));
        g.tick(&mut ());
        assert_eq!(g.snake().head(), Point::new(1, 98));

        g.snake.set_head(Point::new(99, 3));
        g.tick(&mut ());
        assert_eq!(g.snake().head(), Point::new(98, 3));
    }

    #[test]
    fn frozen_ticks_change_nothing() {
        let mut g = game(100, 100);
        g.toggle_pause();
        let before = g.snapshot();

        let mut seen: Option<Snapshot> = None;
        assert_eq!(g.tick(&mut seen), TickOutcome::Frozen);
        assert_eq!(g.snapshot(), before);
        assert_eq!(seen, None);

        g.state = GameState::Lost;
        g.toggle_pause();
        assert_eq!(g.state(), GameState::Lost);
        assert_eq!(g.tick(&mut seen), TickOutcome::Frozen);
        assert_eq!(g.snapshot().body, before.body);
        assert_eq!(g.snapshot().foods, before.foods);
        assert_eq!(g.snapshot().score, before.score);
    }

    #[test]
    fn observer_sees_every_live_tick() {
        let mut g = game(40, 20);
        let mut seen: Option<Snapshot> = None;

        g.tick(&mut seen);
        assert_eq!(seen.as_ref(), Some(&g.snapshot()));
        assert_eq!(seen.map(|s| s.heading), Some(Some(East)));
    }

    #[test]
    fn resize_regenerates_food_inside_new_bounds() {
        let mut g = game(100, 100);

        g.on_resize(30, 12).unwrap();
        assert_eq!(g.board().width(), 30);
        assert_eq!(g.board().height(), 12);
        assert_eq!(g.foods().len(), 3);
        for f in g.foods() {
            let p = f.location();
            assert!(p.x >= 0 && p.x < 28 && p.y >= 0 && p.y < 8, "{:?}", p);
        }
    }

    #[test]
    fn failed_resize_keeps_the_old_board() {
        let mut g = game(100, 100);
        let foods = g.snapshot().foods;

        assert_eq!(g.on_resize(3, 3), Err(BoardError::TooNarrow { width: 3 }));
        assert_eq!(g.board().width(), 100);
        assert_eq!(g.snapshot().foods, foods);
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(North), Just(East), Just(South), Just(West)]
    }

    proptest! {
        #[test]
        fn head_stays_inside_the_border(
            width in MIN_BOARD_WIDTH..120,
            height in MIN_BOARD_HEIGHT..120,
            turns in proptest::collection::vec(direction(), 1..200),
        ) {
            let mut g = Game::with_seed(Board::new(width, height).unwrap(), TICK, 9);

            for d in turns {
                g.set_direction(d);
                g.tick(&mut ());
                if g.state().is_game_over() {
                    break;
                }
                let head = g.snake().head();
                prop_assert!(head.x >= 1 && head.x <= width - 2, "{:?}", head);
                prop_assert!(head.y >= 1 && head.y <= height - 2, "{:?}", head);
            }
        }

        #[test]
        fn never_turns_around_in_place(turns in proptest::collection::vec(direction(), 1..100)) {
            let mut g = game(40, 20);

            for d in turns {
                let before = g.direction();
                g.set_direction(d);
                prop_assert_ne!(before + g.direction(), Point::default());
            }
        }

        #[test]
        fn paused_world_is_frozen(ticks in 1usize..50) {
            let mut g = game(40, 20);
            g.toggle_pause();
            let before = g.snapshot();

            for _ in 0..ticks {
                prop_assert_eq!(g.tick(&mut ()), TickOutcome::Frozen);
            }
            prop_assert_eq!(g.snapshot(), before);
        }
    }
}
