use rand::Rng;

use crate::snake::Point;

pub const FOOD_COUNT: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    location: Point,
}

impl Food {
    // Leaves room for the right border and the status bar. May land on the
    // snake or on another food.
    pub fn new<R: Rng>(board_width: i32, board_height: i32, rng: &mut R) -> Self {
        let location = Point::new(
            rng.gen_range(0..board_width - 2),
            rng.gen_range(0..board_height - 4),
        );
        Food { location }
    }

    #[cfg(test)]
    pub(crate) fn at(location: Point) -> Self {
        Food { location }
    }

    pub fn location(&self) -> Point {
        self.location
    }
}
