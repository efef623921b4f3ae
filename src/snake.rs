use std::ops::Add;

use Direction::*;

pub const DEFAULT_SNAKE_LENGTH: usize = 4;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [North, East, South, West];

    // y grows downwards
    pub fn vector(self) -> Point {
        match self {
            North => Point::new(0, -1),
            South => Point::new(0, 1),
            East => Point::new(1, 0),
            West => Point::new(-1, 0),
        }
    }

    pub fn from_vector(v: Point) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.vector() == v)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    head: Point,
    body: Vec<Point>,
}

impl Snake {
    pub fn new(head_x: i32, head_y: i32, initial_length: usize) -> Self {
        let body = (1..=initial_length as i32)
            .map(|i| Point::new(head_x - i, head_y))
            .collect();

        Snake { head: Point::new(head_x, head_y), body }
    }

    pub fn head(&self) -> Point {
        self.head
    }

    pub fn body(&self) -> &[Point] {
        &self.body
    }

    pub fn length(&self) -> usize {
        self.body.len()
    }

    ///////////////////////////////////////////////////////////////////////////
    // Movement is driven by the engine, which knows the board and direction.

    // Walks tail to head so no segment reads an already moved neighbour.
    // Returns where the tail used to be.
    pub(crate) fn shift_body(&mut self) -> Option<Point> {
        let last_part = self.body.last().copied();

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        if let Some(first) = self.body.first_mut() {
            *first = self.head;
        }

        last_part
    }

    pub(crate) fn set_head(&mut self, head: Point) {
        self.head = head;
    }

    pub(crate) fn grow(&mut self, tail: Point) {
        self.body.push(tail);
    }
}
