#![forbid(unsafe_code)]

pub mod parser;
pub mod traits;

use serde::{Serialize, Serializer};
use strum::{Display, EnumString, IntoStaticStr};

use std::{fmt, ops::Deref};

////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_BOARD_SIZE: i32 = 15;
pub const ITEMS_CAPACITY: usize = 100;
pub const OBSTACLES_CAPACITY: usize = 256;

pub const FALLBACK_ACTION: &str = "STAY";

////////////////////////////////////////////////////////////////////////////////

#[derive(Serialize, Clone, Copy, Hash, PartialEq, Eq, Debug, Default)]
pub struct Point(pub i32, pub i32);

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Move {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Stay,
}

/// One line of text sent back to the orchestrator.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct Action(String);

/// Fixed-capacity point storage, reused across turns without reallocating.
#[derive(Clone, Copy)]
pub struct PointBuf<const N: usize> {
    points: [Point; N],
    len: usize,
}

/// Everything the strategy gets to see on one turn.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board_size: i32,
    #[serde(rename = "my_pos")]
    pub agent_position: Point,
    #[serde(rename = "coins")]
    pub items: PointBuf<ITEMS_CAPACITY>,
    #[serde(rename = "walls")]
    pub obstacles: PointBuf<OBSTACLES_CAPACITY>,
}

////////////////////////////////////////////////////////////////////////////////

impl Point {
    /// Manhattan distance, wide enough for any pair of `i32` coordinates.
    pub fn distance_to(self, other: Point) -> u64 {
        u64::from(self.0.abs_diff(other.0)) + u64::from(self.1.abs_diff(other.1))
    }

    pub fn in_bounds(self, board_size: i32) -> bool {
        self.0 >= 0 && self.0 < board_size && self.1 >= 0 && self.1 < board_size
    }

    /// The cell one step away, or `None` when it falls outside `i32`.
    pub fn adjacent(self, direction: Move) -> Option<Point> {
        let Point(x, y) = self;
        match direction {
            Move::MoveUp => Some(Point(x, y.checked_sub(1)?)),
            Move::MoveDown => Some(Point(x, y.checked_add(1)?)),
            Move::MoveLeft => Some(Point(x.checked_sub(1)?, y)),
            Move::MoveRight => Some(Point(x.checked_add(1)?, y)),
            Move::Stay => Some(self),
        }
    }

    /// Neighbouring cells paired with the move leading there, board bounds
    /// unchecked.
    pub fn iter_moves(self) -> impl Iterator<Item = (Move, Point)> {
        Move::DIRECTIONS
            .into_iter()
            .filter_map(move |direction| Some((direction, self.adjacent(direction)?)))
    }
}

impl Move {
    pub const DIRECTIONS: [Move; 4] = [
        Move::MoveUp,
        Move::MoveDown,
        Move::MoveLeft,
        Move::MoveRight,
    ];
}

////////////////////////////////////////////////////////////////////////////////

impl Action {
    /// Keeps the text up to its first line break. Blank text is not an action.
    pub fn from_text(text: &str) -> Option<Self> {
        let line = text.split('\n').next().unwrap_or_default();
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.trim().is_empty() {
            None
        } else {
            Some(Self(line.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Action {
    fn default() -> Self {
        Self(FALLBACK_ACTION.to_string())
    }
}

impl From<Move> for Action {
    fn from(direction: Move) -> Self {
        let text: &'static str = direction.into();
        Self(text.to_string())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////

impl<const N: usize> PointBuf<N> {
    pub fn new() -> Self {
        Self {
            points: [Point::default(); N],
            len: 0,
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Returns `false` and drops the point when the buffer is full.
    pub fn push(&mut self, point: Point) -> bool {
        if self.is_full() {
            return false;
        }

        self.points[self.len] = point;
        self.len += 1;
        true
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points[..self.len]
    }
}

impl<const N: usize> Default for PointBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Deref for PointBuf<N> {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<const N: usize> PartialEq for PointBuf<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize> Eq for PointBuf<N> {}

impl<const N: usize> fmt::Debug for PointBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<const N: usize> Serialize for PointBuf<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

impl<const N: usize> FromIterator<Point> for PointBuf<N> {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut buf = Self::new();
        for point in iter {
            if !buf.push(point) {
                break;
            }
        }
        buf
    }
}

////////////////////////////////////////////////////////////////////////////////

impl Default for GameState {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            agent_position: Point::default(),
            items: PointBuf::new(),
            obstacles: PointBuf::new(),
        }
    }
}

impl GameState {
    pub fn parse(line: &str) -> Self {
        let mut state = Self::default();
        state.parse_from(line);
        state
    }

    /// Overwrites every field with what `line` holds.
    pub fn parse_from(&mut self, line: &str) {
        parser::fill(self, line);
    }
}

////////////////////////////////////////////////////////////////////////////////
