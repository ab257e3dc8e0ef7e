use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

const FIRST_COLUMN: u8 = b'A';
const LAST_COLUMN: u8 = b'Z';

/// Who occupies a square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    None,
    PlayerA,
    PlayerB,
}

impl Owner {
    /// Maps the numeric ids used by the host: 0=empty, 1=player A, 2=player B.
    /// Anything else is treated as empty.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::PlayerA,
            2 => Self::PlayerB,
            _ => Self::None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::PlayerA => 1,
            Self::PlayerB => 2,
        }
    }

    pub fn is_player(self) -> bool {
        self != Self::None
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::PlayerA => Self::PlayerB,
            Self::PlayerB => Self::PlayerA,
            Self::None => Self::None,
        }
    }

    /// Row delta of a forward slide: player A advances up the rows, player B down.
    pub fn forward(self) -> i8 {
        match self {
            Self::PlayerA => 1,
            Self::PlayerB => -1,
            Self::None => 0,
        }
    }
}

/// A board coordinate: column letter plus 1-based row number, e.g. `B2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub column: char,
    pub row: u8,
}

impl Coord {
    pub fn new(column: char, row: u8) -> Self {
        Self { column, row }
    }

    /// Coordinate for zero-based column/row indexes.
    /// Returns `None` past column `Z` or past row 255.
    pub fn from_indexes(column: usize, row: usize) -> Option<Self> {
        let column = u8::try_from(column).ok()?.checked_add(FIRST_COLUMN)?;
        let row = u8::try_from(row + 1).ok()?;
        (column <= LAST_COLUMN).then(|| Self::new(column as char, row))
    }

    /// Diagonal (or any) step. Returns `None` when the result has no name.
    pub fn offset(self, d_column: i8, d_row: i8) -> Option<Self> {
        let column = self.column as i16 + d_column as i16;
        let row = self.row as i16 + d_row as i16;
        if !(FIRST_COLUMN as i16..=LAST_COLUMN as i16).contains(&column) {
            return None;
        }
        if !(1..=u8::MAX as i16).contains(&row) {
            return None;
        }
        Some(Self::new(column as u8 as char, row as u8))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl FromStr for Coord {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidCoord {
            text: s.to_string(),
        };

        let mut chars = s.chars();
        let column = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .filter(char::is_ascii_uppercase)
            .ok_or_else(invalid)?;
        let row: u8 = chars.as_str().parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(Self::new(column, row))
    }
}

/// A pixel position reported by the calibration step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel corners of one square, kept for the overlay consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub left_up: Point,
    pub right_up: Point,
    pub left_down: Point,
    pub right_down: Point,
}

/// One square of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub coord: Coord,
    pub owner: Owner,
    pub bounds: FieldBounds,
}

impl Field {
    pub fn new(coord: Coord, owner: Owner) -> Self {
        Self {
            coord,
            owner,
            bounds: FieldBounds::default(),
        }
    }
}

/// One turn of a single piece.
///
/// `path` lists every square the piece stands on, origin first.
/// `captured` lists the jumped squares in order and is empty for a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub path: Vec<Coord>,
    pub captured: Vec<Coord>,
}

impl Move {
    pub fn slide(from: Coord, to: Coord) -> Self {
        Self {
            path: vec![from, to],
            captured: Vec::new(),
        }
    }

    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    pub fn origin(&self) -> Coord {
        self.path[0]
    }

    pub fn destination(&self) -> Coord {
        self.path[self.path.len() - 1]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coord) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{coord}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_parses_and_prints_field_names() {
        let coord: Coord = "c3".parse().unwrap();

        assert_eq!(coord, Coord::new('C', 3));
        assert_eq!(coord.to_string(), "C3");
        assert_eq!("H12".parse::<Coord>().unwrap(), Coord::new('H', 12));
    }

    #[test]
    fn malformed_field_names_are_rejected() {
        for text in ["", "3C", "A", "A0", "A-1", "AA1", "A256"] {
            assert!(text.parse::<Coord>().is_err(), "{text:?} should not parse");
        }
    }

    #[test]
    fn offset_stops_at_letter_and_row_limits() {
        assert_eq!(Coord::new('A', 1).offset(-1, 1), None);
        assert_eq!(Coord::new('A', 1).offset(1, -1), None);
        assert_eq!(Coord::new('Z', 4).offset(1, 1), None);
        assert_eq!(Coord::new('B', 2).offset(1, 1), Some(Coord::new('C', 3)));
    }

    #[test]
    fn from_indexes_is_zero_based() {
        assert_eq!(Coord::from_indexes(0, 0), Some(Coord::new('A', 1)));
        assert_eq!(Coord::from_indexes(7, 7), Some(Coord::new('H', 8)));
        assert_eq!(Coord::from_indexes(26, 0), None);
    }

    #[test]
    fn owner_ids_round_trip_and_unknown_ids_are_empty() {
        assert_eq!(Owner::from_u8(1), Owner::PlayerA);
        assert_eq!(Owner::from_u8(2).to_u8(), 2);
        assert_eq!(Owner::from_u8(0), Owner::None);
        assert_eq!(Owner::from_u8(7), Owner::None);
        assert_eq!(Owner::PlayerA.opponent(), Owner::PlayerB);
        assert_eq!(Owner::None.opponent(), Owner::None);
    }

    #[test]
    fn move_renders_path_without_captured_squares() {
        let mv = Move {
            path: vec![Coord::new('B', 2), Coord::new('D', 4), Coord::new('F', 6)],
            captured: vec![Coord::new('C', 3), Coord::new('E', 5)],
        };

        assert_eq!(mv.to_string(), "B2 D4 F6");
        assert!(mv.is_capture());
        assert_eq!(mv.origin(), Coord::new('B', 2));
        assert_eq!(mv.destination(), Coord::new('F', 6));
    }
}
