use crate::board::Board;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A cell on the board; row 0 is black's back rank and column 0 is the left file.
/// A `Location` can only be constructed in bounds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Location {
    row: i8,
    col: i8,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub from: Location,
    pub to: Location,
}

impl Location {
    pub fn new(row: i8, col: i8) -> Option<Self> {
        if !(0..Board::HEIGHT).contains(&row) || !(0..Board::WIDTH).contains(&col) {
            return None;
        }
        Some(Self { row, col })
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= Board::SIZE {
            return None;
        }
        let row = (index / Board::WIDTH as usize) as i8;
        let col = (index % Board::WIDTH as usize) as i8;
        Self::new(row, col)
    }

    pub fn shift(&self, row: i8, col: i8) -> Option<Self> {
        Self::new(self.row.checked_add(row)?, self.col.checked_add(col)?)
    }

    pub fn index(&self) -> usize {
        (self.row as usize) * Board::WIDTH as usize + self.col as usize
    }

    pub fn row(&self) -> i8 {
        self.row
    }

    pub fn col(&self) -> i8 {
        self.col
    }

    /// Every cell in row-major scan order.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Board::SIZE).filter_map(Self::from_index)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

impl Move {
    pub fn new(from: Location, to: Location) -> Self {
        Self { from, to }
    }
}

/// Formats as the four-integer literal `row1 col1 row2 col2`.
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.from, self.to)
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParseMoveError {
    TokenCount(usize),
    NotInteger(String),
    OutOfBounds { row: i64, col: i64 },
}

impl Display for ParseMoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenCount(count) => write!(f, "expected 4 integers but found {count} tokens"),
            Self::NotInteger(token) => write!(f, "'{token}' is not an integer"),
            Self::OutOfBounds { row, col } => write!(
                f,
                "({row}, {col}) is outside the {}x{} board",
                Board::HEIGHT,
                Board::WIDTH
            ),
        }
    }
}

impl Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() != 4 {
            return Err(ParseMoveError::TokenCount(tokens.len()));
        }

        let mut numbers = [0i64; 4];
        for (number, token) in numbers.iter_mut().zip(&tokens) {
            *number = token
                .parse()
                .map_err(|_| ParseMoveError::NotInteger(token.to_string()))?;
        }

        let location = |row: i64, col: i64| {
            let checked = i8::try_from(row).ok().zip(i8::try_from(col).ok());
            checked
                .and_then(|(r, c)| Location::new(r, c))
                .ok_or(ParseMoveError::OutOfBounds { row, col })
        };

        let [r1, c1, r2, c2] = numbers;
        Ok(Move::new(location(r1, c1)?, location(r2, c2)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_enforced() {
        assert!(Location::new(0, 0).is_some());
        assert!(Location::new(9, 8).is_some());
        assert!(Location::new(10, 0).is_none());
        assert!(Location::new(0, 9).is_none());
        assert!(Location::new(-1, 3).is_none());
        assert!(Location::new(9, 8).unwrap().shift(1, 0).is_none());
    }

    #[test]
    fn index_is_row_major() {
        let location = Location::new(2, 7).unwrap();
        assert_eq!(location.index(), 25);
        assert_eq!(Location::from_index(25), Some(location));
        assert_eq!(Location::from_index(Board::SIZE), None);

        let scan: Vec<Location> = Location::iter().take(10).collect();
        assert_eq!(scan[8], Location::new(0, 8).unwrap());
        assert_eq!(scan[9], Location::new(1, 0).unwrap());
        assert_eq!(Location::iter().count(), 90);
    }

    #[test]
    fn parses_move_literal() {
        let mv: Move = " 6 0  5 0 ".parse().unwrap();
        assert_eq!(mv.from, Location::new(6, 0).unwrap());
        assert_eq!(mv.to, Location::new(5, 0).unwrap());
        assert_eq!(mv.to_string(), "6 0 5 0");
        assert_eq!(mv.to_string().parse::<Move>(), Ok(mv));
    }

    #[test]
    fn rejects_malformed_literals() {
        assert_eq!("6 0 5".parse::<Move>(), Err(ParseMoveError::TokenCount(3)));
        assert_eq!("".parse::<Move>(), Err(ParseMoveError::TokenCount(0)));
        assert_eq!(
            "6 x 5 0".parse::<Move>(),
            Err(ParseMoveError::NotInteger("x".to_owned()))
        );
        assert_eq!(
            "6 0 10 0".parse::<Move>(),
            Err(ParseMoveError::OutOfBounds { row: 10, col: 0 })
        );
        assert_eq!(
            "300 0 1 0".parse::<Move>(),
            Err(ParseMoveError::OutOfBounds { row: 300, col: 0 })
        );
    }
}
