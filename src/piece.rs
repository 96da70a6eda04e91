use crate::display_format::{DisplayFormat, Glyphs};
use std::fmt::{Display, Formatter};
use std::num::NonZeroI8;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row delta of a pawn step toward the opposing back rank.
    pub const fn forward(self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Red => "red",
            Side::Black => "black",
        })
    }
}

/// Elephant is the bishop and horse is the knight; chariot is the rook.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(i8)]
pub enum PieceKind {
    King,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::King,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Pawn,
    ];

    /// Unsigned material value; kinds the evaluator ignores are worth zero.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::King => 1000,
            PieceKind::Chariot => 50,
            PieceKind::Horse => 30,
            PieceKind::Pawn => 10,
            PieceKind::Advisor | PieceKind::Elephant | PieceKind::Cannon => 0,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Piece {
    data: NonZeroI8,
}

impl Piece {
    pub fn from_fen_char(value: char) -> Option<Self> {
        let kind = match value.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'a' => PieceKind::Advisor,
            'e' | 'b' => PieceKind::Elephant,
            'h' | 'n' => PieceKind::Horse,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Pawn,
            _ => return None,
        };

        let side = if value.is_ascii_uppercase() { Side::Red } else { Side::Black };
        Some(Self::new(kind, side))
    }

    pub fn new(kind: PieceKind, side: Side) -> Self {
        let data = NonZeroI8::new(kind as i8 + 1).unwrap();
        let data = match side {
            Side::Red => data,
            Side::Black => -data,
        };
        Self { data }
    }

    pub fn side(&self) -> Side {
        if self.data.is_positive() { Side::Red } else { Side::Black }
    }

    pub fn is_red(&self) -> bool {
        self.side() == Side::Red
    }

    pub fn kind(&self) -> PieceKind {
        PieceKind::ALL[(self.data.unsigned_abs().get() - 1) as usize]
    }

    /// Material value, positive for red and negative for black.
    pub fn value(&self) -> i32 {
        let value = self.kind().value();
        if self.is_red() { value } else { -value }
    }

    pub fn fen_char(&self) -> char {
        let result = match self.kind() {
            PieceKind::King => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'e',
            PieceKind::Horse => 'h',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Pawn => 'p',
        };
        if self.is_red() { result.to_ascii_uppercase() } else { result }
    }

    pub fn chinese_char(&self) -> char {
        match (self.side(), self.kind()) {
            (Side::Red, PieceKind::King) => '帥',
            (Side::Red, PieceKind::Advisor) => '仕',
            (Side::Red, PieceKind::Elephant) => '相',
            (Side::Red, PieceKind::Horse) => '傌',
            (Side::Red, PieceKind::Chariot) => '俥',
            (Side::Red, PieceKind::Cannon) => '炮',
            (Side::Red, PieceKind::Pawn) => '兵',
            (Side::Black, PieceKind::King) => '將',
            (Side::Black, PieceKind::Advisor) => '士',
            (Side::Black, PieceKind::Elephant) => '象',
            (Side::Black, PieceKind::Horse) => '馬',
            (Side::Black, PieceKind::Chariot) => '車',
            (Side::Black, PieceKind::Cannon) => '砲',
            (Side::Black, PieceKind::Pawn) => '卒',
        }
    }

    pub fn display(&self, format: DisplayFormat) -> impl Display {
        let text = match format.glyphs {
            Glyphs::Chinese => self.chinese_char().to_string(),
            Glyphs::Letters => {
                let c = self.fen_char();
                format!("{c}{c}")
            }
        };
        format.paint(self.side(), &text)
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}
