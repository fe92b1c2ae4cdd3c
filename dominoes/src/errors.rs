use crate::{SideId, Tile, TileFromStrErr};

/// The error type for [`Side::add_tile()`](crate::Side::add_tile), i.e. for
/// extending one end of the table.
#[derive(Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    UndefinedTile,
    NoOpenStone,
    NoMatchingStone { tile: Tile, open_stone: u8 },
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::UndefinedTile => write!(f, "The tile is undefined"),
            IllegalPlacement::NoOpenStone => {
                write!(f, "The engine has not been placed on this side yet")
            }
            IllegalPlacement::NoMatchingStone { tile, open_stone } => write!(
                f,
                "Neither stone of {} matches the open stone {}",
                tile, open_stone
            ),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
/// The error type for one move. A rejected move leaves the round unchanged.
pub enum IllegalMove {
    RoundNotInProgress,
    NoMoveChosen,
    NoTileChosen,
    TileIndexOutOfBounds { index: usize, hand_size: usize },
    NoSideChosen,
    NonDoubleOnOpponentSide { tile: Tile, side: SideId },
    IllegalPlacement { tile: Tile, side: SideId, err: IllegalPlacement },
    PassedDespiteLegalPlacement,
    DrewDespiteLegalPlacement,
    StockEmpty,
    NobodyHoldsEngine { engine: Tile },
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::IllegalPlacement { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::RoundNotInProgress => write!(f, "The round is not in progress"),
            IllegalMove::NoMoveChosen => write!(f, "No move was chosen"),
            IllegalMove::NoTileChosen => write!(f, "No tile was chosen"),
            IllegalMove::TileIndexOutOfBounds { index, hand_size } => write!(
                f,
                "Tile number {} was chosen, but the hand only holds {} tiles",
                index, hand_size
            ),
            IllegalMove::NoSideChosen => write!(f, "No side of the table was chosen"),
            IllegalMove::NonDoubleOnOpponentSide { tile, side } => write!(
                f,
                "{} is not a double and the opponent has not passed, so it cannot go on the {} side",
                tile, side
            ),
            IllegalMove::IllegalPlacement { tile, side, err: _ } => {
                write!(f, "{} cannot be placed on the {} side", tile, side)
            }
            IllegalMove::PassedDespiteLegalPlacement => {
                write!(f, "Cannot pass while a tile can be placed")
            }
            IllegalMove::DrewDespiteLegalPlacement => {
                write!(f, "Cannot draw while a tile can be placed")
            }
            IllegalMove::StockEmpty => write!(f, "The stock is empty"),
            IllegalMove::NobodyHoldsEngine { engine } => {
                write!(f, "Neither player holds the engine {} yet", engine)
            }
        }
    }
}

/// The error type for reading a saved game.
#[derive(Debug, PartialEq, Eq)]
pub enum SnapshotError {
    MissingRecord { label: &'static str },
    InvalidNumber { label: &'static str, text: String },
    InvalidTile { text: String, err: TileFromStrErr },
    TruncatedPlayer { label: &'static str },
    UnknownNextPlayer { text: String },
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::InvalidTile { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::MissingRecord { label } => {
                write!(f, "The saved game has no '{}' record", label)
            }
            SnapshotError::InvalidNumber { label, text } => {
                write!(f, "The '{}' record holds '{}', which is not a number", label, text)
            }
            SnapshotError::InvalidTile { text, .. } => {
                write!(f, "'{}' is not a valid tile", text)
            }
            SnapshotError::TruncatedPlayer { label } => {
                write!(f, "The '{}' block ends before its hand and score", label)
            }
            SnapshotError::UnknownNextPlayer { text } => {
                write!(f, "'{}' is neither the human nor the computer player", text)
            }
        }
    }
}
