use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The highest rank a stone can carry, i.e. this is a double-six set.
pub const MAX_RANK: u8 = 6;

/// A domino tile: two stones, each with a rank in `0..=MAX_RANK`.
///
/// Constructing a tile with an out-of-range rank is not an error. It yields
/// [`Tile::Undefined`] instead, and callers have to check for that before
/// using the tile. An undefined tile never matches any open stone, is never
/// a double and is only equal to another undefined tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Stones { left: u8, right: u8 },
    Undefined,
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Undefined
    }
}

impl Tile {
    pub fn new(left: u8, right: u8) -> Self {
        if left <= MAX_RANK && right <= MAX_RANK {
            Tile::Stones { left, right }
        } else {
            Tile::Undefined
        }
    }

    /// Every distinct tile of the set, in ascending order of the lower rank.
    pub fn full_set() -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(set_size());
        for left in 0..=MAX_RANK {
            for right in left..=MAX_RANK {
                tiles.push(Tile::Stones { left, right });
            }
        }
        tiles
    }

    pub fn left(&self) -> Option<u8> {
        match *self {
            Tile::Stones { left, .. } => Some(left),
            Tile::Undefined => None,
        }
    }

    pub fn right(&self) -> Option<u8> {
        match *self {
            Tile::Stones { right, .. } => Some(right),
            Tile::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Tile::Stones { .. })
    }

    pub fn is_double(&self) -> bool {
        match *self {
            Tile::Stones { left, right } => left == right,
            Tile::Undefined => false,
        }
    }

    /// The sum of both ranks. Zero for an undefined tile.
    pub fn numeric_value(&self) -> u32 {
        match *self {
            Tile::Stones { left, right } => u32::from(left) + u32::from(right),
            Tile::Undefined => 0,
        }
    }

    /// Exchanges the two stones in place.
    pub fn swap(&mut self) {
        if let Tile::Stones { left, right } = self {
            std::mem::swap(left, right);
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        let mut tile = self;
        tile.swap();
        tile
    }

    /// Equality that ignores orientation, so `3-6` loosely equals `6-3`.
    pub fn loose_eq(&self, other: &Tile) -> bool {
        *self == *other || *self == other.flipped()
    }

    pub fn has_rank(&self, rank: u8) -> bool {
        match *self {
            Tile::Stones { left, right } => left == rank || right == rank,
            Tile::Undefined => false,
        }
    }

    /// Whether either stone equals `open_stone`. A side without an open
    /// stone matches nothing.
    pub fn matches(&self, open_stone: Option<u8>) -> bool {
        open_stone.is_some_and(|stone| self.has_rank(stone))
    }
}

/// Number of tiles in a full set, `(MAX_RANK + 1)(MAX_RANK + 2) / 2`.
pub const fn set_size() -> usize {
    let n = MAX_RANK as usize + 1;
    n * (n + 1) / 2
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tile::Stones { left, right } => write!(f, "{}-{}", left, right),
            Tile::Undefined => write!(f, "?-?"),
        }
    }
}

/// The error type for the [`FromStr`] instance of [`Tile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileFromStrErr {
    MissingSeparator,
    InvalidRank,
    RankOutOfRange,
}

impl std::error::Error for TileFromStrErr {}

impl std::fmt::Display for TileFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileFromStrErr::MissingSeparator => write!(f, "Tile is not of the form <rank>-<rank>"),
            TileFromStrErr::InvalidRank => write!(f, "Tile rank is not a number"),
            TileFromStrErr::RankOutOfRange => {
                write!(f, "Tile rank is larger than {}", MAX_RANK)
            }
        }
    }
}

impl FromStr for Tile {
    type Err = TileFromStrErr;

    /// Parses the `"<left>-<right>"` form. Unlike [`Tile::new`], an
    /// out-of-range rank is reported instead of producing an undefined tile.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (left, right) = s
            .trim()
            .split_once('-')
            .ok_or(TileFromStrErr::MissingSeparator)?;
        let left: u8 = left.parse().map_err(|_| TileFromStrErr::InvalidRank)?;
        let right: u8 = right.parse().map_err(|_| TileFromStrErr::InvalidRank)?;
        if left > MAX_RANK || right > MAX_RANK {
            return Err(TileFromStrErr::RankOutOfRange);
        }
        Ok(Tile::Stones { left, right })
    }
}

/// Shorthand for creating tiles from their `"<left>-<right>"` text form.
///
/// This macro is just calling the [`FromStr`] instance of [`Tile`].
/// ```
/// # use dominoes::{tile, Tile};
/// assert_eq!(tile!("6-3"), Tile::new(6, 3));
/// ```
#[macro_export]
macro_rules! tile {
    ($s:literal) => {
        <$crate::Tile as std::str::FromStr>::from_str($s)
            .expect("Invalid tile code given to tile! macro")
    };
}
// The import is for using the macro in other modules
#[allow(unused_imports)]
pub(crate) use tile;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use quickcheck::quickcheck;

    use super::*;

    quickcheck! {
        fn flip_is_loosely_equal(tile: Tile) -> bool {
            tile.loose_eq(&tile.flipped())
        }

        fn double_flip_is_identity(tile: Tile) -> bool {
            tile.flipped().flipped() == tile
        }

        fn flip_keeps_numeric_value(tile: Tile) -> bool {
            tile.flipped().numeric_value() == tile.numeric_value()
        }
    }

    #[test]
    fn out_of_range_rank_is_undefined() {
        assert_eq!(Tile::new(7, 2), Tile::Undefined);
        assert_eq!(Tile::new(2, 200), Tile::Undefined);
        assert!(!Tile::Undefined.is_double());
        assert!(!Tile::Undefined.matches(Some(0)));
        assert_eq!(Tile::Undefined.left(), None);
    }

    #[test]
    fn strict_and_loose_equality() {
        assert_ne!(tile!("3-6"), tile!("6-3"));
        assert!(tile!("3-6").loose_eq(&tile!("6-3")));
        assert!(!tile!("3-6").loose_eq(&tile!("3-5")));
    }

    #[test]
    fn full_set_has_every_pair_once() {
        let set = Tile::full_set();
        assert_eq!(set.len(), 28);
        assert_eq!(set_size(), 28);
        let unordered: HashSet<(u8, u8)> = set
            .iter()
            .map(|t| {
                let (l, r) = (t.left().unwrap(), t.right().unwrap());
                (l.min(r), l.max(r))
            })
            .collect();
        assert_eq!(unordered.len(), 28);
    }

    #[test]
    fn text_form() {
        assert_eq!(tile!("4-1").to_string(), "4-1");
        assert_eq!(tile!("4-1").numeric_value(), 5);
        assert_eq!("7-1".parse::<Tile>(), Err(TileFromStrErr::RankOutOfRange));
        assert_eq!("41".parse::<Tile>(), Err(TileFromStrErr::MissingSeparator));
        assert_eq!("a-1".parse::<Tile>(), Err(TileFromStrErr::InvalidRank));
    }

    #[test]
    fn swap_in_place() {
        let mut tile = tile!("2-5");
        tile.swap();
        assert_eq!(tile, tile!("5-2"));
        assert!(tile!("5-5").is_double());
    }
}
