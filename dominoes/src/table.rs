mod side;

pub use side::*;

use crate::{IllegalPlacement, SideId, Tile};

/// The two independently growing ends of the table.
///
/// The engine itself is not stored on either side, it only seeds their open
/// stones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    left: Side,
    right: Side,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    /// An empty table, with no open stones until the engine is placed.
    pub fn new() -> Self {
        Self {
            left: Side::new(SideId::Left),
            right: Side::new(SideId::Right),
        }
    }

    pub fn from_sides(left: Side, right: Side) -> Self {
        debug_assert_eq!(left.id(), SideId::Left);
        debug_assert_eq!(right.id(), SideId::Right);
        Self { left, right }
    }

    pub fn side(&self, id: SideId) -> &Side {
        match id {
            SideId::Left => &self.left,
            SideId::Right => &self.right,
        }
    }

    fn side_mut(&mut self, id: SideId) -> &mut Side {
        match id {
            SideId::Left => &mut self.left,
            SideId::Right => &mut self.right,
        }
    }

    /// Seeds both open stones with the two ranks of the engine.
    pub fn place_engine(&mut self, engine: Tile) {
        self.left.seed(engine.left());
        self.right.seed(engine.right());
    }

    pub fn add_to_side(&mut self, tile: Tile, id: SideId) -> Result<(), IllegalPlacement> {
        self.side_mut(id).add_tile(tile)
    }

    pub fn open_stone(&self, id: SideId) -> Option<u8> {
        self.side(id).open_stone()
    }

    pub fn opponent_open_stone(&self, id: SideId) -> Option<u8> {
        self.side(id.opponent()).open_stone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile;

    #[test]
    fn engine_seeds_both_sides() {
        let mut table = Table::new();
        assert_eq!(table.open_stone(SideId::Left), None);
        table.place_engine(tile!("5-5"));
        assert_eq!(table.open_stone(SideId::Left), Some(5));
        assert_eq!(table.open_stone(SideId::Right), Some(5));
    }

    #[test]
    fn placement_goes_to_the_named_side() {
        let mut table = Table::new();
        table.place_engine(tile!("5-5"));
        table.add_to_side(tile!("5-1"), SideId::Right).unwrap();
        assert_eq!(table.open_stone(SideId::Right), Some(1));
        assert_eq!(table.opponent_open_stone(SideId::Left), Some(1));
        assert_eq!(table.opponent_open_stone(SideId::Right), Some(5));
        assert!(table.side(SideId::Left).tiles().is_empty());
        assert!(table.add_to_side(tile!("2-3"), SideId::Left).is_err());
    }
}
