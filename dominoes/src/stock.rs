use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::Tile;

/// The undealt tiles of a round.
///
/// Tiles are drawn front to back. Drawing only advances a cursor, the
/// underlying sequence is never reordered after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stock {
    tiles: Vec<Tile>,
    next: usize,
}

impl Stock {
    /// A full, shuffled set.
    pub fn new(rng: &mut StdRng) -> Self {
        let mut tiles = Tile::full_set();
        tiles.shuffle(rng);
        Self { tiles, next: 0 }
    }

    /// A stock holding exactly `tiles`, drawn in the given order.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles, next: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.next >= self.tiles.len()
    }

    pub fn len(&self) -> usize {
        self.tiles.len().saturating_sub(self.next)
    }

    /// Takes the next tile, or `None` if the stock is exhausted.
    pub fn draw_next(&mut self) -> Option<Tile> {
        let tile = self.tiles.get(self.next).copied()?;
        self.next += 1;
        Some(tile)
    }

    /// The tiles that have not been drawn yet, in draw order.
    pub fn remaining_tiles(&self) -> &[Tile] {
        &self.tiles[self.next.min(self.tiles.len())..]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;

    use super::*;
    use crate::tile;

    #[test]
    fn fresh_stock_is_a_full_set() {
        let mut rng = StdRng::seed_from_u64(7);
        let stock = Stock::new(&mut rng);
        assert_eq!(stock.len(), 28);
        let distinct: HashSet<Tile> = stock
            .remaining_tiles()
            .iter()
            .map(|t| {
                let (l, r) = (t.left().unwrap(), t.right().unwrap());
                Tile::new(l.min(r), l.max(r))
            })
            .collect();
        assert_eq!(distinct.len(), 28);
    }

    #[test]
    fn shuffle_depends_on_seed() {
        let a = Stock::new(&mut StdRng::seed_from_u64(1));
        let b = Stock::new(&mut StdRng::seed_from_u64(1));
        let c = Stock::new(&mut StdRng::seed_from_u64(2));
        assert_eq!(a, b);
        assert_ne!(a.remaining_tiles(), c.remaining_tiles());
    }

    #[test]
    fn draw_advances_until_empty() {
        let mut stock = Stock::from_tiles(vec![tile!("1-2"), tile!("3-3")]);
        assert_eq!(stock.draw_next(), Some(tile!("1-2")));
        assert_eq!(stock.remaining_tiles(), &[tile!("3-3")]);
        assert!(!stock.is_empty());
        assert_eq!(stock.draw_next(), Some(tile!("3-3")));
        assert!(stock.is_empty());
        assert_eq!(stock.draw_next(), None);
        assert!(stock.remaining_tiles().is_empty());
        assert_eq!(stock.len(), 0);
    }
}
