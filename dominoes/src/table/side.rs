use crate::{IllegalPlacement, SideId, Tile};

/// One end of the table: the tiles placed on it, in play order starting next
/// to the engine, and the stone a new tile must match.
///
/// Tiles are stored so that the chain reads outwards. On the right side, the
/// matching stone of a tile is its left stone and the open stone its right
/// one. On the left side it is the other way around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Side {
    id: SideId,
    placed: Vec<Tile>,
    open_stone: Option<u8>,
}

impl Side {
    pub fn new(id: SideId) -> Self {
        Self {
            id,
            placed: Vec::new(),
            open_stone: None,
        }
    }

    /// Rebuilds a side from tiles that are already oriented, e.g. from a
    /// saved game. The open stone is taken from the outermost tile, or
    /// `engine_stone` if the side is empty.
    pub fn restore(id: SideId, placed: Vec<Tile>, engine_stone: Option<u8>) -> Self {
        let open_stone = match placed.last() {
            Some(tile) => match id {
                SideId::Left => tile.left(),
                SideId::Right => tile.right(),
            },
            None => engine_stone,
        };
        Self {
            id,
            placed,
            open_stone,
        }
    }

    pub fn id(&self) -> SideId {
        self.id
    }

    pub fn open_stone(&self) -> Option<u8> {
        self.open_stone
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.placed
    }

    /// Sets the open stone, e.g. when the engine is placed.
    pub(crate) fn seed(&mut self, stone: Option<u8>) {
        if stone.is_some() {
            self.open_stone = stone;
        }
    }

    /// Attaches `tile` to this end, flipping it if needed.
    ///
    /// On error, the side is unchanged.
    pub fn add_tile(&mut self, tile: Tile) -> Result<(), IllegalPlacement> {
        let Tile::Stones { left, right } = tile else {
            return Err(IllegalPlacement::UndefinedTile);
        };
        let open_stone = self.open_stone.ok_or(IllegalPlacement::NoOpenStone)?;
        if left != open_stone && right != open_stone {
            return Err(IllegalPlacement::NoMatchingStone { tile, open_stone });
        }

        let oriented = match self.id {
            SideId::Right if right == open_stone => tile.flipped(),
            SideId::Left if left == open_stone => tile.flipped(),
            _ => tile,
        };
        self.open_stone = match self.id {
            SideId::Right => oriented.right(),
            SideId::Left => oriented.left(),
        };
        self.placed.push(oriented);
        Ok(())
    }
}
