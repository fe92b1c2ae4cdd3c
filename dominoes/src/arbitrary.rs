use quickcheck::{Arbitrary, Gen};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{Player, PlayerId, Round, SideId, Stock, Table, Tile, MAX_RANK};

impl Arbitrary for Tile {
    fn arbitrary(g: &mut Gen) -> Self {
        let left = u8::arbitrary(g) % (MAX_RANK + 1);
        let right = u8::arbitrary(g) % (MAX_RANK + 1);
        Tile::new(left, right)
    }
}

impl Arbitrary for SideId {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            SideId::Left
        } else {
            SideId::Right
        }
    }
}

impl Arbitrary for PlayerId {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            PlayerId::Human
        } else {
            PlayerId::Computer
        }
    }
}

/// All 28 tiles in random order.
fn shuffled_set(g: &mut Gen) -> Vec<Tile> {
    let mut rng = StdRng::seed_from_u64(u64::arbitrary(g));
    let mut tiles = Tile::full_set();
    tiles.shuffle(&mut rng);
    tiles
}

/// Places the engine and extends both sides with tiles taken from `pool`.
fn table_from_pool(g: &mut Gen, engine: Tile, pool: &mut Vec<Tile>) -> Table {
    let mut table = Table::new();
    table.place_engine(engine);
    let attempts = usize::arbitrary(g) % 12;
    for _ in 0..attempts {
        if pool.is_empty() {
            break;
        }
        let index = usize::arbitrary(g) % pool.len();
        if table.add_to_side(pool[index], SideId::arbitrary(g)).is_ok() {
            pool.swap_remove(index);
        }
    }
    table
}

fn take_hand(g: &mut Gen, pool: &mut Vec<Tile>) -> Vec<Tile> {
    let size = (1 + usize::arbitrary(g) % 8).min(pool.len());
    pool.split_off(pool.len() - size)
}

/// A table with the engine placed, and a hand of tiles not on it.
#[derive(Clone, Debug)]
pub struct TableInput {
    pub table: Table,
    pub hand: Vec<Tile>,
    pub my_side: SideId,
}

impl Arbitrary for TableInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut pool = shuffled_set(g);
        let engine = pool.pop().unwrap_or_default();
        let table = table_from_pool(g, engine, &mut pool);
        let hand = take_hand(g, &mut pool);
        TableInput {
            table,
            hand,
            my_side: SideId::arbitrary(g),
        }
    }
}

/// A round in progress. Both hands are nonempty and the round is not blocked.
#[derive(Clone, Debug)]
pub struct RoundInput {
    pub round: Round,
}

impl Arbitrary for RoundInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let rank = u8::arbitrary(g) % (MAX_RANK + 1);
        let engine = Tile::new(rank, rank);
        let mut pool: Vec<Tile> = shuffled_set(g)
            .into_iter()
            .filter(|tile| *tile != engine)
            .collect();
        let table = table_from_pool(g, engine, &mut pool);

        let mut human = Player::with_hand(PlayerId::Human, take_hand(g, &mut pool));
        let mut computer = Player::with_hand(PlayerId::Computer, take_hand(g, &mut pool));
        pool.truncate(usize::arbitrary(g) % (pool.len() + 1));
        let human_passed = bool::arbitrary(g);
        let computer_passed = bool::arbitrary(g) && !(human_passed && pool.is_empty());
        human.set_passed(human_passed);
        computer.set_passed(computer_passed);

        let round = Round::restore(
            u32::from(MAX_RANK - rank) + 1,
            Some(engine),
            human,
            computer,
            Stock::from_tiles(pool),
            table,
            PlayerId::arbitrary(g),
            0,
            0,
        );
        RoundInput { round }
    }
}
