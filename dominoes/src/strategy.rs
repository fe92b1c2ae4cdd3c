//! Move legality and the heuristic move selection shared by both players.
//!
//! The computer player decides with these functions, and the human player
//! gets advice from them.

use tracing::trace;

use crate::{MoveKind, MoveRequest, SideId, Table, Tile};

/// A tile from the hand and where to place it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileChoice {
    pub index: usize,
    pub side: SideId,
}

/// Whether `tile` may be placed anywhere on the table by the player owning
/// `my_side`.
pub fn is_placeable(tile: &Tile, table: &Table, my_side: SideId, opponent_passed: bool) -> bool {
    [SideId::Left, SideId::Right]
        .into_iter()
        .any(|side| is_placeable_on(tile, side, table, my_side, opponent_passed))
}

/// The side rule alone, ignoring stones: a player may always extend their
/// own side, the opponent's side only with a double or once the opponent has
/// passed.
pub fn side_allowed(tile: &Tile, side: SideId, my_side: SideId, opponent_passed: bool) -> bool {
    side == my_side || tile.is_double() || opponent_passed
}

/// Whether `tile` may go on `side` specifically.
pub fn is_placeable_on(
    tile: &Tile,
    side: SideId,
    table: &Table,
    my_side: SideId,
    opponent_passed: bool,
) -> bool {
    side_allowed(tile, side, my_side, opponent_passed) && tile.matches(table.open_stone(side))
}

pub fn can_place_any_tile(
    hand: &[Tile],
    table: &Table,
    my_side: SideId,
    opponent_passed: bool,
) -> bool {
    hand.iter()
        .any(|tile| is_placeable(tile, table, my_side, opponent_passed))
}

/// The first tile in hand order with the highest numeric value among those
/// having a stone equal to `open_stone`.
fn highest_valued_match(hand: &[Tile], open_stone: Option<u8>) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, tile) in hand.iter().enumerate() {
        if !tile.matches(open_stone) {
            continue;
        }
        let value = tile.numeric_value();
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

/// Picks a tile by priority:
///
/// 1. a double matching the opponent's open stone, to be placed there,
/// 2. the highest valued tile matching the player's own open stone,
/// 3. the highest valued tile matching the opponent's open stone.
///
/// Ties go to the tile that comes first in the hand. The third choice is
/// only legal once the opponent has passed; callers check
/// [`can_place_any_tile`] before acting on it.
pub fn choose_heuristic_tile(
    hand: &[Tile],
    table: &Table,
    opponent_passed: bool,
    my_side: SideId,
) -> Option<TileChoice> {
    let opponent_side = my_side.opponent();
    let opponent_open = table.open_stone(opponent_side);

    if let Some(index) = hand
        .iter()
        .position(|tile| tile.is_double() && tile.matches(opponent_open))
    {
        trace!(index, "Double for the opponent's side");
        return Some(TileChoice {
            index,
            side: opponent_side,
        });
    }

    if let Some(index) = highest_valued_match(hand, table.open_stone(my_side)) {
        return Some(TileChoice {
            index,
            side: my_side,
        });
    }

    trace!(opponent_passed, "Falling back to the opponent's side");
    highest_valued_match(hand, opponent_open).map(|index| TileChoice {
        index,
        side: opponent_side,
    })
}

/// Place if possible, otherwise draw once per turn while the stock lasts,
/// otherwise pass.
pub fn choose_heuristic_move_kind(
    hand: &[Tile],
    table: &Table,
    my_side: SideId,
    opponent_passed: bool,
    stock_empty: bool,
    tiles_drawn_this_turn: u32,
) -> MoveKind {
    if can_place_any_tile(hand, table, my_side, opponent_passed) {
        MoveKind::PlaceTile
    } else if tiles_drawn_this_turn == 0 && !stock_empty {
        MoveKind::DrawTile
    } else {
        MoveKind::Pass
    }
}

/// The complete heuristic decision for one move.
pub fn choose_heuristic_move(
    hand: &[Tile],
    table: &Table,
    my_side: SideId,
    opponent_passed: bool,
    stock_empty: bool,
    tiles_drawn_this_turn: u32,
) -> MoveRequest {
    match choose_heuristic_move_kind(
        hand,
        table,
        my_side,
        opponent_passed,
        stock_empty,
        tiles_drawn_this_turn,
    ) {
        MoveKind::PlaceTile => match choose_heuristic_tile(hand, table, opponent_passed, my_side) {
            Some(TileChoice { index, side }) => MoveRequest::place(index, side),
            // Unreachable while a tile is placeable
            None => MoveRequest::pass(),
        },
        MoveKind::DrawTile => MoveRequest::draw(),
        _ => MoveRequest::pass(),
    }
}

/// A sentence recommending the heuristic move, with its rationale.
pub fn advice(
    hand: &[Tile],
    table: &Table,
    my_side: SideId,
    opponent_passed: bool,
    stock_empty: bool,
    tiles_drawn_this_turn: u32,
) -> String {
    const NOTHING_TO_PLACE: &str = "because you don't have any tiles on your hand that you can legitimately place on either side";

    let request = choose_heuristic_move(
        hand,
        table,
        my_side,
        opponent_passed,
        stock_empty,
        tiles_drawn_this_turn,
    );
    match (request.kind, request.hand_tile_index, request.side) {
        (MoveKind::PlaceTile, Some(index), Some(side)) => format!(
            "You should place tile, {} on {} side to get rid of the highest valued tile in your hand",
            hand[index], side
        ),
        (MoveKind::DrawTile, ..) => {
            format!("You should draw additional tile from the stock {}", NOTHING_TO_PLACE)
        }
        _ => format!("You should pass {}", NOTHING_TO_PLACE),
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::TableInput;
    use crate::tile;

    fn table_with(left: u8, right: u8) -> Table {
        let mut table = Table::new();
        table.place_engine(Tile::new(left, right));
        table
    }

    quickcheck! {
        fn chosen_tile_is_placeable_when_placing(input: TableInput, opponent_passed: bool) -> bool {
            let TableInput { table, hand, my_side } = input;
            let request = choose_heuristic_move(&hand, &table, my_side, opponent_passed, false, 0);
            match (request.kind, request.hand_tile_index, request.side) {
                (MoveKind::PlaceTile, Some(index), Some(side)) => {
                    is_placeable_on(&hand[index], side, &table, my_side, opponent_passed)
                }
                (MoveKind::PlaceTile, ..) => false,
                _ => !can_place_any_tile(&hand, &table, my_side, opponent_passed),
            }
        }
    }

    #[test]
    fn doubles_play_on_either_side() {
        let table = table_with(3, 6);
        assert!(can_place_any_tile(&[tile!("6-6")], &table, SideId::Left, false));
        assert!(!can_place_any_tile(&[tile!("6-2")], &table, SideId::Left, false));
        assert!(can_place_any_tile(&[tile!("6-2")], &table, SideId::Right, false));
    }

    #[test]
    fn side_rule() {
        let (left, right) = (SideId::Left, SideId::Right);
        assert!(side_allowed(&tile!("6-2"), left, left, false));
        assert!(!side_allowed(&tile!("6-2"), right, left, false));
        assert!(side_allowed(&tile!("6-6"), right, left, false));
        assert!(side_allowed(&tile!("6-2"), right, left, true));
    }

    #[test]
    fn passed_opponent_opens_both_sides() {
        let table = table_with(3, 6);
        assert!(can_place_any_tile(&[tile!("6-2")], &table, SideId::Left, true));
        assert!(!can_place_any_tile(&[tile!("5-2")], &table, SideId::Left, true));
    }

    #[test]
    fn no_open_stone_matches_nothing() {
        let table = Table::new();
        assert!(!can_place_any_tile(&[tile!("0-0")], &table, SideId::Left, true));
        assert_eq!(choose_heuristic_tile(&[tile!("0-0")], &table, true, SideId::Left), None);
    }

    #[test]
    fn double_for_opponent_side_wins_over_own_side() {
        // own side (left) open 3, opponent side (right) open 6
        let table = table_with(3, 6);
        let hand = [tile!("3-5"), tile!("6-6")];
        assert_eq!(
            choose_heuristic_tile(&hand, &table, false, SideId::Left),
            Some(TileChoice {
                index: 1,
                side: SideId::Right
            })
        );
    }

    #[test]
    fn highest_value_on_own_side_first_found_on_ties() {
        let table = table_with(3, 6);
        let hand = [tile!("1-3"), tile!("3-4"), tile!("5-2"), tile!("4-3"), tile!("6-5")];
        assert_eq!(
            choose_heuristic_tile(&hand, &table, false, SideId::Left),
            Some(TileChoice {
                index: 1,
                side: SideId::Left
            })
        );
    }

    #[test]
    fn falls_back_to_opponent_side() {
        let table = table_with(3, 6);
        let hand = [tile!("6-1"), tile!("2-2"), tile!("5-6")];
        assert_eq!(
            choose_heuristic_tile(&hand, &table, true, SideId::Left),
            Some(TileChoice {
                index: 2,
                side: SideId::Right
            })
        );
    }

    #[test]
    fn move_kind_progression() {
        let table = table_with(3, 6);
        let hand = [tile!("1-1")];
        assert_eq!(
            choose_heuristic_move_kind(&hand, &table, SideId::Left, false, false, 0),
            MoveKind::DrawTile
        );
        assert_eq!(
            choose_heuristic_move_kind(&hand, &table, SideId::Left, false, false, 1),
            MoveKind::Pass
        );
        assert_eq!(
            choose_heuristic_move_kind(&hand, &table, SideId::Left, false, true, 0),
            MoveKind::Pass
        );
        assert_eq!(
            choose_heuristic_move_kind(&[tile!("3-1")], &table, SideId::Left, false, true, 1),
            MoveKind::PlaceTile
        );
    }

    #[test]
    fn advice_names_tile_and_side() {
        let table = table_with(3, 6);
        assert_eq!(
            advice(&[tile!("3-5")], &table, SideId::Left, false, false, 0),
            "You should place tile, 3-5 on Left side to get rid of the highest valued tile in your hand"
        );
        assert!(advice(&[tile!("1-1")], &table, SideId::Left, false, false, 0)
            .starts_with("You should draw"));
        assert!(advice(&[tile!("1-1")], &table, SideId::Left, false, true, 0)
            .starts_with("You should pass"));
    }
}
