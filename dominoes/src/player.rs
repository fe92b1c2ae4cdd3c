use crate::strategy::{advice, choose_heuristic_move};
use crate::{MoveRequest, PlayerId, SideId, Table, Tile};

/// Where a player's decisions come from.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Decider {
    /// Decisions are recorded from outside, one request per move.
    Human { input: Option<MoveRequest> },
    /// Decisions come from the heuristic in [`strategy`](crate::strategy).
    Computer,
}

/// The state of one player during a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    decider: Decider,
    hand: Vec<Tile>,
    /// Points won in this round. The cumulative totals are kept by
    /// [`Tournament::human_score`](crate::Tournament::human_score) and
    /// [`Tournament::computer_score`](crate::Tournament::computer_score).
    score: u32,
    passed: bool,
    tiles_drawn_this_turn: u32,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self::with_hand(id, Vec::new())
    }

    pub fn with_hand(id: PlayerId, hand: Vec<Tile>) -> Self {
        let decider = match id {
            PlayerId::Human => Decider::Human { input: None },
            PlayerId::Computer => Decider::Computer,
        };
        Self {
            id,
            decider,
            hand,
            score: 0,
            passed: false,
            tiles_drawn_this_turn: 0,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn side(&self) -> SideId {
        self.id.side()
    }

    pub(crate) fn hand(&self) -> &[Tile] {
        &self.hand
    }

    /// The hand as shells may show it: the human's own tiles, nothing of the
    /// computer's.
    pub fn hand_for_display(&self) -> &[Tile] {
        match self.decider {
            Decider::Human { .. } => &self.hand,
            Decider::Computer => &[],
        }
    }

    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    pub fn hand_value(&self) -> u32 {
        self.hand.iter().map(Tile::numeric_value).sum()
    }

    pub fn has_tile(&self, tile: Tile) -> bool {
        self.hand.contains(&tile)
    }

    /// Points won in this round only. See
    /// [`Tournament::human_score`](crate::Tournament::human_score) and
    /// [`Tournament::computer_score`](crate::Tournament::computer_score) for
    /// the cumulative totals.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn has_passed(&self) -> bool {
        self.passed
    }

    pub fn tiles_drawn_this_turn(&self) -> u32 {
        self.tiles_drawn_this_turn
    }

    /// Records the next move for a human player. Computer players decide on
    /// their own, so this returns `false` for them.
    pub fn set_input(&mut self, request: MoveRequest) -> bool {
        match &mut self.decider {
            Decider::Human { input } => {
                *input = Some(request);
                true
            }
            Decider::Computer => false,
        }
    }

    /// The move this player wants to make. A human's recorded input is used
    /// up by this.
    pub(crate) fn decide(
        &mut self,
        table: &Table,
        opponent_passed: bool,
        stock_empty: bool,
    ) -> Option<MoveRequest> {
        match &mut self.decider {
            Decider::Human { input } => input.take(),
            Decider::Computer => Some(choose_heuristic_move(
                &self.hand,
                table,
                self.id.side(),
                opponent_passed,
                stock_empty,
                self.tiles_drawn_this_turn,
            )),
        }
    }

    /// What the heuristic would do in this player's place.
    pub fn advice(&self, table: &Table, opponent_passed: bool, stock_empty: bool) -> String {
        advice(
            &self.hand,
            table,
            self.id.side(),
            opponent_passed,
            stock_empty,
            self.tiles_drawn_this_turn,
        )
    }

    pub(crate) fn add_to_hand(&mut self, tile: Tile) {
        if tile.is_defined() {
            self.hand.push(tile);
        }
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Tile {
        self.hand.remove(index)
    }

    /// Removes the first tile strictly equal to `tile`.
    pub(crate) fn remove_tile(&mut self, tile: Tile) -> bool {
        match self.hand.iter().position(|t| *t == tile) {
            Some(index) => {
                self.hand.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn add_points(&mut self, points: u32) {
        self.score += points;
    }

    pub(crate) fn set_passed(&mut self, passed: bool) {
        self.passed = passed;
    }

    pub(crate) fn count_draw(&mut self) {
        self.tiles_drawn_this_turn += 1;
    }

    pub(crate) fn end_turn(&mut self) {
        self.tiles_drawn_this_turn = 0;
    }
}
