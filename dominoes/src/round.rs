use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::strategy::{can_place_any_tile, side_allowed};
use crate::{
    visualize_hand, visualize_table, IllegalMove, MoveKind, MoveRequest, Player, PlayerId,
    SideId, Stock, Table, Tile, MAX_RANK,
};

/// Tiles each player is dealt at the start of a round.
pub const INITIAL_HAND_SIZE: usize = 8;

/// The rank of the double that opens round number `round_number`.
///
/// Counting from round 1, the engine goes 6-6, 5-5, ..., 1-1, then 0-0 for
/// every multiple of `MAX_RANK + 1`, and starts over at 6-6.
pub fn engine_rank(round_number: u32) -> u8 {
    // The remainder is at most MAX_RANK, so it fits
    let remainder = (round_number % (u32::from(MAX_RANK) + 1)) as u8;
    if remainder == 0 {
        0
    } else {
        MAX_RANK - remainder + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    /// Hands are being dealt until someone holds the engine.
    AwaitingEngine,
    InProgress,
    /// Terminal. The round has been scored.
    RoundOver,
}

/// Summarizes a move that was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Placed { tile: Tile, side: SideId },
    Drew,
    Passed,
    /// The result of a [`MoveKind::GameState`] request, rendered for display.
    Inspected { state: String },
}

/// One hand of play, from dealing and placing the engine to scoring.
#[derive(Clone, Debug)]
pub struct Round {
    number: u32,
    engine: Tile,
    human: Player,
    computer: Player,
    stock: Stock,
    table: Table,
    phase: RoundPhase,
    turn: PlayerId,
    winner: Option<PlayerId>,
    /// Tournament scores at the start of this round.
    human_tournament_score: u32,
    computer_tournament_score: u32,
    move_summary: String,
    last_request: Option<MoveRequest>,
}

impl Round {
    pub fn new(
        number: u32,
        human_tournament_score: u32,
        computer_tournament_score: u32,
        rng: &mut StdRng,
    ) -> Self {
        let rank = engine_rank(number);
        Self {
            number,
            engine: Tile::new(rank, rank),
            human: Player::new(PlayerId::Human),
            computer: Player::new(PlayerId::Computer),
            stock: Stock::new(rng),
            table: Table::new(),
            phase: RoundPhase::AwaitingEngine,
            turn: PlayerId::Human,
            winner: None,
            human_tournament_score,
            computer_tournament_score,
            move_summary: String::new(),
            last_request: None,
        }
    }

    /// Reassembles a round from saved parts.
    ///
    /// With `placed_engine`, play continues with `next_player`. Without it,
    /// the round goes back to waiting for the engine of round `number`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore(
        number: u32,
        placed_engine: Option<Tile>,
        human: Player,
        computer: Player,
        stock: Stock,
        table: Table,
        next_player: PlayerId,
        human_tournament_score: u32,
        computer_tournament_score: u32,
    ) -> Self {
        let (engine, phase) = match placed_engine {
            Some(engine) => (engine, RoundPhase::InProgress),
            None => {
                let rank = engine_rank(number);
                (Tile::new(rank, rank), RoundPhase::AwaitingEngine)
            }
        };
        let mut round = Self {
            number,
            engine,
            human,
            computer,
            stock,
            table,
            phase,
            turn: next_player,
            winner: None,
            human_tournament_score,
            computer_tournament_score,
            move_summary: String::new(),
            last_request: None,
        };
        // A saved game may already be decided
        round.end_round();
        round
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn engine(&self) -> Tile {
        self.engine
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::RoundOver
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    pub fn human(&self) -> &Player {
        &self.human
    }

    pub fn computer(&self) -> &Player {
        &self.computer
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::Human => &self.human,
            PlayerId::Computer => &self.computer,
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        match id {
            PlayerId::Human => &mut self.human,
            PlayerId::Computer => &mut self.computer,
        }
    }

    /// Whose turn it is.
    pub fn current_player(&self) -> PlayerId {
        self.turn
    }

    /// Whether the player about to move may use both sides because their
    /// opponent passed.
    pub fn opponent_passed(&self) -> bool {
        self.player(self.turn.opponent()).has_passed()
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn human_tournament_score(&self) -> u32 {
        self.human_tournament_score
    }

    pub fn computer_tournament_score(&self) -> u32 {
        self.computer_tournament_score
    }

    /// A one-line description of the last move attempt.
    pub fn move_summary(&self) -> &str {
        &self.move_summary
    }

    /// The request behind the last move attempt, from either player.
    pub fn last_request(&self) -> Option<MoveRequest> {
        self.last_request
    }

    /// Deals the initial hands, computer first.
    pub fn deal(&mut self) {
        for player in [&mut self.computer, &mut self.human] {
            for _ in 0..INITIAL_HAND_SIZE {
                if let Some(tile) = self.stock.draw_next() {
                    player.add_to_hand(tile);
                }
            }
        }
        debug!(round = self.number, engine = %self.engine, "Dealt hands");
    }

    pub fn a_player_has_engine(&self) -> bool {
        self.human.has_tile(self.engine) || self.computer.has_tile(self.engine)
    }

    /// Gives one more tile to each player, human first.
    pub fn draw_a_tile_each(&mut self) -> Result<(), IllegalMove> {
        if self.stock.is_empty() {
            return Err(IllegalMove::StockEmpty);
        }
        for player in [&mut self.human, &mut self.computer] {
            if let Some(tile) = self.stock.draw_next() {
                player.add_to_hand(tile);
            }
        }
        Ok(())
    }

    /// Moves the engine from its holder's hand onto the table. The other
    /// player moves first.
    pub fn place_engine(&mut self) -> Result<PlayerId, IllegalMove> {
        if self.phase != RoundPhase::AwaitingEngine {
            return Err(IllegalMove::RoundNotInProgress);
        }
        let holder = if self.human.has_tile(self.engine) {
            PlayerId::Human
        } else if self.computer.has_tile(self.engine) {
            PlayerId::Computer
        } else {
            return Err(IllegalMove::NobodyHoldsEngine {
                engine: self.engine,
            });
        };
        let engine = self.engine;
        self.player_mut(holder).remove_tile(engine);
        self.table.place_engine(engine);
        self.turn = holder.opponent();
        self.phase = RoundPhase::InProgress;
        info!(round = self.number, engine = %engine, %holder, "Engine placed");
        Ok(holder)
    }

    /// Deals (unless the hands were restored), hands out extra tiles until
    /// someone holds the engine and places it.
    pub fn prepare(&mut self) -> Result<PlayerId, IllegalMove> {
        if self.phase != RoundPhase::AwaitingEngine {
            return Err(IllegalMove::RoundNotInProgress);
        }
        if self.human.hand_len() == 0 && self.computer.hand_len() == 0 {
            self.deal();
        }
        while !self.a_player_has_engine() {
            self.draw_a_tile_each()
                .map_err(|_| IllegalMove::NobodyHoldsEngine {
                    engine: self.engine,
                })?;
        }
        self.place_engine()
    }

    /// Records the human's next move. It is used the next time
    /// [`make_move`](Self::make_move) runs on the human's turn.
    pub fn set_human_input(&mut self, request: MoveRequest) {
        self.human.set_input(request);
    }

    /// Asks the current player for a move, verifies it and applies it.
    ///
    /// A rejected move changes nothing but the move summary. Afterwards the
    /// round is scored if it is over.
    pub fn make_move(&mut self) -> Result<MoveOutcome, IllegalMove> {
        self.move_summary.clear();
        self.last_request = None;
        if self.phase != RoundPhase::InProgress {
            return Err(IllegalMove::RoundNotInProgress);
        }
        let mover = self.turn;
        let opponent_passed = self.opponent_passed();
        let stock_empty = self.stock.is_empty();
        let player = match mover {
            PlayerId::Human => &mut self.human,
            PlayerId::Computer => &mut self.computer,
        };
        let request = player
            .decide(&self.table, opponent_passed, stock_empty)
            .ok_or(IllegalMove::NoMoveChosen)?;
        self.last_request = Some(request);

        let outcome = self.verify_move(mover, request);
        match &outcome {
            Ok(outcome) => debug!(player = %mover, ?outcome, "Move applied"),
            Err(err) => debug!(player = %mover, %err, "Move rejected"),
        }
        self.end_round();
        outcome
    }

    fn verify_move(
        &mut self,
        mover: PlayerId,
        request: MoveRequest,
    ) -> Result<MoveOutcome, IllegalMove> {
        self.move_summary = format!("The {} chose to ", mover);
        match request.kind {
            MoveKind::PlaceTile => {
                let outcome = self.place_tile(mover, request)?;
                self.turn = mover.opponent();
                Ok(outcome)
            }
            MoveKind::Pass => {
                self.move_summary += "pass.";
                self.pass(mover)?;
                self.turn = mover.opponent();
                Ok(MoveOutcome::Passed)
            }
            MoveKind::DrawTile => {
                self.move_summary += "draw additional tile from the stock";
                self.draw_tile(mover)?;
                Ok(MoveOutcome::Drew)
            }
            MoveKind::GameState => {
                self.move_summary += "look at the game state";
                Ok(MoveOutcome::Inspected {
                    state: self.game_state(),
                })
            }
        }
    }

    fn place_tile(
        &mut self,
        mover: PlayerId,
        request: MoveRequest,
    ) -> Result<MoveOutcome, IllegalMove> {
        let opponent_passed = self.opponent_passed();
        let index = request.hand_tile_index.ok_or(IllegalMove::NoTileChosen)?;
        let hand = self.player(mover).hand();
        let tile = *hand.get(index).ok_or(IllegalMove::TileIndexOutOfBounds {
            index,
            hand_size: hand.len(),
        })?;
        self.move_summary += &format!("place the tile, {}", tile);

        let side = request.side.ok_or(IllegalMove::NoSideChosen)?;
        if !side_allowed(&tile, side, mover.side(), opponent_passed) {
            return Err(IllegalMove::NonDoubleOnOpponentSide { tile, side });
        }
        self.move_summary += &format!(" on the {} side", side);

        self.table
            .add_to_side(tile, side)
            .map_err(|err| IllegalMove::IllegalPlacement { tile, side, err })?;
        let player = self.player_mut(mover);
        player.set_passed(false);
        player.remove_at(index);
        player.end_turn();
        Ok(MoveOutcome::Placed { tile, side })
    }

    fn pass(&mut self, mover: PlayerId) -> Result<(), IllegalMove> {
        let table = &self.table;
        let (player, opponent) = match mover {
            PlayerId::Human => (&mut self.human, &self.computer),
            PlayerId::Computer => (&mut self.computer, &self.human),
        };
        if can_place_any_tile(player.hand(), table, mover.side(), opponent.has_passed()) {
            return Err(IllegalMove::PassedDespiteLegalPlacement);
        }
        player.set_passed(true);
        player.end_turn();
        Ok(())
    }

    fn draw_tile(&mut self, mover: PlayerId) -> Result<(), IllegalMove> {
        let table = &self.table;
        let (player, opponent) = match mover {
            PlayerId::Human => (&mut self.human, &self.computer),
            PlayerId::Computer => (&mut self.computer, &self.human),
        };
        if can_place_any_tile(player.hand(), table, mover.side(), opponent.has_passed()) {
            return Err(IllegalMove::DrewDespiteLegalPlacement);
        }
        let tile = self.stock.draw_next().ok_or(IllegalMove::StockEmpty)?;
        player.add_to_hand(tile);
        player.count_draw();
        Ok(())
    }

    fn round_over(&self) -> bool {
        if self.phase != RoundPhase::InProgress {
            return false;
        }
        if self.human.hand_len() == 0 || self.computer.hand_len() == 0 {
            return true;
        }
        self.stock.is_empty() && self.human.has_passed() && self.computer.has_passed()
    }

    /// Scores the round if it is over, and reports whether it is.
    ///
    /// Scoring happens only once, calling this again has no further effect.
    pub fn end_round(&mut self) -> bool {
        if self.phase == RoundPhase::RoundOver {
            return true;
        }
        if !self.round_over() {
            return false;
        }

        let human_value = self.human.hand_value();
        let computer_value = self.computer.hand_value();
        self.winner = if self.human.hand_len() == 0 {
            Some(PlayerId::Human)
        } else if self.computer.hand_len() == 0 {
            Some(PlayerId::Computer)
        } else if human_value < computer_value {
            Some(PlayerId::Human)
        } else if computer_value < human_value {
            Some(PlayerId::Computer)
        } else {
            None
        };
        match self.winner {
            Some(PlayerId::Human) => self.human.add_points(computer_value),
            Some(PlayerId::Computer) => self.computer.add_points(human_value),
            None => {}
        }
        self.phase = RoundPhase::RoundOver;
        info!(
            round = self.number,
            winner = self.winner_text(),
            human_points = self.human.score(),
            computer_points = self.computer.score(),
            "Round over"
        );
        true
    }

    /// Who won the round, for display. Empty while the round is running.
    pub fn winner_text(&self) -> &'static str {
        match (self.phase, self.winner) {
            (RoundPhase::RoundOver, Some(PlayerId::Human)) => "Human player",
            (RoundPhase::RoundOver, Some(PlayerId::Computer)) => "Computer player",
            (RoundPhase::RoundOver, None) => "The round ended in a tie",
            _ => "",
        }
    }

    /// Advice for the human player, if it is their turn.
    pub fn help(&self) -> Option<String> {
        if self.phase != RoundPhase::InProgress || self.turn != PlayerId::Human {
            return None;
        }
        Some(self.human.advice(
            &self.table,
            self.computer.has_passed(),
            self.stock.is_empty(),
        ))
    }

    /// Everything the human may see, rendered for display.
    pub fn game_state(&self) -> String {
        let placed_engine = (self.phase != RoundPhase::AwaitingEngine).then_some(self.engine);
        format!(
            "Round {} (engine {}), {} to move\n{}\nYour hand:\n{}\nComputer holds {} tiles, {} left in the stock\nTournament scores: human {}, computer {}",
            self.number,
            self.engine,
            self.turn,
            visualize_table(&self.table, placed_engine),
            visualize_hand(self.human.hand_for_display()),
            self.computer.hand_len(),
            self.stock.len(),
            self.human_tournament_score,
            self.computer_tournament_score,
        )
    }
}
