use std::path::Path;

use anyhow::Context;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::{
    engine_rank, Player, PlayerId, PlayerRecord, Round, RoundPhase, Side, SideId, Snapshot,
    Stock, Table, Tile,
};

/// The default score that ends a tournament.
pub const DEFAULT_MAX_SCORE: u32 = 200;

/// What [`Tournament::start_new_round`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextRound {
    Started,
    /// A player reached the maximum score. No further rounds are played.
    TournamentOver,
    /// The current round is still being played.
    RoundNotOver,
}

/// A series of rounds that ends once a player reaches `max_score`.
#[derive(Clone, Debug)]
pub struct Tournament {
    max_score: u32,
    human_score: u32,
    computer_score: u32,
    round: Round,
    result: Option<&'static str>,
}

impl Tournament {
    pub fn new(max_score: u32, rng: &mut StdRng) -> Self {
        Self {
            max_score,
            human_score: 0,
            computer_score: 0,
            round: Round::new(1, 0, 0, rng),
            result: None,
        }
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn human_score(&self) -> u32 {
        self.human_score
    }

    pub fn computer_score(&self) -> u32 {
        self.computer_score
    }

    pub fn current_round(&self) -> &Round {
        &self.round
    }

    pub fn current_round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Who won the tournament, once it is over.
    pub fn result(&self) -> Option<&'static str> {
        self.result
    }

    /// Adds the points of the finished round to the tournament scores, then
    /// either ends the tournament or starts the next round.
    pub fn start_new_round(&mut self, rng: &mut StdRng) -> NextRound {
        if self.result.is_some() {
            return NextRound::TournamentOver;
        }
        if !self.round.end_round() {
            return NextRound::RoundNotOver;
        }

        self.human_score += self.round.human().score();
        self.computer_score += self.round.computer().score();
        info!(
            round = self.round.number(),
            human = self.human_score,
            computer = self.computer_score,
            "Tournament scores"
        );

        if self.human_score >= self.max_score || self.computer_score >= self.max_score {
            let result = if self.human_score > self.computer_score {
                "The human player won the tournament"
            } else if self.computer_score > self.human_score {
                "The computer player won the tournament"
            } else {
                "The tournament ended in a tie"
            };
            info!(result, "Tournament over");
            self.result = Some(result);
            return NextRound::TournamentOver;
        }

        self.round = Round::new(
            self.round.number() + 1,
            self.human_score,
            self.computer_score,
            rng,
        );
        NextRound::Started
    }

    /// The state of the tournament as it would be saved.
    ///
    /// The scores are those at the start of the current round. Points of a
    /// finished round are recomputed from the hands when loading.
    pub fn snapshot(&self) -> Snapshot {
        let round = &self.round;
        let engine_placed = round.phase() != RoundPhase::AwaitingEngine;
        let table = round.table();
        Snapshot {
            tournament_score: self.max_score,
            round_number: round.number(),
            computer: PlayerRecord {
                hand: round.computer().hand().to_vec(),
                score: self.computer_score,
            },
            human: PlayerRecord {
                hand: round.human().hand().to_vec(),
                score: self.human_score,
            },
            engine: Some(round.engine()),
            engine_placed,
            left: table.side(SideId::Left).tiles().to_vec(),
            right: table.side(SideId::Right).tiles().to_vec(),
            stock: round.stock().remaining_tiles().to_vec(),
            previous_player_passed: engine_placed && round.opponent_passed(),
            next_player: engine_placed.then_some(round.current_player()),
        }
    }

    /// Resumes a saved tournament.
    ///
    /// A round saved before its engine was placed is set up again with the
    /// saved hands and stock. If neither can supply the engine, the round
    /// starts over with a freshly shuffled stock.
    pub fn from_snapshot(snapshot: Snapshot, rng: &mut StdRng) -> Self {
        let Snapshot {
            tournament_score,
            round_number,
            computer,
            human,
            engine,
            engine_placed,
            left,
            right,
            stock,
            previous_player_passed,
            next_player,
        } = snapshot;

        let rank = engine_rank(round_number);
        let round_engine = Tile::new(rank, rank);
        let engine_reachable = human.hand.contains(&round_engine)
            || computer.hand.contains(&round_engine)
            || stock.contains(&round_engine);
        let placed_engine = engine.filter(|_| engine_placed);
        let round = match placed_engine {
            None if !engine_reachable => {
                warn!(
                    round = round_number,
                    engine = %round_engine,
                    "Saved round cannot supply its engine, dealing again"
                );
                Round::new(round_number, human.score, computer.score, rng)
            }
            None => Round::restore(
                round_number,
                None,
                Player::with_hand(PlayerId::Human, human.hand),
                Player::with_hand(PlayerId::Computer, computer.hand),
                Stock::from_tiles(stock),
                Table::new(),
                PlayerId::Human,
                human.score,
                computer.score,
            ),
            Some(engine) => {
                let next_player = next_player.unwrap_or(PlayerId::Human);
                let mut human_player = Player::with_hand(PlayerId::Human, human.hand);
                let mut computer_player = Player::with_hand(PlayerId::Computer, computer.hand);
                // Only the pass of the player who moved last is saved
                match next_player.opponent() {
                    PlayerId::Human => human_player.set_passed(previous_player_passed),
                    PlayerId::Computer => computer_player.set_passed(previous_player_passed),
                }
                let table = Table::from_sides(
                    Side::restore(SideId::Left, left, engine.left()),
                    Side::restore(SideId::Right, right, engine.right()),
                );
                Round::restore(
                    round_number,
                    Some(engine),
                    human_player,
                    computer_player,
                    Stock::from_tiles(stock),
                    table,
                    next_player,
                    human.score,
                    computer.score,
                )
            }
        };
        info!(round = round_number, phase = ?round.phase(), "Resumed tournament");

        Self {
            max_score: tournament_score,
            human_score: human.score,
            computer_score: computer.score,
            round,
            result: None,
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.snapshot().to_string())
            .with_context(|| format!("Could not save the game to '{}'", path.display()))?;
        info!(path = %path.display(), "Saved game");
        Ok(())
    }

    pub fn load(path: &Path, rng: &mut StdRng) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read '{}'", path.display()))?;
        let snapshot = Snapshot::parse(&text)?;
        Ok(Self::from_snapshot(snapshot, rng))
    }
}
