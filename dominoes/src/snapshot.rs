//! The text format of a saved game.
//!
//! ```text
//! Tournament Score: 200
//! Round No: 1
//!
//! Computer:
//!   Hand: 4-1 0-0
//!   Score: 0
//!
//! Human:
//!   Hand: 5-5 2-3
//!   Score: 0
//!
//! Engine: 6-6
//!
//! Layout:
//!   L 3-2 2-6 6-6 6-1 R
//!
//! Stock:
//!  1-2 3-4
//!
//! Previous Player Passed: No
//!
//! Next Player: Human
//! ```
//!
//! Records are recognized by their label anywhere in a line. The left side of
//! the layout is written outermost tile first, so it is reversed when read.

use std::iter::Peekable;
use std::str::Lines;

use tracing::warn;

use crate::visualization::chain_line;
use crate::{PlayerId, SnapshotError, Tile};

const TOURNAMENT_SCORE: &str = "Tournament Score";
const ROUND_NO: &str = "Round No";
const COMPUTER: &str = "Computer:";
const HUMAN: &str = "Human:";
const ENGINE: &str = "Engine";
const LAYOUT: &str = "Layout";
const STOCK: &str = "Stock";
const PREVIOUS_PLAYER_PASSED: &str = "Previous Player";
const NEXT_PLAYER: &str = "Next Player";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    pub hand: Vec<Tile>,
    /// The tournament score.
    pub score: u32,
}

/// Everything needed to resume a tournament in the middle of a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// The score that ends the tournament.
    pub tournament_score: u32,
    pub round_number: u32,
    pub computer: PlayerRecord,
    pub human: PlayerRecord,
    /// The engine of this round, if known.
    pub engine: Option<Tile>,
    /// Whether the engine is on the table.
    pub engine_placed: bool,
    /// The left side in play order, starting next to the engine.
    pub left: Vec<Tile>,
    /// The right side in play order, starting next to the engine.
    pub right: Vec<Tile>,
    pub stock: Vec<Tile>,
    /// Whether the opponent of the next player passed.
    pub previous_player_passed: bool,
    pub next_player: Option<PlayerId>,
}

fn write_tiles(f: &mut std::fmt::Formatter<'_>, tiles: &[Tile]) -> std::fmt::Result {
    for tile in tiles {
        write!(f, " {}", tile)?;
    }
    Ok(())
}

fn write_player(
    f: &mut std::fmt::Formatter<'_>,
    name: PlayerId,
    record: &PlayerRecord,
) -> std::fmt::Result {
    write!(f, "\n{}:\n  Hand:", name)?;
    write_tiles(f, &record.hand)?;
    writeln!(f, "\n  Score: {}", record.score)
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {}", TOURNAMENT_SCORE, self.tournament_score)?;
        writeln!(f, "{}: {}", ROUND_NO, self.round_number)?;
        write_player(f, PlayerId::Computer, &self.computer)?;
        write_player(f, PlayerId::Human, &self.human)?;
        match self.engine {
            Some(engine) => writeln!(f, "\n{}: {}", ENGINE, engine)?,
            None => writeln!(f, "\n{}:", ENGINE)?,
        }
        let placed_engine = self.engine.filter(|_| self.engine_placed);
        writeln!(
            f,
            "\n{}:\n  {}",
            LAYOUT,
            chain_line(&self.left, placed_engine, &self.right)
        )?;
        write!(f, "\n{}:\n", STOCK)?;
        write_tiles(f, &self.stock)?;
        writeln!(f)?;
        let passed = if self.previous_player_passed { "Yes" } else { "No" };
        writeln!(f, "\nPrevious Player Passed: {}", passed)?;
        match self.next_player {
            Some(player) => write!(f, "\n{}: {}", NEXT_PLAYER, player),
            None => write!(f, "\n{}:", NEXT_PLAYER),
        }
    }
}

/// The text after the first colon, trimmed.
fn after_colon(line: &str) -> &str {
    line.split_once(':').map_or("", |(_, rest)| rest).trim()
}

fn parse_number(line: &str, label: &'static str) -> Result<u32, SnapshotError> {
    let text = after_colon(line);
    text.parse().map_err(|_| SnapshotError::InvalidNumber {
        label,
        text: String::from(text),
    })
}

/// Parses whitespace-separated tiles. `L` and `R` markers, even when glued
/// to a tile, are skipped.
fn parse_tiles(text: &str) -> Result<Vec<Tile>, SnapshotError> {
    text.split_whitespace()
        .map(|token| token.trim_start_matches('L').trim_end_matches('R'))
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse().map_err(|err| SnapshotError::InvalidTile {
                text: String::from(token),
                err,
            })
        })
        .collect()
}

fn next_non_blank<'a>(lines: &mut Peekable<Lines<'a>>) -> Option<&'a str> {
    lines.find(|line| !line.trim().is_empty())
}

/// The line following a label line, unless it is another record or missing.
fn take_content_line<'a>(lines: &mut Peekable<Lines<'a>>) -> &'a str {
    lines.next_if(|line| !line.contains(':')).unwrap_or("")
}

fn parse_player(
    lines: &mut Peekable<Lines<'_>>,
    label: &'static str,
) -> Result<PlayerRecord, SnapshotError> {
    let hand_line = next_non_blank(lines)
        .filter(|line| line.contains("Hand"))
        .ok_or(SnapshotError::TruncatedPlayer { label })?;
    let score_line = next_non_blank(lines)
        .filter(|line| line.contains("Score"))
        .ok_or(SnapshotError::TruncatedPlayer { label })?;
    Ok(PlayerRecord {
        hand: parse_tiles(after_colon(hand_line))?,
        score: parse_number(score_line, label)?,
    })
}

fn parse_next_player(text: &str) -> Result<PlayerId, SnapshotError> {
    match text.to_ascii_lowercase().as_str() {
        "human" => Ok(PlayerId::Human),
        "computer" => Ok(PlayerId::Computer),
        _ => Err(SnapshotError::UnknownNextPlayer {
            text: String::from(text),
        }),
    }
}

impl Snapshot {
    pub fn parse(text: &str) -> Result<Self, SnapshotError> {
        Self::parse_records(text).map_err(|err| {
            warn!("Could not read saved game: {}", err);
            err
        })
    }

    fn parse_records(text: &str) -> Result<Self, SnapshotError> {
        let mut tournament_score = None;
        let mut round_number = None;
        let mut computer = None;
        let mut human = None;
        let mut engine = None;
        let mut layout = Vec::new();
        let mut stock = Vec::new();
        let mut previous_player_passed = false;
        let mut next_player_text = None;

        let mut lines = text.lines().peekable();
        while let Some(line) = lines.next() {
            if line.contains(TOURNAMENT_SCORE) {
                tournament_score = Some(parse_number(line, TOURNAMENT_SCORE)?);
            } else if line.contains(ROUND_NO) {
                round_number = Some(parse_number(line, ROUND_NO)?);
            } else if line.contains(PREVIOUS_PLAYER_PASSED) {
                previous_player_passed = after_colon(line).contains("Yes");
            } else if line.contains(NEXT_PLAYER) {
                next_player_text = Some(after_colon(line));
            } else if line.contains(COMPUTER) {
                computer = Some(parse_player(&mut lines, COMPUTER)?);
            } else if line.contains(HUMAN) {
                human = Some(parse_player(&mut lines, HUMAN)?);
            } else if line.contains(ENGINE) {
                let text = after_colon(line);
                if !text.is_empty() {
                    engine = Some(text.parse().map_err(|err| SnapshotError::InvalidTile {
                        text: String::from(text),
                        err,
                    })?);
                }
            } else if line.contains(LAYOUT) {
                layout = parse_tiles(take_content_line(&mut lines))?;
            } else if line.contains(STOCK) {
                stock = parse_tiles(take_content_line(&mut lines))?;
            }
        }

        let tournament_score =
            tournament_score.ok_or(SnapshotError::MissingRecord { label: TOURNAMENT_SCORE })?;
        let round_number = round_number.ok_or(SnapshotError::MissingRecord { label: ROUND_NO })?;
        let computer = computer.ok_or(SnapshotError::MissingRecord { label: COMPUTER })?;
        let human = human.ok_or(SnapshotError::MissingRecord { label: HUMAN })?;

        let engine_position = engine.and_then(|engine| layout.iter().position(|t| *t == engine));
        let (engine_placed, left, right) = match engine_position {
            Some(position) => {
                let mut left = layout[..position].to_vec();
                left.reverse();
                (true, left, layout[position + 1..].to_vec())
            }
            None => {
                if !layout.is_empty() {
                    let dropped: Vec<String> = layout.iter().map(Tile::to_string).collect();
                    warn!(
                        dropped = dropped.join(" "),
                        "No engine in the layout, the round waits for its engine again"
                    );
                }
                (false, Vec::new(), Vec::new())
            }
        };

        let next_player = match next_player_text {
            Some(text) if !text.is_empty() => Some(parse_next_player(text)?),
            _ if engine_placed => {
                return Err(SnapshotError::UnknownNextPlayer {
                    text: String::new(),
                })
            }
            _ => None,
        };

        Ok(Snapshot {
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
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile;

    const SAVED_GAME: &str = "Tournament Score: 200
Round No: 1

Computer:
  Hand: 4-1 0-0
  Score: 12

Human:
  Hand: 5-5 2-3
  Score: 30

Engine: 6-6

Layout:
  L 3-2 2-6 6-6 6-1 R

Stock:
 1-2 3-4

Previous Player Passed: Yes

Next Player: Human";

    fn sample() -> Snapshot {
        Snapshot {
            tournament_score: 200,
            round_number: 1,
            computer: PlayerRecord {
                hand: vec![tile!("4-1"), tile!("0-0")],
                score: 12,
            },
            human: PlayerRecord {
                hand: vec![tile!("5-5"), tile!("2-3")],
                score: 30,
            },
            engine: Some(tile!("6-6")),
            engine_placed: true,
            left: vec![tile!("2-6"), tile!("3-2")],
            right: vec![tile!("6-1")],
            stock: vec![tile!("1-2"), tile!("3-4")],
            previous_player_passed: true,
            next_player: Some(PlayerId::Human),
        }
    }

    #[test]
    fn writes_the_documented_format() {
        assert_eq!(sample().to_string(), SAVED_GAME);
    }

    #[test]
    fn reads_the_documented_format() {
        assert_eq!(Snapshot::parse(SAVED_GAME), Ok(sample()));
    }

    #[test]
    fn tolerates_glued_markers_and_spacing() {
        let text = SAVED_GAME
            .replace("  L 3-2", "L3-2")
            .replace("6-1 R", "6-1R")
            .replace("Round No: 1", "   Round No:   1  ");
        assert_eq!(Snapshot::parse(&text), Ok(sample()));
    }

    #[test]
    fn engine_missing_from_layout_awaits_engine() {
        let text = SAVED_GAME
            .replace("  L 3-2 2-6 6-6 6-1 R", "  L R")
            .replace("Next Player: Human", "Next Player:");
        let snapshot = Snapshot::parse(&text).unwrap();
        assert!(!snapshot.engine_placed);
        assert!(snapshot.left.is_empty() && snapshot.right.is_empty());
        assert_eq!(snapshot.next_player, None);
    }

    #[test]
    fn missing_engine_record_awaits_engine() {
        let text = SAVED_GAME.replace("Engine: 6-6\n", "");
        let snapshot = Snapshot::parse(&text).unwrap();
        assert_eq!(snapshot.engine, None);
        assert!(!snapshot.engine_placed);
        assert!(snapshot.left.is_empty() && snapshot.right.is_empty());
        assert_eq!(snapshot.human, sample().human);
    }

    #[test]
    fn engine_absent_from_layout_awaits_engine() {
        let text = SAVED_GAME.replace("2-6 6-6 6-1", "2-6 6-1");
        let snapshot = Snapshot::parse(&text).unwrap();
        assert_eq!(snapshot.engine, Some(tile!("6-6")));
        assert!(!snapshot.engine_placed);
        assert!(snapshot.left.is_empty() && snapshot.right.is_empty());
        assert_eq!(snapshot.stock, sample().stock);
    }

    #[test]
    fn empty_stock_line() {
        let text = SAVED_GAME.replace(" 1-2 3-4\n", "\n");
        assert_eq!(Snapshot::parse(&text).unwrap().stock, vec![]);
    }

    #[test]
    fn malformed_files_fail() {
        assert_eq!(
            Snapshot::parse(&SAVED_GAME.replace("Round No: 1", "")),
            Err(SnapshotError::MissingRecord { label: ROUND_NO })
        );
        assert_eq!(
            Snapshot::parse(&SAVED_GAME.replace("Score: 12", "Score: twelve")),
            Err(SnapshotError::InvalidNumber {
                label: COMPUTER,
                text: String::from("twelve")
            })
        );
        assert!(matches!(
            Snapshot::parse(&SAVED_GAME.replace("4-1", "4-9")),
            Err(SnapshotError::InvalidTile { .. })
        ));
        assert_eq!(
            Snapshot::parse(&SAVED_GAME.replace("Next Player: Human", "Next Player: Nobody")),
            Err(SnapshotError::UnknownNextPlayer {
                text: String::from("Nobody")
            })
        );
        assert_eq!(
            Snapshot::parse("Tournament Score: 10\nRound No: 2\nComputer:\n"),
            Err(SnapshotError::TruncatedPlayer { label: COMPUTER })
        );
    }
}
