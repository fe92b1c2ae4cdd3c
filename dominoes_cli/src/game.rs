use anyhow::bail;
use dominoes::{MoveOutcome, NextRound, PlayerId, RoundPhase, Tournament};
use tracing::{debug, info};

use crate::command::Command;
use crate::player::MoveSource;
use crate::Config;

/// Why a session stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    TournamentOver,
    /// The game was written to [`Config::save_to`].
    Saved,
    Quit,
}

/// Plays rounds until the tournament is decided or the user leaves.
///
/// Returns an error only on I/O failure or if the computer player makes an
/// illegal move. Illegal moves by the human are reported and asked again.
pub fn play_tournament(
    tournament: &mut Tournament,
    source: &mut dyn MoveSource,
    config: &mut Config,
) -> anyhow::Result<SessionEnd> {
    loop {
        if let Some(end) = play_round(tournament, source, config)? {
            return Ok(end);
        }
        match tournament.start_new_round(&mut config.rng) {
            NextRound::Started => {
                println!(
                    "\nTournament score: Human {}, Computer {} (playing to {})",
                    tournament.human_score(),
                    tournament.computer_score(),
                    tournament.max_score()
                );
            }
            NextRound::TournamentOver => {
                println!(
                    "\nFinal score: Human {}, Computer {}\n{}",
                    tournament.human_score(),
                    tournament.computer_score(),
                    tournament.result().unwrap_or_default()
                );
                return Ok(SessionEnd::TournamentOver);
            }
            NextRound::RoundNotOver => {
                let number = tournament.current_round().number();
                bail!("Round {} stopped before it was over", number)
            }
        }
    }
}

/// Plays the current round to its end, unless the user saves or quits first.
fn play_round(
    tournament: &mut Tournament,
    source: &mut dyn MoveSource,
    config: &mut Config,
) -> anyhow::Result<Option<SessionEnd>> {
    let round = tournament.current_round_mut();
    if round.phase() == RoundPhase::AwaitingEngine {
        let holder = round.prepare()?;
        println!(
            "\nRound {}: the {} player holds the engine {} and places it",
            round.number(),
            holder,
            round.engine()
        );
    }

    while !tournament.current_round().is_over() {
        let round = tournament.current_round();
        if round.current_player() == PlayerId::Human {
            match source.next_command(round)? {
                Command::Move(request) => tournament.current_round_mut().set_human_input(request),
                Command::Help => {
                    println!("{}", round.help().unwrap_or_default());
                    continue;
                }
                Command::Save => {
                    tournament.save(&config.save_to)?;
                    println!("Saved the game to '{}'", config.save_to.display());
                    return Ok(Some(SessionEnd::Saved));
                }
                Command::Quit => return Ok(Some(SessionEnd::Quit)),
            }
        }

        let round = tournament.current_round_mut();
        let mover = round.current_player();
        let result = round.make_move();
        if let Some(recorder) = &mut config.recorder {
            recorder.store_move(
                mover,
                round.last_request(),
                round.move_summary(),
                result.is_ok(),
            );
        }
        match result {
            Ok(MoveOutcome::Inspected { state }) => println!("{}", state),
            Ok(_) => println!("{}", round.move_summary()),
            Err(err) if mover == PlayerId::Computer => {
                bail!("The computer player made an illegal move: {}", err)
            }
            Err(err) => {
                debug!("Rejected human move: {}", err);
                // Print the whole chain of errors
                let mut err_dyn = &err as &dyn std::error::Error;
                println!("Illegal move: {}", err_dyn);
                while let Some(src_err) = err_dyn.source() {
                    println!("  {}", src_err);
                    err_dyn = src_err;
                }
            }
        }
    }

    let round = tournament.current_round();
    info!(round = round.number(), winner = round.winner_text(), "Round finished");
    println!(
        "\nRound {} is over. Winner: {}\nPoints this round: Human {}, Computer {}",
        round.number(),
        round.winner_text(),
        round.human().score(),
        round.computer().score()
    );
    if let Some(recorder) = &mut config.recorder {
        let path = recorder.write_round_recording()?;
        debug!(path = %path.display(), "Wrote round recording");
    }
    Ok(None)
}
