use std::io::{BufRead, Write};

use dominoes::strategy::choose_heuristic_move;
use dominoes::Round;
use tracing::trace;

use crate::command::{parse_command, Command, COMMAND_HELP};

/// Decides for the human seat.
pub trait MoveSource {
    fn next_command(&mut self, round: &Round) -> anyhow::Result<Command>;
}

/// Reads commands typed by a person.
pub struct Console<R, W> {
    input: R,
    output: W,
    // A re-usable buffer for IO.
    buf: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            buf: String::new(),
        }
    }
}

impl<R: BufRead, W: Write> MoveSource for Console<R, W> {
    /// Shows the game state, then asks until a well-formed command is typed.
    /// The end of the input counts as quitting.
    fn next_command(&mut self, round: &Round) -> anyhow::Result<Command> {
        writeln!(self.output, "\n{}\n{}", round.game_state(), COMMAND_HELP)?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                return Ok(Command::Quit);
            }
            trace!(line = self.buf.trim_end(), "Read command");
            match parse_command(&self.buf) {
                Ok(command) => return Ok(command),
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }
}

/// Lets the advice heuristic play the human seat.
pub struct Autoplay;

impl MoveSource for Autoplay {
    fn next_command(&mut self, round: &Round) -> anyhow::Result<Command> {
        let human = round.human();
        Ok(Command::Move(choose_heuristic_move(
            human.hand_for_display(),
            round.table(),
            human.side(),
            round.computer().has_passed(),
            round.stock().is_empty(),
            human.tiles_drawn_this_turn(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use dominoes::MoveRequest;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn prepared_round() -> Round {
        let mut rng = StdRng::seed_from_u64(4);
        let mut round = Round::new(1, 0, 0, &mut rng);
        round.prepare().unwrap();
        round
    }

    #[test]
    fn console_retries_until_a_command_parses() {
        let round = prepared_round();
        let mut output = Vec::new();
        let mut console = Console::new(Cursor::new("jump\n\ndraw\n"), &mut output);
        assert_eq!(
            console.next_command(&round).unwrap(),
            Command::Move(MoveRequest::draw())
        );
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Unknown command 'jump'"));
        assert!(output.contains("Please enter a command"));
    }

    #[test]
    fn console_quits_at_end_of_input() {
        let round = prepared_round();
        let mut console = Console::new(Cursor::new(""), Vec::new());
        assert_eq!(console.next_command(&round).unwrap(), Command::Quit);
    }

    #[test]
    fn autoplay_always_moves() {
        let round = prepared_round();
        assert!(matches!(
            Autoplay.next_command(&round).unwrap(),
            Command::Move(_)
        ));
    }
}
