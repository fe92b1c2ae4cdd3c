use dominoes::{MoveRequest, SideId};

use crate::error::CommandError;

pub const COMMAND_HELP: &str = "Commands:
  place <tile number> <left|right>   place a tile from your hand
  draw                               draw a tile from the stock
  pass                               pass your turn
  state                              show the game state
  help                               ask the computer for advice
  save                               save the game and quit
  quit                               quit without saving";

/// One line of user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(MoveRequest),
    Help,
    Save,
    Quit,
}

/// Parses commands like `place 2 left`, `p 2 l`, `draw` or `quit`.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err(CommandError::Empty);
    };
    let command = match command.to_ascii_lowercase().as_str() {
        "place" | "p" => {
            let index = words.next().ok_or(CommandError::MissingArgument {
                argument: "tile number",
            })?;
            let index = index
                .parse()
                .map_err(|_| CommandError::InvalidTileIndex(String::from(index)))?;
            let side: SideId = words
                .next()
                .ok_or(CommandError::MissingArgument { argument: "side" })?
                .parse()
                .map_err(CommandError::InvalidSide)?;
            Command::Move(MoveRequest::place(index, side))
        }
        "draw" | "d" => Command::Move(MoveRequest::draw()),
        "pass" => Command::Move(MoveRequest::pass()),
        "state" | "s" => Command::Move(MoveRequest::game_state()),
        "help" | "h" | "?" => Command::Help,
        "save" => Command::Save,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::UnknownCommand(String::from(command))),
    };
    Ok(command)
}
