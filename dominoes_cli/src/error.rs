use dominoes::UnknownSide;

#[derive(Debug, PartialEq, Eq)]
/// Error type for one line typed by the user.
pub enum CommandError {
    Empty,
    UnknownCommand(String),
    MissingArgument { argument: &'static str },
    InvalidTileIndex(String),
    InvalidSide(UnknownSide),
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::InvalidSide(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Please enter a command"),
            CommandError::UnknownCommand(command) => {
                write!(f, "Unknown command '{}', type 'help' for advice", command)
            }
            CommandError::MissingArgument { argument } => {
                write!(f, "The command needs a {}", argument)
            }
            CommandError::InvalidTileIndex(text) => {
                write!(f, "'{}' is not a tile number from your hand", text)
            }
            CommandError::InvalidSide(err) => write!(f, "{}", err),
        }
    }
}
