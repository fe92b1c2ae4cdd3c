mod command;
mod error;
mod game;
mod player;
mod recording;
pub use command::*;
pub use error::*;
pub use game::*;
pub use player::*;
pub use recording::*;

pub struct Config {
    pub rng: rand::rngs::StdRng,
    pub recorder: Option<recording::Recorder>,
    /// Where the `save` command writes the game.
    pub save_to: std::path::PathBuf,
}
