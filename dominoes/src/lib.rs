pub use errors::*;
pub use player::*;
pub use protocol::*;
pub use round::*;
pub use snapshot::*;
pub use stock::*;
pub use table::*;
pub use tile::*;
pub use tournament::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod errors;
mod player;
mod protocol;
mod round;
mod snapshot;
mod stock;
pub mod strategy;
mod table;
mod tile;
mod tournament;
mod visualization;
