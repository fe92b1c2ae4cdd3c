use serde::{Deserialize, Serialize};

/// One end of the table.
///
/// The left side faces the human player, the right side the computer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideId {
    Left,
    Right,
}

impl SideId {
    pub fn opponent(self) -> Self {
        match self {
            SideId::Left => SideId::Right,
            SideId::Right => SideId::Left,
        }
    }
}

impl std::fmt::Display for SideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SideId::Left => write!(f, "Left"),
            SideId::Right => write!(f, "Right"),
        }
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`SideId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownSide(pub String);

impl std::error::Error for UnknownSide {}

impl std::fmt::Display for UnknownSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is neither the left nor the right side", self.0)
    }
}

impl std::str::FromStr for SideId {
    type Err = UnknownSide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(SideId::Left),
            "right" | "r" => Ok(SideId::Right),
            _ => Err(UnknownSide(String::from(s))),
        }
    }
}

/// The two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Human,
    Computer,
}

impl PlayerId {
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::Human => PlayerId::Computer,
            PlayerId::Computer => PlayerId::Human,
        }
    }

    /// The side a player may always extend.
    pub fn side(self) -> SideId {
        match self {
            PlayerId::Human => SideId::Left,
            PlayerId::Computer => SideId::Right,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::Human => write!(f, "Human"),
            PlayerId::Computer => write!(f, "Computer"),
        }
    }
}

/// What a player wants to do on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    PlaceTile,
    DrawTile,
    Pass,
    /// Read-only inspection of the game. Never changes any state.
    GameState,
}

/// A move request, as forwarded by a shell into the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub kind: MoveKind,
    /// Index into the hand of the moving player. Only used by
    /// [`MoveKind::PlaceTile`].
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub hand_tile_index: Option<usize>,
    /// The side to place the tile on. Only used by [`MoveKind::PlaceTile`].
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub side: Option<SideId>,
}

impl MoveRequest {
    pub fn place(hand_tile_index: usize, side: SideId) -> Self {
        Self {
            kind: MoveKind::PlaceTile,
            hand_tile_index: Some(hand_tile_index),
            side: Some(side),
        }
    }

    pub fn draw() -> Self {
        Self::without_tile(MoveKind::DrawTile)
    }

    pub fn pass() -> Self {
        Self::without_tile(MoveKind::Pass)
    }

    pub fn game_state() -> Self {
        Self::without_tile(MoveKind::GameState)
    }

    fn without_tile(kind: MoveKind) -> Self {
        Self {
            kind,
            hand_tile_index: None,
            side: None,
        }
    }
}
