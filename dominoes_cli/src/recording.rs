use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use dominoes::{MoveRequest, PlayerId};
use serde::{Deserialize, Serialize};

/// Writes every move attempt of a round to `round_<number>.json`.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    moves: Vec<RecordedMove>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            moves: Vec::new(),
        })
    }

    pub fn store_move(
        &mut self,
        player: PlayerId,
        request: Option<MoveRequest>,
        summary: &str,
        accepted: bool,
    ) {
        self.moves.push(RecordedMove {
            player,
            request,
            summary: String::from(summary),
            accepted,
        });
    }

    pub fn write_round_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("round_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        let recording = RoundRecording {
            moves: std::mem::take(&mut self.moves),
        };
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecording {
    pub moves: Vec<RecordedMove>,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub player: PlayerId,
    /// Missing when the human gave no move.
    pub request: Option<MoveRequest>,
    pub summary: String,
    pub accepted: bool,
}
