use std::collections::BTreeMap;
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::PlayerAction;
use crate::table::Street;

/// A single applied action.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: String,
    /// The betting street when this action occurred
    pub street: Street,
    /// The action as requested, before any all-in capping
    pub action: PlayerAction,
    /// Chips the action actually moved into the pot
    pub committed: u32,
}

/// Winners and what each seat was paid, refunds included.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winners: Vec<String>,
    pub payouts: BTreeMap<String, u64>,
}

/// Complete record of a hand, one JSONL line per hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// `YYYYMMDD-NNNNNN`, see [`format_hand_id`]
    pub hand_id: String,
    /// Applied actions, oldest first. Blinds are not listed.
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    /// Stack per player name after payout
    pub stacks: BTreeMap<String, u32>,
    /// RFC3339 write time, filled in by [`HandLogger::write`]
    #[serde(default)]
    pub ts: Option<String>,
    /// Absent when everyone but one player folded
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends hand records to a JSONL file. A disabled logger accepts and
/// drops every record.
pub struct HandLogger {
    out: Option<BufWriter<File>>,
}

impl HandLogger {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => create_dir_all(dir)?,
            _ => {}
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            out: Some(BufWriter::new(file)),
        })
    }

    pub fn disabled() -> Self {
        Self { out: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Writes `record` as one LF-terminated line, stamping `ts` when the
    /// record has none.
    pub fn write(&mut self, record: &HandRecord) -> io::Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        let stamped;
        let record = match record.ts {
            Some(_) => record,
            None => {
                stamped = HandRecord {
                    ts: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                    ..record.clone()
                };
                &stamped
            }
        };
        serde_json::to_writer(&mut *out, record).map_err(io::Error::other)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}
