//! Room file persistence.
//!
//! One room per line, space separated:
//! `<number> <ac A|N> <tier S|L> <rent> <status 0|1>`.
//! Guest stays are never written.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    error::DeskError,
    models::{AcType, ComfortTier, Room},
};

/// File name used when no path is configured.
pub const DEFAULT_ROOMS_FILE: &str = "rooms.txt";

/// Directory under the user's data directory holding the room file.
pub const DEFAULT_DATA_DIR: &str = "frontdesk";

/// Rooms read from disk along with anything noteworthy about the read.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Rooms parsed before reading stopped, in file order.
    pub rooms: Vec<Room>,
    /// The record that ended the read early, if any.
    pub stopped_at: Option<DeskError>,
    /// Lines skipped because their tier code was not `S` or `L`.
    pub skipped_unknown_tier: usize,
    /// Rooms saved as occupied, loaded as available since stays are not kept.
    pub coerced_vacant: usize,
}

enum ParsedLine {
    Room { room: Room, occupied: bool },
    UnknownTier(char),
}

/// Reads and writes the room file.
#[derive(Debug, Clone)]
pub struct RoomStore {
    path: PathBuf,
}

impl RoomStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DATA_DIR)
            .join(DEFAULT_ROOMS_FILE)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every room up to the first malformed line.
    ///
    /// A missing file yields an empty report. A malformed line is not an
    /// error: rooms before it are kept and the failure is recorded in
    /// [`LoadReport::stopped_at`].
    pub fn load(&self) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        if !self.path.exists() {
            info!(path = %self.path.display(), "No room file yet; starting empty");
            return Ok(report);
        }

        let content = fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;

        for (index, raw) in content.split(|byte| *byte == b'\n').enumerate() {
            let parsed = std::str::from_utf8(raw)
                .map_err(|_| DeskError::MalformedPersistedRecord {
                    line: index + 1,
                    reason: "invalid UTF-8".to_string(),
                })
                .map(|line| line.trim_end_matches('\r'));
            if matches!(parsed, Ok(line) if line.trim().is_empty()) {
                continue;
            }
            match parsed.and_then(|line| parse_line(index + 1, line)) {
                Ok(ParsedLine::Room { room, occupied }) => {
                    if occupied {
                        warn!(
                            room = room.number(),
                            "Room saved as occupied has no guest data; loading as available"
                        );
                        report.coerced_vacant += 1;
                    }
                    report.rooms.push(room);
                }
                Ok(ParsedLine::UnknownTier(code)) => {
                    warn!(line = index + 1, %code, "Skipping room with unknown tier");
                    report.skipped_unknown_tier += 1;
                }
                Err(err) => {
                    warn!("Stopped reading {}: {err}", self.path.display());
                    report.stopped_at = Some(err);
                    break;
                }
            }
        }

        info!(
            path = %self.path.display(),
            rooms = report.rooms.len(),
            "Rooms loaded"
        );
        Ok(report)
    }

    /// Overwrite the room file with `rooms`, creating parent directories.
    pub fn save(&self, rooms: &[Room]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let mut serialised = String::new();
        for room in rooms {
            serialised.push_str(&format_line(room));
            serialised.push('\n');
        }
        fs::write(&self.path, serialised)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        info!(path = %self.path.display(), rooms = rooms.len(), "Rooms saved");
        Ok(())
    }
}

fn format_line(room: &Room) -> String {
    format!(
        "{} {} {} {} {}",
        room.number(),
        room.ac().code(),
        room.tier().code(),
        room.rent(),
        room.status().flag()
    )
}

fn parse_line(line_no: usize, line: &str) -> std::result::Result<ParsedLine, DeskError> {
    let malformed = |reason: String| DeskError::MalformedPersistedRecord {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [number, ac, tier, rent, status] = fields.as_slice() else {
        return Err(malformed(format!("expected 5 fields, found {}", fields.len())));
    };

    let number = number
        .parse::<u32>()
        .map_err(|_| malformed(format!("invalid room number '{number}'")))?;
    let ac = single_char(ac)
        .and_then(|code| AcType::from_code(code).ok())
        .ok_or_else(|| malformed(format!("invalid AC type '{ac}'")))?;
    let tier_code = single_char(tier).ok_or_else(|| malformed(format!("invalid tier '{tier}'")))?;
    let rent = rent
        .parse::<u32>()
        .map_err(|_| malformed(format!("invalid rent '{rent}'")))?;
    let occupied = match *status {
        "0" => false,
        "1" => true,
        other => return Err(malformed(format!("invalid status '{other}'"))),
    };

    match ComfortTier::from_code(tier_code) {
        Ok(tier) => Ok(ParsedLine::Room {
            room: Room::new(number, tier, ac, rent),
            occupied,
        }),
        Err(_) => Ok(ParsedLine::UnknownTier(tier_code)),
    }
}

fn single_char(input: &str) -> Option<char> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}
