//! Human and JSON renderings of a decoded replay.

use std::fmt;
use std::path::Path;

use minevid_avf::{GameMode, ReplayRecord};

/// Multi-line text summary of one replay.
pub struct Summary<'a> {
    path: &'a Path,
    record: &'a ReplayRecord,
}

impl<'a> Summary<'a> {
    pub fn new(path: &'a Path, record: &'a ReplayRecord) -> Self {
        Self { path, record }
    }
}

fn mode_name(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Beginner => "Beginner",
        GameMode::Intermediate => "Intermediate",
        GameMode::Expert => "Expert",
        GameMode::Custom => "Custom",
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.record;
        writeln!(f, "{}", self.path.display())?;
        writeln!(
            f,
            "  mode     {} {}x{}, {} mines{}",
            mode_name(r.mode),
            r.width,
            r.height,
            r.mine_count,
            if r.question_marks { ", question marks" } else { "" }
        )?;
        match r.bbbv_per_second() {
            Some(rate) => writeln!(f, "  3BV      {} ({rate:.3}/s)", r.bbbv)?,
            None => writeln!(f, "  3BV      {}", r.bbbv)?,
        }
        write!(f, "  time     {:.2} s", r.score_time())?;
        if let Some(realtime) = r.realtime() {
            write!(f, " (realtime {realtime:.3} s)")?;
        }
        writeln!(f)?;
        writeln!(f, "  events   {}", r.events.len())?;
        writeln!(f, "  started  {}", r.start_timestamp)?;
        writeln!(f, "  player   {}", r.player_name)?;
        writeln!(f, "  skin     {}", r.skin)?;
        match r.program.trim() {
            "" => write!(f, "  program  {}", r.version_string()),
            program => write!(f, "  program  {program} {}", r.version_string()),
        }
    }
}

/// One-line JSON object: `{"file": ..., "record": {...}}`.
pub fn json_line(path: &Path, record: &ReplayRecord) -> serde_json::Result<String> {
    serde_json::to_string(&serde_json::json!({
        "file": path.display().to_string(),
        "version": record.version_string(),
        "record": record,
    }))
}
