use crate::engine::snapshot::{Mode, ResultSnapshot};
use crate::error::EngineError;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Receives every committed snapshot of a run.
pub trait SnapshotRecorder {
    fn record(&mut self, snapshot: &ResultSnapshot) -> Result<(), EngineError>;
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecorder;

impl SnapshotRecorder for NoopRecorder {
    fn record(&mut self, _snapshot: &ResultSnapshot) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Append-only in-memory history.
#[derive(Debug, Default, Clone)]
pub struct MemoryRecorder {
    history: Vec<ResultSnapshot>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[ResultSnapshot] {
        &self.history
    }

    pub fn latest(&self) -> Option<&ResultSnapshot> {
        self.history.last()
    }

    pub fn latest_for(&self, mode: Mode) -> Option<&ResultSnapshot> {
        self.history.iter().rev().find(|s| s.mode == mode)
    }
}

impl SnapshotRecorder for MemoryRecorder {
    fn record(&mut self, snapshot: &ResultSnapshot) -> Result<(), EngineError> {
        self.history.push(snapshot.clone());
        Ok(())
    }
}

/// History kept as a pretty-printed JSON array on disk, plus one
/// `<mode>_results.json` file per mode holding that mode's latest snapshot.
///
/// The whole history file is rewritten on every record.
pub struct JsonFileRecorder {
    path: PathBuf,
    memory: MemoryRecorder,
}

impl JsonFileRecorder {
    /// Continues the history already stored at `path`. A missing file starts
    /// an empty history; an unreadable one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, EngineError> {
        let path = path.into();
        let history = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str::<Vec<ResultSnapshot>>(&data)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(history = %path.display(), snapshots = history.len(), "results history opened");
        Ok(JsonFileRecorder {
            path,
            memory: MemoryRecorder { history },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history(&self) -> &MemoryRecorder {
        &self.memory
    }

    fn mode_path(&self, mode: Mode) -> PathBuf {
        let name = format!("{mode}_results.json");
        match self.path.parent() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), EngineError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
        Ok(())
    }
}

impl SnapshotRecorder for JsonFileRecorder {
    fn record(&mut self, snapshot: &ResultSnapshot) -> Result<(), EngineError> {
        self.memory.record(snapshot)?;
        Self::write_json(&self.path, self.memory.history())?;
        let mode_path = self.mode_path(snapshot.mode);
        Self::write_json(&mode_path, snapshot)?;
        debug!(
            history = %self.path.display(),
            latest = %mode_path.display(),
            "snapshot persisted"
        );
        Ok(())
    }
}
