use std::path::PathBuf;
use std::time::Duration;

use crate::entry::{Entry, EntryKind};
use crate::error::FfindError;

/// The output of a traversal drained by [`FindBuilder::run`](crate::FindBuilder::run).
#[derive(Debug)]
pub struct Results {
    /// Reported entries, in traversal order.
    pub entries: Vec<Entry>,

    /// Errors reported along the way, in traversal order. Each one cost at
    /// most its own branch.
    pub errors: Vec<FfindError>,

    /// Scan statistics.
    pub stats: ScanStats,
}

impl Results {
    /// Paths of the reported entries, in traversal order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }
}

/// Counts for a completed scan. Only reported entries are counted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanStats {
    /// Regular files and other non-directory, non-symlink entries.
    pub files: usize,

    pub dirs: usize,

    /// Reported symlinks, followed or not: entry kinds come from the
    /// non-following stat, so a followed link still counts here.
    pub symlinks: usize,

    /// Wall-clock time from start to completion.
    pub duration: Duration,

    /// Entries reported per second, 0 on zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    pub(crate) fn compute(entries: &[Entry], duration: Duration) -> Self {
        let mut stats = Self {
            duration,
            ..Self::default()
        };
        for entry in entries {
            match entry.kind {
                EntryKind::Dir => stats.dirs += 1,
                EntryKind::Symlink => stats.symlinks += 1,
                EntryKind::File | EntryKind::Other => stats.files += 1,
            }
        }
        if duration.as_secs_f64() > 0.0 {
            stats.entries_per_sec = (entries.len() as f64 / duration.as_secs_f64()) as usize;
        }
        stats
    }
}
