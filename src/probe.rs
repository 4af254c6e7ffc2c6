//! Filesystem primitives: probing, listing and symlink resolution.
//!
//! Everything here is read-only and uncached. None of these functions decide
//! whether a symlink should be followed — that belongs to the enumerators.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::entry::Entry;
use crate::error::FfindError;
use crate::paths::clean;

/// Stat `path` without following symlinks.
///
/// The returned entry carries the cleaned path. Not-found is reported as
/// [`FfindError::NotFound`]; other OS errors are classified by
/// [`FfindError::classify`].
pub fn probe(path: impl AsRef<Path>) -> Result<Entry, FfindError> {
    probe_at(path.as_ref(), 0)
}

pub(crate) fn probe_at(path: &Path, depth: usize) -> Result<Entry, FfindError> {
    let path = clean(path);
    trace!("probe: {}", path.display());
    match fs::symlink_metadata(&path) {
        Ok(metadata) => Ok(Entry::new(path, metadata, depth)),
        Err(err) => {
            debug!("probe {} failed: {}", path.display(), err);
            Err(FfindError::classify(path, err))
        }
    }
}

/// List the immediate children of `dir`, in whatever order the OS returns them.
///
/// The listing is read eagerly as one batch; a failure anywhere in the read
/// fails the whole batch. Children that vanish between the listing and their
/// stat are dropped. Child paths are `dir` joined with the child's name and
/// cleaned, so `.` yields `name` rather than `./name`. Children get `depth`
/// as their depth.
pub fn read_dir(dir: impl AsRef<Path>, depth: usize) -> Result<Vec<Entry>, FfindError> {
    let dir = clean(dir.as_ref());
    let listing = fs::read_dir(&dir).map_err(|err| {
        debug!("read_dir {} failed: {}", dir.display(), err);
        FfindError::classify(&dir, err)
    })?;

    let mut children = Vec::new();
    for dent in listing {
        let dent = dent.map_err(|err| FfindError::classify(&dir, err))?;
        let path = clean(&dir.join(dent.file_name()));
        match dent.metadata() {
            Ok(metadata) => children.push(Entry::new(path, metadata, depth)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                trace!("{} vanished during listing", path.display());
            }
            Err(err) => return Err(FfindError::classify(path, err)),
        }
    }
    Ok(children)
}

/// Fully resolve the symlink chain at `path`.
///
/// A chain ending nowhere yields [`FfindError::NotFound`]; every other
/// failure (including too-many-links on cyclic chains) yields
/// [`FfindError::SymlinkResolution`]. Errors are reported at `path`.
pub fn resolve(path: impl AsRef<Path>) -> Result<PathBuf, FfindError> {
    let path = path.as_ref();
    fs::canonicalize(path).map_err(|err| {
        debug!("resolve {} failed: {}", path.display(), err);
        match err.kind() {
            io::ErrorKind::NotFound => FfindError::NotFound(path.to_path_buf()),
            _ => FfindError::SymlinkResolution {
                path: path.to_path_buf(),
                source: err,
            },
        }
    })
}

/// Resolve the link at `path` and probe what it points to.
///
/// Errors are reported at `path`, never at the resolved location.
pub(crate) fn resolve_target(path: &Path, depth: usize) -> Result<Entry, FfindError> {
    let resolved = resolve(path)?;
    trace!("symlink {} -> {}", path.display(), resolved.display());
    probe_at(&resolved, depth).map_err(|err| err.at(path))
}
