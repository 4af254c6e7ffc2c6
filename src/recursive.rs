use std::fs::{self, Metadata};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::entry::Entry;
use crate::error::{ErrorKind, FfindError};
use crate::one_level::ListOneLevel;
use crate::probe::resolve_target;
use crate::traits::{FileMatcher, SortFn};

/// Lazy, pre-order, depth-first traversal below one entry.
///
/// Every level is a [`ListOneLevel`]; this iterator keeps one of them per
/// directory on the current branch and pulls from the deepest. Nothing is
/// read ahead of the consumer, and dropping the iterator abandons the walk.
///
/// Per child, in [`SortFn`] order:
///
/// 1. errors are yielded and the walk moves on to the next sibling;
/// 2. with `follow`, symlinks are resolved to decide whether to descend. A
///    dangling link is treated as a leaf and no error is reported for it;
/// 3. directories pruned by [`FileMatcher::skip_directory_name`] are neither
///    reported nor entered. Otherwise the directory is reported (unless
///    [`FileMatcher::skip_directory_results`]) and then entered;
/// 4. everything else is reported if the matcher lets it through.
///
/// Entering a directory already open on the current branch yields
/// [`FfindError::CycleDetected`] instead of descending.
pub struct ListRecursive {
    follow: bool,
    matcher: Arc<dyn FileMatcher>,
    sort: Arc<dyn SortFn>,
    stack: Vec<Frame>,
}

struct Frame {
    children: ListOneLevel,
    id: Option<DirId>,
}

impl ListRecursive {
    pub(crate) fn new(
        start: Result<Entry, FfindError>,
        follow: bool,
        matcher: Arc<dyn FileMatcher>,
        sort: Arc<dyn SortFn>,
    ) -> Self {
        let id = match &start {
            Ok(entry) if entry.is_dir() || (follow && entry.is_symlink()) => fs::metadata(&entry.path)
                .ok()
                .and_then(|m| DirId::new(&entry.path, &m)),
            _ => None,
        };
        let root = Frame {
            children: ListOneLevel::new(start, follow, Arc::clone(&sort)),
            id,
        };
        Self {
            follow,
            matcher,
            sort,
            stack: vec![root],
        }
    }

    /// Stop descending into the directory that is currently being listed.
    ///
    /// If the last item yielded was a directory, its contents are skipped.
    /// Otherwise the remaining siblings of the last item are skipped. An
    /// error counts as an item of the directory holding the failed entry,
    /// so after a directory that could not be read its siblings are skipped.
    pub fn skip_current_dir(&mut self) {
        self.stack.pop();
    }

    /// How many directories are open on the current branch.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Iterator for ListRecursive {
    type Item = Result<Entry, FfindError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let entry = match frame.children.next() {
                None => {
                    self.stack.pop();
                    continue;
                }
                Some(Err(err)) => {
                    // A one-level listing ends with its error; drop the frame
                    // now so the error counts as an item of the parent.
                    self.stack.pop();
                    return Some(Err(err));
                }
                Some(Ok(entry)) => entry,
            };

            let target = if self.follow && entry.is_symlink() {
                match resolve_target(&entry.path, entry.depth) {
                    Ok(target) => Some(target),
                    Err(err) if err.kind() == ErrorKind::NotFound => {
                        debug!("dangling symlink {}, treated as a leaf", entry.path.display());
                        None
                    }
                    Err(err) => return Some(Err(err)),
                }
            } else {
                None
            };
            let resolved = target.as_ref().unwrap_or(&entry);

            if resolved.is_dir() {
                if self.matcher.skip_directory_name(&entry.name) {
                    trace!("skipping directory {}", entry.path.display());
                    continue;
                }

                let id = DirId::new(&resolved.path, &resolved.metadata);
                if id.is_some() && self.stack.iter().any(|f| f.id == id) {
                    debug!("cycle at {}", entry.path.display());
                    return Some(Err(FfindError::CycleDetected(entry.path)));
                }

                self.stack.push(Frame {
                    children: ListOneLevel::new(Ok(entry.clone()), self.follow, Arc::clone(&self.sort)),
                    id,
                });
                if !self.matcher.skip_directory_results() {
                    return Some(Ok(entry));
                }
                continue;
            }

            if self.matcher.skip_file_results() || self.matcher.skip_file_name(&entry.name) {
                trace!("skipping file {}", entry.path.display());
                continue;
            }
            if self.matcher.match_file_name(&entry.name) {
                return Some(Ok(entry));
            }
        }
    }
}

/// Identity of a directory on disk, independent of the path it was reached by.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirId {
    dev: u64,
    ino: u64,
}

#[cfg(unix)]
impl DirId {
    fn new(_path: &Path, metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }
}

#[cfg(not(unix))]
#[derive(Debug, Clone, PartialEq, Eq)]
struct DirId(std::path::PathBuf);

#[cfg(not(unix))]
impl DirId {
    fn new(path: &Path, _metadata: &Metadata) -> Option<Self> {
        fs::canonicalize(path).ok().map(Self)
    }
}
