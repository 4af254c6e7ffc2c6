//! Callback-driven front-ends.
//!
//! [`list_recursive_walk`] drains the streaming [`ListRecursive`] core and
//! hands every item to a callback. [`symlink_walk`] teaches `walkdir`, which
//! is run without following links, to follow directory symlinks by walking
//! each resolved target separately and rewriting the reported paths back
//! under the link.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use walkdir::WalkDir;

use crate::entry::Entry;
use crate::error::{ErrorKind, FfindError};
use crate::paths::{clean, redirect};
use crate::probe::{probe, resolve};
use crate::recursive::ListRecursive;
use crate::sort::ByName;
use crate::traits::FileMatcher;

/// What a walk callback wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    /// Skip the contents of the directory just reported, or the remaining
    /// siblings if the item just reported was not a directory.
    SkipDir,
}

/// Recursive traversal below `root`, delivered through `callback`.
///
/// Same semantics as [`list_recursive`](crate::list_recursive) with children
/// ordered by name. Filesystem errors are passed to the callback and never
/// end the walk; the walk ends early only when the callback returns `Err`,
/// which is then returned.
pub fn list_recursive_walk<M, F, E>(root: impl AsRef<Path>, follow: bool, matcher: M, callback: F) -> Result<(), E>
where
    M: FileMatcher + 'static,
    F: FnMut(Result<Entry, FfindError>) -> Result<WalkControl, E>,
{
    let mut walk = ListRecursive::new(probe(root), follow, Arc::new(matcher), Arc::new(ByName));
    drive(&mut walk, callback)
}

pub(crate) fn drive<F, E>(walk: &mut ListRecursive, mut callback: F) -> Result<(), E>
where
    F: FnMut(Result<Entry, FfindError>) -> Result<WalkControl, E>,
{
    while let Some(item) = walk.next() {
        if callback(item)? == WalkControl::SkipDir {
            walk.skip_current_dir();
        }
    }
    Ok(())
}

/// Depth-first walk of `root`, reporting `root` itself first and every
/// directory before its contents, with children in name order.
///
/// With `follow`, a symlink to a directory is reported as that directory at
/// the link's path and its target's contents are reported below the link's
/// path. Dangling links are reported as plain entries. A link whose target
/// is already being walked, or contains a directory that is, is reported as
/// [`FfindError::CycleDetected`] instead of being entered.
///
/// Errors are handed to the callback; returning `Err` from the callback ends
/// the walk with that error.
pub fn symlink_walk<F, E>(root: impl AsRef<Path>, follow: bool, mut callback: F) -> Result<(), E>
where
    F: FnMut(Result<Entry, FfindError>) -> Result<WalkControl, E>,
{
    let root = clean(root.as_ref());
    let mut branch = Branch {
        origin: fs::canonicalize(&root).ok(),
        redirects: Vec::new(),
    };
    walk_redirected(&root, follow, &mut branch, &mut callback)
}

/// The chain of walks leading to the current one.
struct Branch {
    /// Canonical path of the outermost walk root.
    origin: Option<PathBuf>,
    /// Descents into symlink targets, outermost first.
    redirects: Vec<Redirect>,
}

impl Branch {
    /// Whether walking `target` would revisit a directory already open on
    /// this branch: the outermost root, an active link target, or the real
    /// parent of the link being followed.
    fn revisits(&self, target: &Path, link_parent: Option<&Path>) -> bool {
        self.origin
            .iter()
            .map(PathBuf::as_path)
            .chain(self.redirects.iter().map(|r| r.resolved.as_path()))
            .chain(link_parent)
            .any(|open| open.starts_with(target))
    }
}

/// An active descent into a resolved symlink target.
struct Redirect {
    /// Canonical path of the target directory.
    resolved: PathBuf,
    /// Where the link lives, as the consumer sees it.
    link: PathBuf,
    depth: usize,
}

impl Redirect {
    fn apply(&self, physical: &Path) -> PathBuf {
        redirect(physical, &self.resolved, &self.link)
    }
}

fn walk_redirected<F, E>(root: &Path, follow: bool, branch: &mut Branch, callback: &mut F) -> Result<(), E>
where
    F: FnMut(Result<Entry, FfindError>) -> Result<WalkControl, E>,
{
    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .follow_root_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = walker.next() {
        let control = match next {
            Err(err) => callback(Err(from_walkdir(err, branch.redirects.last())))?,
            Ok(dent) => {
                let (path, depth) = match branch.redirects.last() {
                    Some(active) => (active.apply(dent.path()), active.depth + dent.depth()),
                    None => (dent.path().to_path_buf(), dent.depth()),
                };
                match dent.metadata() {
                    Err(err) => callback(Err(from_walkdir(err, branch.redirects.last())))?,
                    Ok(metadata) => {
                        let entry = Entry::new(path, metadata, depth);
                        if follow && entry.is_symlink() {
                            follow_link(dent.path(), entry, branch, callback)?
                        } else {
                            callback(Ok(entry))?
                        }
                    }
                }
            }
        };
        if control == WalkControl::SkipDir {
            walker.skip_current_dir();
        }
    }
    Ok(())
}

/// Report the link at `physical` (seen by the consumer as `entry`), walking
/// into its target if that is a directory.
fn follow_link<F, E>(
    physical: &Path,
    entry: Entry,
    branch: &mut Branch,
    callback: &mut F,
) -> Result<WalkControl, E>
where
    F: FnMut(Result<Entry, FfindError>) -> Result<WalkControl, E>,
{
    let resolved = match resolve(physical) {
        Ok(resolved) => resolved,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("dangling symlink {}, reported as is", entry.path.display());
            return callback(Ok(entry));
        }
        Err(err) => return callback(Err(err.at(&entry.path))),
    };

    let metadata = match fs::metadata(&resolved) {
        Ok(metadata) => metadata,
        Err(err) => return callback(Err(FfindError::classify(&entry.path, err))),
    };
    if !metadata.is_dir() {
        return callback(Ok(entry));
    }

    let parent = match physical.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let link_parent = fs::canonicalize(parent).ok();
    if branch.revisits(&resolved, link_parent.as_deref()) {
        debug!("{} leads back into {}", entry.path.display(), resolved.display());
        return callback(Err(FfindError::CycleDetected(entry.path)));
    }

    debug!("entering {} as {}", resolved.display(), entry.path.display());
    branch.redirects.push(Redirect {
        resolved: resolved.clone(),
        link: entry.path,
        depth: entry.depth,
    });
    let walked = walk_redirected(&resolved, true, branch, callback);
    branch.redirects.pop();
    debug!("left {}", resolved.display());
    walked.map(|()| WalkControl::Continue)
}

fn from_walkdir(err: walkdir::Error, active: Option<&Redirect>) -> FfindError {
    let path = match (err.path(), active) {
        (Some(p), Some(active)) => active.apply(p),
        (Some(p), None) => p.to_path_buf(),
        (None, _) => PathBuf::new(),
    };
    if err.loop_ancestor().is_some() {
        return FfindError::CycleDetected(path);
    }
    match err.into_io_error() {
        Some(io) => FfindError::classify(path, io),
        None => FfindError::CycleDetected(path),
    }
}
