//! # ffind
//!
//! Symlink-aware, streaming filesystem traversal — the engine behind a
//! find-like tool.
//!
//! ffind owns the traversal: probing, listing, symlink resolution, the
//! depth-first walk and its delivery. It does **not** own argument parsing,
//! printing, or pattern syntax — callers inject the inclusion policy
//! ([`FileMatcher`]) and per-directory ordering ([`SortFn`]).
//!
//! Results are pulled lazily: every enumerator is an [`Iterator`] of
//! `Result<Entry, FfindError>` that does no I/O ahead of its consumer.
//! Errors are items of the stream and only cost their own branch.
//!
//! # Quick Start
//!
//! ```rust
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::create_dir(dir.path().join("src")).unwrap();
//! fs::write(dir.path().join("src/main.rs"), "fn main() {}").unwrap();
//! fs::write(dir.path().join("README.md"), "# demo").unwrap();
//!
//! let results = ffind::find(dir.path()).run();
//!
//! assert_eq!(results.stats.files, 2);
//! assert_eq!(results.stats.dirs, 1);
//! assert!(results.errors.is_empty());
//! ```
//!
//! # Following Symlinks
//!
//! With `follow`, a symlink to a directory is entered and its contents are
//! reported **under the link's path**. The resolved location never appears
//! in a result:
//!
//! ```rust,no_run
//! use ffind::{sort::ByName, PassThrough};
//!
//! // parent/link -> /elsewhere/target, /elsewhere/target/f.txt
//! for entry in ffind::list_recursive("parent", true, PassThrough, ByName).flatten() {
//!     println!("{}", entry.path.display()); // parent/link, parent/link/f.txt
//! }
//! ```

#![forbid(unsafe_code)]

pub mod paths;
pub mod sort;
pub mod stream;

mod builder;
mod entry;
mod error;
mod matcher;
mod one_level;
mod probe;
mod recursive;
mod results;
mod traits;
mod walk;

use std::path::Path;
use std::sync::Arc;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::FindBuilder;
pub use entry::{Entry, EntryKind};
pub use error::{ErrorKind, FfindError};
pub use matcher::{BasicMatcher, BasicMatcherBuilder, PassThrough, VCS_DIRS};
pub use one_level::ListOneLevel;
pub use probe::{probe, read_dir, resolve};
pub use recursive::ListRecursive;
pub use results::{Results, ScanStats};
pub use traits::{FileMatcher, SortFn};
pub use walk::{list_recursive_walk, symlink_walk, WalkControl};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a new [`FindBuilder`] for a traversal of `root`.
pub fn find(root: impl AsRef<Path>) -> FindBuilder {
    FindBuilder::new(root.as_ref().to_path_buf())
}

/// Immediate children of `path` in `sort` order, or `path` itself if it is
/// not a directory (or is a symlink and `follow` is off).
pub fn list_one_level(path: impl AsRef<Path>, follow: bool, sort: impl SortFn + 'static) -> ListOneLevel {
    ListOneLevel::new(probe(path), follow, Arc::new(sort))
}

/// Lazy pre-order traversal of everything below `path` that `matcher` lets
/// through. See [`ListRecursive`] for the exact rules.
pub fn list_recursive(
    path: impl AsRef<Path>,
    follow: bool,
    matcher: impl FileMatcher + 'static,
    sort: impl SortFn + 'static,
) -> ListRecursive {
    ListRecursive::new(probe(path), follow, Arc::new(matcher), Arc::new(sort))
}
