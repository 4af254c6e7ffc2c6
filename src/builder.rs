use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::matcher::PassThrough;
use crate::one_level::ListOneLevel;
use crate::probe::probe;
use crate::recursive::ListRecursive;
use crate::results::{Results, ScanStats};
use crate::sort::ByName;
use crate::stream::{spawn, Stream};
use crate::traits::{FileMatcher, SortFn};
use crate::walk::{drive, WalkControl};
use crate::{Entry, FfindError};

// ---------------------------------------------------------------------------
// FindBuilder
// ---------------------------------------------------------------------------

/// Configures a traversal of one root.
///
/// Created via [`ffind::find()`](crate::find). Configure with chained
/// builder methods, then pick how results are delivered: pulled lazily
/// ([`recursive`](Self::recursive), [`one_level`](Self::one_level)), from a
/// producer thread ([`spawn`](Self::spawn)), through a callback
/// ([`walk`](Self::walk)) or all at once ([`run`](Self::run)).
///
/// # Example
///
/// ```rust,no_run
/// use ffind::BasicMatcher;
///
/// let matcher = BasicMatcher::builder()
///     .skip_hidden(true)
///     .skip_vcs(true)
///     .pattern("*.rs")
///     .build()?;
///
/// for item in ffind::find("src").follow_links(true).with_matcher(matcher).recursive() {
///     match item {
///         Ok(entry) => println!("{}", entry.path.display()),
///         Err(err)  => eprintln!("ERROR: {err}"),
///     }
/// }
/// # Ok::<(), ffind::FfindError>(())
/// ```
pub struct FindBuilder {
    root:     PathBuf,
    follow:   bool,
    matcher:  Arc<dyn FileMatcher>,
    sort:     Arc<dyn SortFn>,
    capacity: usize,
}

impl FindBuilder {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root,
            follow:   false,
            matcher:  Arc::new(PassThrough),
            sort:     Arc::new(ByName),
            capacity: 0,
        }
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Dereference symlinks and descend into the directories they point at.
    /// Results stay anchored at the link's path. Off by default.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow = yes;
        self
    }

    /// Set the inclusion policy. Defaults to [`PassThrough`].
    pub fn with_matcher(mut self, m: impl FileMatcher + 'static) -> Self {
        self.matcher = Arc::new(m);
        self
    }

    /// Set the per-directory ordering. Defaults to [`ByName`].
    pub fn sort_by(mut self, s: impl SortFn + 'static) -> Self {
        self.sort = Arc::new(s);
        self
    }

    /// Queue size between producer and consumer for [`spawn`](Self::spawn).
    /// Defaults to 0: every item is handed over directly.
    pub fn channel_capacity(mut self, n: usize) -> Self {
        self.capacity = n;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Immediate children of the root (or the root itself if it is not a
    /// directory). The matcher is not consulted.
    pub fn one_level(self) -> ListOneLevel {
        ListOneLevel::new(probe(&self.root), self.follow, self.sort)
    }

    /// Lazy recursive traversal of the root.
    pub fn recursive(self) -> ListRecursive {
        ListRecursive::new(probe(&self.root), self.follow, self.matcher, self.sort)
    }

    /// Recursive traversal on its own thread, behind a bounded queue.
    pub fn spawn(self) -> Stream {
        let capacity = self.capacity;
        spawn(self.recursive(), capacity)
    }

    /// Recursive traversal delivered through `callback`.
    ///
    /// # Errors
    ///
    /// Only what `callback` returns. Filesystem errors go to the callback.
    pub fn walk<F, E>(self, callback: F) -> Result<(), E>
    where
        F: FnMut(Result<Entry, FfindError>) -> Result<WalkControl, E>,
    {
        drive(&mut self.recursive(), callback)
    }

    /// Drain the recursive traversal and summarise it.
    pub fn run(self) -> Results {
        let start = Instant::now();
        let root = self.root.clone();

        let mut entries = Vec::new();
        let mut errors = Vec::new();
        for item in self.recursive() {
            match item {
                Ok(entry) => entries.push(entry),
                Err(err) => errors.push(err),
            }
        }

        let duration = start.elapsed();
        debug!(
            "{}: {} entries, {} errors in {:?}",
            root.display(),
            entries.len(),
            errors.len(),
            duration
        );

        Results {
            stats: ScanStats::compute(&entries, duration),
            entries,
            errors,
        }
    }
}
