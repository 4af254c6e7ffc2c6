use crate::entry::Entry;

/// Decides which names the recursive traversal skips and which it reports.
///
/// Consulted at every directory level, never mutated by the traversal.
/// Implementations should be pure functions of their input.
///
/// # Thread Safety
///
/// `Send + Sync` are required — a matcher is shared by every level of a
/// traversal and may travel to a producer thread with
/// [`spawn`](crate::stream::spawn).
///
/// # Example
///
/// ```rust
/// use ffind::FileMatcher;
///
/// /// Rust sources only, and never look inside `target/`.
/// struct RustSources;
///
/// impl FileMatcher for RustSources {
///     fn skip_directory_name(&self, name: &str) -> bool {
///         name == "target"
///     }
///     fn match_file_name(&self, name: &str) -> bool {
///         name.ends_with(".rs")
///     }
/// }
/// ```
pub trait FileMatcher: Send + Sync {
    /// `true` prunes the directory: no result for it and no descent.
    fn skip_directory_name(&self, _name: &str) -> bool {
        false
    }

    /// `true` keeps directories out of the results while still descending.
    fn skip_directory_results(&self) -> bool {
        false
    }

    /// `true` keeps every non-directory out of the results.
    fn skip_file_results(&self) -> bool {
        false
    }

    /// `true` keeps this non-directory out of the results.
    fn skip_file_name(&self, _name: &str) -> bool {
        false
    }

    /// Final say on a non-directory that was not skipped.
    fn match_file_name(&self, _name: &str) -> bool {
        true
    }
}

/// Orders one directory's children before any of them is enumerated.
///
/// Invoked exactly once per directory listing. Any
/// `Fn(&mut [Entry]) + Send + Sync` closure is a `SortFn`:
///
/// ```rust
/// use ffind::Entry;
///
/// let largest_first = |entries: &mut [Entry]| {
///     entries.sort_by(|a, b| b.size().cmp(&a.size()));
/// };
/// let _stream = ffind::list_one_level(".", false, largest_first);
/// ```
pub trait SortFn: Send + Sync {
    fn sort(&self, entries: &mut [Entry]);
}

impl<F> SortFn for F
where
    F: Fn(&mut [Entry]) + Send + Sync,
{
    fn sort(&self, entries: &mut [Entry]) {
        self(entries)
    }
}
