//! Built-in [`SortFn`] implementations.

use std::cmp::Ordering;

use crate::entry::Entry;
use crate::traits::SortFn;

/// Leaves children in the order the OS listed them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSort;

impl SortFn for NoSort {
    fn sort(&self, _entries: &mut [Entry]) {}
}

/// Byte-wise by file name. The default, and what makes traversals repeatable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByName;

impl SortFn for ByName {
    fn sort(&self, entries: &mut [Entry]) {
        entries.sort_by(compare_names);
    }
}

/// Directories first, then everything else; each group by name.
///
/// Classification uses the non-following stat, so a symlink to a directory
/// sorts with the files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirsFirst;

impl SortFn for DirsFirst {
    fn sort(&self, entries: &mut [Entry]) {
        entries.sort_by(|a, b| b.is_dir().cmp(&a.is_dir()).then_with(|| compare_names(a, b)));
    }
}

fn compare_names(a: &Entry, b: &Entry) -> Ordering {
    match (a.path.file_name(), b.path.file_name()) {
        (Some(x), Some(y)) => x.cmp(y),
        _ => a.name.cmp(&b.name),
    }
}
