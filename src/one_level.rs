use std::mem;
use std::sync::Arc;
use std::vec;

use tracing::debug;

use crate::entry::Entry;
use crate::error::FfindError;
use crate::probe::{read_dir, resolve_target};
use crate::traits::SortFn;

/// Lazy listing of a single probed entry.
///
/// - an entry that failed to probe yields its error and ends;
/// - a directory (or, when following, a symlink resolving to one) yields its
///   children in [`SortFn`] order, with paths anchored at the entry's own
///   path rather than the resolved target;
/// - anything else yields the entry itself.
///
/// A failure to resolve the link or read the directory yields that error
/// alone: no partial listing is ever produced. Nothing touches the
/// filesystem until the first call to `next`.
pub struct ListOneLevel {
    follow: bool,
    sort: Arc<dyn SortFn>,
    state: State,
}

enum State {
    Start(Result<Entry, FfindError>),
    Listing(vec::IntoIter<Entry>),
    Done,
}

enum Opened {
    Single(Result<Entry, FfindError>),
    Children(Vec<Entry>),
}

impl ListOneLevel {
    pub(crate) fn new(start: Result<Entry, FfindError>, follow: bool, sort: Arc<dyn SortFn>) -> Self {
        Self {
            follow,
            sort,
            state: State::Start(start),
        }
    }

    fn open(&self, entry: Entry) -> Opened {
        let is_dir = if self.follow && entry.is_symlink() {
            match resolve_target(&entry.path, entry.depth) {
                Ok(target) => target.is_dir(),
                Err(err) => return Opened::Single(Err(err)),
            }
        } else {
            entry.is_dir()
        };

        if !is_dir {
            return Opened::Single(Ok(entry));
        }

        debug!("listing {}", entry.path.display());
        match read_dir(&entry.path, entry.depth + 1) {
            Ok(mut children) => {
                self.sort.sort(&mut children);
                Opened::Children(children)
            }
            Err(err) => Opened::Single(Err(err)),
        }
    }
}

impl Iterator for ListOneLevel {
    type Item = Result<Entry, FfindError>;

    fn next(&mut self) -> Option<Self::Item> {
        match mem::replace(&mut self.state, State::Done) {
            State::Done => None,
            State::Start(Err(err)) => Some(Err(err)),
            State::Start(Ok(entry)) => match self.open(entry) {
                Opened::Single(item) => Some(item),
                Opened::Children(children) => {
                    self.state = State::Listing(children.into_iter());
                    self.next()
                }
            },
            State::Listing(mut children) => {
                let child = children.next()?;
                self.state = State::Listing(children);
                Some(Ok(child))
            }
        }
    }
}
