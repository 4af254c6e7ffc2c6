//! Threaded delivery with a bounded queue.
//!
//! The enumerators are plain iterators and already never run ahead of their
//! consumer. [`spawn`] moves one onto its own producer thread for callers
//! that want traversal I/O to overlap with their own work. The queue between
//! the two is bounded, so a slow consumer stalls the producer instead of
//! letting results pile up.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

use tracing::debug;

use crate::entry::Entry;
use crate::error::FfindError;

/// Receiving end of a spawned traversal. Yields items in producer order.
///
/// Dropping it abandons the traversal: the producer exits the next time it
/// tries to hand over an item.
pub struct Stream {
    rx: Receiver<Result<Entry, FfindError>>,
}

/// Run `walk` on a new thread, handing items over through a queue that holds
/// at most `capacity` of them. A capacity of 0 makes every hand-over a
/// rendezvous with the consumer.
pub fn spawn<I>(walk: I, capacity: usize) -> Stream
where
    I: Iterator<Item = Result<Entry, FfindError>> + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(capacity);
    thread::spawn(move || produce(walk, tx));
    Stream { rx }
}

fn produce<I>(walk: I, tx: SyncSender<Result<Entry, FfindError>>)
where
    I: Iterator<Item = Result<Entry, FfindError>>,
{
    for item in walk {
        if tx.send(item).is_err() {
            debug!("consumer went away, abandoning traversal");
            return;
        }
    }
}

impl Iterator for Stream {
    type Item = Result<Entry, FfindError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.recv().ok()
    }
}
