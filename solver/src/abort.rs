use crossbeam::atomic::AtomicCell;

use super::Rank;

/// Shared by every rank of a run. Holds the first rank that failed; the others stop once
/// they run out of work instead of polling for answers that will never come.
#[derive(Debug, Default)]
pub struct Abort {
    failed: AtomicCell<Option<Rank>>,
}

impl Abort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `rank` as failed. Only the first failure sticks; returns whether it was this one.
    pub fn raise(&self, rank: Rank) -> bool {
        self.failed.compare_exchange(None, Some(rank)).is_ok()
    }

    pub fn raised(&self) -> Option<Rank> {
        self.failed.load()
    }

    pub fn watch(&self, rank: Rank) -> AbortWatch<'_> {
        AbortWatch { abort: self, rank }
    }
}

/// One rank's handle on the shared [`Abort`]. Raises it if dropped while the rank's thread
/// is unwinding from a panic.
#[derive(Debug)]
pub struct AbortWatch<'a> {
    abort: &'a Abort,
    rank: Rank,
}

impl AbortWatch<'_> {
    pub fn raise(&self) -> bool {
        self.abort.raise(self.rank)
    }

    pub fn raised(&self) -> Option<Rank> {
        self.abort.raised()
    }
}

impl Drop for AbortWatch<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.abort.raise(self.rank);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failure_sticks() {
        let abort = Abort::new();

        assert_eq!(abort.raised(), None);
        assert!(abort.raise(2));
        assert!(!abort.raise(0));
        assert_eq!(abort.raised(), Some(2));
    }

    #[test]
    fn test_watch_raises_on_panic() {
        let abort = Abort::new();

        let result = crossbeam::scope(|s| {
            s.spawn(|_| {
                let _watch = abort.watch(3);
                panic!("rank 3 went down");
            })
            .join()
        })
        .unwrap();

        assert!(result.is_err());
        assert_eq!(abort.raised(), Some(3));
    }

    #[test]
    fn test_watch_dropped_normally_does_not_raise() {
        let abort = Abort::new();

        drop(abort.watch(1));

        assert_eq!(abort.raised(), None);
    }
}
