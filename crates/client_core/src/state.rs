use shared::protocol::{BaseCandidate, CandidateData};
use tokio::sync::watch;

/// A mutable reactive cell. Reads clone the current value, writes replace it
/// wholesale (last write wins), and any number of subscribers observe
/// changes. Works fine with zero subscribers.
pub struct Store<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        self.tx.send_modify(mutate);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Shared state of the candidate session: the base application record and
/// the full form contents. Handed to consumers explicitly (usually behind an
/// `Arc`) rather than living as a module-level global.
#[derive(Default)]
pub struct CandidateState {
    pub base: Store<BaseCandidate>,
    pub details: Store<CandidateData>,
}

impl CandidateState {
    /// Returns both containers to their pristine logged-out defaults.
    pub fn reset(&self) {
        self.base.set(BaseCandidate::default());
        self.details.set(CandidateData::default());
    }
}
