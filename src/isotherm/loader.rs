//! Background isotherm resolution.
//!
//! Each activation spawns one worker per gas slot, which fetches every
//! reference on its own scoped thread. Workers only call the fetch
//! collaborator and send results over a channel; the owning control
//! loop drains the channel and is the only place curve sets change.
//! Every message carries the generation it was issued for, so results for
//! a superseded selection are discarded on arrival.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::data::gas::GasSlot;
use crate::isotherm::{FetchedIsotherm, IsothermFetch};

/// Messages sent from workers back to the control loop.
enum LoaderMessage {
    Curve {
        generation: u64,
        slot: GasSlot,
        reference: String,
        isotherm: FetchedIsotherm,
    },
    Finished {
        generation: u64,
        slot: GasSlot,
    },
}

/// A resolved isotherm for the current generation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderEvent {
    pub slot: GasSlot,
    pub reference: String,
    pub isotherm: FetchedIsotherm,
}

pub struct IsothermLoader {
    fetcher: Arc<dyn IsothermFetch>,
    tx: Sender<LoaderMessage>,
    rx: Receiver<LoaderMessage>,
    /// Shared with workers so they can stop early once superseded.
    generation: Arc<AtomicU64>,
    in_flight: usize,
}

impl IsothermLoader {
    pub fn new(fetcher: Arc<dyn IsothermFetch>) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        Self {
            fetcher,
            tx,
            rx,
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Abandon all in-flight work. Late results will be discarded.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.in_flight = 0;
    }

    /// Whether workers of the current generation are still running.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Resolve `references` for `slot` in the background, tagged with the
    /// current generation. Each reference is fetched on its own thread, so
    /// curves arrive in completion order.
    pub fn start(&mut self, slot: GasSlot, references: Vec<String>) {
        if references.is_empty() {
            return;
        }
        let generation = self.generation();
        let current = Arc::clone(&self.generation);
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("isotherm-{}-{:?}", generation, slot))
            .spawn(move || {
                std::thread::scope(|scope| {
                    for reference in references {
                        let (current, fetcher, tx) = (&current, &fetcher, tx.clone());
                        scope.spawn(move || {
                            if current.load(Ordering::Acquire) != generation {
                                debug!(generation, ?slot, "isotherm fetch superseded");
                                return;
                            }
                            let Some(isotherm) = fetcher.fetch(&reference) else {
                                debug!(%reference, "isotherm reference has no usable curve");
                                return;
                            };
                            let _ = tx.send(LoaderMessage::Curve {
                                generation,
                                slot,
                                reference,
                                isotherm,
                            });
                        });
                    }
                });
                let _ = tx.send(LoaderMessage::Finished { generation, slot });
            });
        match spawned {
            Ok(_) => self.in_flight += 1,
            Err(e) => warn!(error = %e, ?slot, "failed to spawn isotherm worker"),
        }
    }

    /// Turn a message into an event for the current generation, if it is one.
    fn accept(&mut self, msg: LoaderMessage) -> Option<LoaderEvent> {
        let current = self.generation();
        match msg {
            LoaderMessage::Curve {
                generation,
                slot,
                reference,
                isotherm,
            } => {
                if generation != current {
                    debug!(generation, current, %reference, "discarding stale isotherm");
                    return None;
                }
                Some(LoaderEvent {
                    slot,
                    reference,
                    isotherm,
                })
            }
            LoaderMessage::Finished { generation, slot } => {
                if generation == current {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    debug!(generation, ?slot, "isotherm worker finished");
                }
                None
            }
        }
    }

    /// Next resolved curve without blocking.
    pub fn try_next(&mut self) -> Option<LoaderEvent> {
        while let Ok(msg) = self.rx.try_recv() {
            if let Some(event) = self.accept(msg) {
                return Some(event);
            }
        }
        None
    }

    /// Next resolved curve, waiting up to `timeout` while workers are running.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<LoaderEvent> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(event) = self.try_next() {
                return Some(event);
            }
            if !self.is_loading() {
                return None;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(msg) => {
                    if let Some(event) = self.accept(msg) {
                        return Some(event);
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iso(label: &str) -> FetchedIsotherm {
        FetchedIsotherm {
            label: label.to_string(),
            loading: vec![1.0],
            pressure: vec![1.0],
            source_url: None,
            temperature: None,
        }
    }

    #[test]
    fn drains_results_then_goes_idle() {
        let fetcher = |r: &str| (r != "bad").then(|| iso(r));
        let mut loader = IsothermLoader::new(Arc::new(fetcher));
        loader.start(GasSlot::First, vec!["a".into(), "bad".into(), "b".into()]);
        let mut got = Vec::new();
        while let Some(ev) = loader.next_timeout(Duration::from_secs(5)) {
            got.push(ev.reference);
        }
        got.sort();
        assert_eq!(got, vec!["a".to_string(), "b".to_string()]);
        assert!(!loader.is_loading());
    }

    #[test]
    fn slow_reference_does_not_hold_back_the_rest() {
        let fetcher = |r: &str| {
            if r == "slow" {
                std::thread::sleep(Duration::from_millis(500));
            }
            Some(iso(r))
        };
        let mut loader = IsothermLoader::new(Arc::new(fetcher));
        loader.start(GasSlot::First, vec!["slow".into(), "fast".into()]);
        let first = loader.next_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(first.reference, "fast");
        let second = loader.next_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(second.reference, "slow");
        assert!(loader.next_timeout(Duration::from_secs(5)).is_none());
        assert!(!loader.is_loading());
    }

    #[test]
    fn empty_reference_list_spawns_nothing() {
        let mut loader = IsothermLoader::new(Arc::new(|_: &str| -> Option<FetchedIsotherm> { None }));
        loader.start(GasSlot::Second, Vec::new());
        assert!(!loader.is_loading());
    }
}
