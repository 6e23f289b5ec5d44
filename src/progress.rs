//! Outward-facing progress notifications.
//!
//! The core only ever calls these methods; it never assumes who is
//! listening or on which execution context the listener runs.

use crate::search::SearchResult;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Notifications a search session emits toward its collaborator.
pub trait ProgressReporter: Send {
    /// Fired after each processed file. Percent and the running result
    /// count are monotonically non-decreasing within a session.
    fn progress(&self, percent: f64, results_so_far: usize);

    /// Fired exactly once per session, always last.
    fn completed(&self, result: SearchResult, was_stopped: bool);
}

/// Event form of the reporter calls, for channel transports.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    Progress { percent: f64, results_so_far: usize },
    Completed { result: SearchResult, was_stopped: bool },
}

/// Reporter that forwards every notification onto a crossbeam channel in
/// production order. The receiving side drains on whatever context owns
/// the presentation state.
#[derive(Clone)]
pub struct ChannelReporter {
    tx: Sender<SearchEvent>,
}

impl ChannelReporter {
    pub fn new() -> (Self, Receiver<SearchEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl ProgressReporter for ChannelReporter {
    fn progress(&self, percent: f64, results_so_far: usize) {
        // A dropped receiver just means nobody is watching anymore.
        let _ = self.tx.send(SearchEvent::Progress {
            percent,
            results_so_far,
        });
    }

    fn completed(&self, result: SearchResult, was_stopped: bool) {
        let _ = self.tx.send(SearchEvent::Completed {
            result,
            was_stopped,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_arrive_in_production_order() {
        let (reporter, events) = ChannelReporter::new();
        reporter.progress(50.0, 1);
        reporter.progress(100.0, 2);
        reporter.completed(SearchResult::default(), false);

        assert!(matches!(
            events.recv().unwrap(),
            SearchEvent::Progress { results_so_far: 1, .. }
        ));
        assert!(matches!(
            events.recv().unwrap(),
            SearchEvent::Progress { results_so_far: 2, .. }
        ));
        assert!(matches!(
            events.recv().unwrap(),
            SearchEvent::Completed { was_stopped: false, .. }
        ));
    }

    #[test]
    fn dropped_receiver_does_not_panic_the_reporter() {
        let (reporter, events) = ChannelReporter::new();
        drop(events);
        reporter.progress(10.0, 0);
        reporter.completed(SearchResult::default(), true);
    }
}
