//! Status-callback trait for intake lifecycle events.
//!
//! Inject an [`Arc<dyn IntakeProgressCallback>`] via
//! [`crate::config::IntakeConfigBuilder::status_callback`] to observe the
//! workflow in real time: state transitions, the human-readable status line
//! ("Uploading document..." / "Processing document..."), and its dismissal.
//!
//! Events are observational only. Outcomes (the parsed result or a typed
//! error) always come back through the `submit` return value, so the core
//! never depends on a blocking UI primitive to report anything.
//!
//! Ordering is guaranteed: `on_status("Uploading document...")` fires before
//! the request is dispatched, `on_status("Processing document...")` only
//! after a successful (2xx) response has been received, never interleaved
//! or reordered.

use crate::result::ProcessingResult;
use crate::workflow::WorkflowState;
use std::sync::Arc;

/// Called by [`crate::workflow::IntakeSession`] as the workflow advances.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. `Send + Sync` so a callback can be shared with a
/// spawned task driving the UI.
pub trait IntakeProgressCallback: Send + Sync {
    /// A workflow state transition.
    fn on_state_change(&self, from: WorkflowState, to: WorkflowState) {
        let _ = (from, to);
    }

    /// A candidate file passed validation and is now held by the session.
    ///
    /// # Arguments
    /// * `name` — the filename as it will appear in the multipart part
    /// * `size_display` — human-readable size, e.g. `"1.5 KB"`
    fn on_file_selected(&self, name: &str, size_display: &str) {
        let _ = (name, size_display);
    }

    /// The in-progress status line changed.
    fn on_status(&self, message: &str) {
        let _ = message;
    }

    /// The in-progress status line should be hidden (the submission
    /// finished, successfully or not).
    fn on_status_dismissed(&self) {}

    /// A submission finished successfully and its result is stored.
    ///
    /// Fires after [`on_status_dismissed`](Self::on_status_dismissed).
    fn on_completed(&self, result: &ProcessingResult) {
        let _ = result;
    }
}

/// A no-op implementation for callers that don't need status events.
pub struct NoopProgressCallback;

impl IntakeProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::IntakeConfig`].
pub type StatusCallback = Arc<dyn IntakeProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCallback {
        events: Mutex<Vec<String>>,
    }

    impl IntakeProgressCallback for RecordingCallback {
        fn on_state_change(&self, from: WorkflowState, to: WorkflowState) {
            self.events.lock().unwrap().push(format!("{from}->{to}"));
        }
        fn on_file_selected(&self, name: &str, size_display: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("selected {name} ({size_display})"));
        }
        fn on_status(&self, message: &str) {
            self.events.lock().unwrap().push(message.to_string());
        }
        fn on_status_dismissed(&self) {
            self.events.lock().unwrap().push("dismissed".to_string());
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_state_change(WorkflowState::Idle, WorkflowState::FileSelected);
        cb.on_file_selected("doc.pdf", "1.5 KB");
        cb.on_status("Uploading document...");
        cb.on_status_dismissed();
    }

    #[test]
    fn recording_callback_receives_events_in_order() {
        let cb = RecordingCallback::default();
        cb.on_file_selected("doc.pdf", "1 KB");
        cb.on_status("Uploading document...");
        cb.on_status("Processing document...");
        cb.on_status_dismissed();

        let events = cb.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "selected doc.pdf (1 KB)",
                "Uploading document...",
                "Processing document...",
                "dismissed",
            ]
        );
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: StatusCallback = Arc::new(NoopProgressCallback);
        cb.on_status("Uploading document...");
    }
}
