//! Lifecycle notifications of the overlap animation.

/// Receives overlap lifecycle notifications. Every method defaults to a no-op so
/// implementors only override what they need.
///
/// Notifications are delivered synchronously on the thread driving the container and
/// must not panic.
pub trait OverlapListener {
    /// A run started (fresh or resumed).
    fn on_overlap_started(&mut self) {}

    /// The panel reached its full extent.
    fn on_overlap_completed(&mut self) {}

    /// The container was torn down mid-run. The overlap counts as done.
    fn on_overlap_cancelled(&mut self) {}
}

/// Callback for an overlap notification
pub type OverlapCallback = Box<dyn FnMut()>;

/// Closure-based listener.
///
/// ```ignore
/// layout.set_listener(OverlapCallbacks::new().on_completed(|| log::info!("revealed")));
/// ```
#[derive(Default)]
pub struct OverlapCallbacks {
    started: Option<OverlapCallback>,
    completed: Option<OverlapCallback>,
    cancelled: Option<OverlapCallback>,
}

impl OverlapCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_started<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.started = Some(Box::new(callback));
        self
    }

    pub fn on_completed<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.completed = Some(Box::new(callback));
        self
    }

    pub fn on_cancelled<F: FnMut() + 'static>(mut self, callback: F) -> Self {
        self.cancelled = Some(Box::new(callback));
        self
    }
}

impl OverlapListener for OverlapCallbacks {
    fn on_overlap_started(&mut self) {
        if let Some(callback) = self.started.as_mut() {
            callback();
        }
    }

    fn on_overlap_completed(&mut self) {
        if let Some(callback) = self.completed.as_mut() {
            callback();
        }
    }

    fn on_overlap_cancelled(&mut self) {
        if let Some(callback) = self.cancelled.as_mut() {
            callback();
        }
    }
}
