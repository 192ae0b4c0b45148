use smallvec::SmallVec;
use std::fmt;

/// Handle to an external event registration.
///
/// The revoke action runs exactly once: on [`Subscription::revoke`] or on
/// drop, whichever comes first.
pub struct Subscription {
    label: &'static str,
    revoke: Option<Box<dyn FnOnce()>>,
}

/// Listener handles held by one session; two (pointer, resize) in practice.
pub type Subscriptions = SmallVec<[Subscription; 2]>;

impl Subscription {
    pub fn new(label: &'static str, revoke: impl FnOnce() + 'static) -> Self {
        Self {
            label,
            revoke: Some(Box::new(revoke)),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn revoke(mut self) {
        self.run_revoke();
    }

    /// Keep the registration for the rest of the page's life.
    pub fn detach(mut self) {
        if let Some(f) = self.revoke.take() {
            std::mem::forget(f);
        }
    }

    fn run_revoke(&mut self) {
        if let Some(f) = self.revoke.take() {
            log::debug!("[subscription] revoking {}", self.label);
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_revoke();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("active", &self.revoke.is_some())
            .finish()
    }
}
