//! Field streams - the mutable form inputs as observable values.

use tokio::sync::watch;

/// One mutable input exposed as a live value.
///
/// Every `set` notifies subscribers, even when the value is unchanged;
/// consumers that care about distinct values filter themselves.
#[derive(Debug)]
pub struct FieldStream {
    value: watch::Sender<String>,
}

impl FieldStream {
    /// Creates a field holding `initial`.
    pub fn new(initial: impl Into<String>) -> Self {
        let (value, _) = watch::channel(initial.into());
        Self { value }
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: impl Into<String>) {
        self.value.send_replace(value.into());
    }

    /// Current value.
    pub fn current(&self) -> String {
        self.value.borrow().clone()
    }

    /// Subscribes to changes; the current value counts as already seen.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.value.subscribe()
    }
}

impl Default for FieldStream {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// The three inputs of the sign-up form.
#[derive(Debug, Default)]
pub struct FormFields {
    pub username: FieldStream,
    pub password: FieldStream,
    pub confirmation: FieldStream,
}

impl FormFields {
    /// Creates empty fields.
    pub fn new() -> Self {
        Self::default()
    }
}
