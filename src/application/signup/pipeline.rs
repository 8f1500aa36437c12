//! Validation pipeline - derives the published validation state from the
//! form fields.
//!
//! Two background tasks run per form session:
//!
//! 1. **Availability worker** - watches the username, drops names that are
//!    too short, debounces the rest, skips a value identical to the last
//!    committed one and asks the [`AvailabilityChecker`]. Checks may overlap;
//!    each carries a generation token and only the latest generation's
//!    result is published. The published availability is shared through a
//!    `watch` channel so every consumer observes the same calls.
//! 2. **Derivation** - recomputes [`ValidationState`] whenever any field or
//!    the availability changes.
//!
//! Local rules are also re-derived synchronously on [`ValidationPipeline::refresh`],
//! so length and strength messages never wait for a task to be scheduled.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `debounce` | 800ms | Quiet period before a username is checked |
//! | `rules` | 3 / 8 | Minimum username and password lengths |

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use super::fields::FormFields;
use crate::domain::signup::{
    AvailabilityOutcome, FieldRules, FormInputs, UsernameAvailability, ValidationState,
};
use crate::ports::{AvailabilityChecker, PasswordStrengthScorer, RequestTokens};

/// Configuration for the validation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Quiet period a username must survive before it is checked.
    pub debounce: Duration,

    /// Minimum field lengths.
    pub rules: FieldRules,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(800),
            rules: FieldRules::default(),
        }
    }
}

impl PipelineConfig {
    /// Create config with a custom debounce period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Create config with custom field rules.
    pub fn with_rules(mut self, rules: FieldRules) -> Self {
        self.rules = rules;
        self
    }
}

/// Running pipeline for one form session.
///
/// Background tasks are aborted when the pipeline is dropped.
pub struct ValidationPipeline {
    deriver: Arc<StateDeriver>,
    availability: watch::Receiver<UsernameAvailability>,
    tasks: Vec<JoinHandle<()>>,
}

impl ValidationPipeline {
    /// Wires the pipeline onto `fields` and starts its tasks.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(
        fields: &FormFields,
        checker: Arc<dyn AvailabilityChecker>,
        scorer: Arc<dyn PasswordStrengthScorer>,
        config: PipelineConfig,
    ) -> Self {
        let (availability_tx, availability_rx) = watch::channel(UsernameAvailability::Unresolved);
        let (state_tx, _) = watch::channel(ValidationState::default());

        let deriver = Arc::new(StateDeriver {
            username: fields.username.subscribe(),
            password: fields.password.subscribe(),
            confirmation: fields.confirmation.subscribe(),
            availability: availability_rx.clone(),
            scorer,
            rules: config.rules,
            state: state_tx,
        });
        deriver.refresh();

        let worker = AvailabilityWorker {
            checker,
            rules: config.rules,
            debounce: config.debounce,
            tokens: RequestTokens::new(),
            publish: availability_tx,
            pending: None,
            last_committed: None,
            in_flight: FuturesUnordered::new(),
        };

        let tasks = vec![
            tokio::spawn(worker.run(fields.username.subscribe())),
            tokio::spawn(run_derivation(
                Arc::clone(&deriver),
                fields.username.subscribe(),
                fields.password.subscribe(),
                fields.confirmation.subscribe(),
                availability_rx.clone(),
            )),
        ];

        Self {
            deriver,
            availability: availability_rx,
            tasks,
        }
    }

    /// Re-derives the state from the current inputs and availability.
    pub fn refresh(&self) {
        self.deriver.refresh();
    }

    /// Latest published state.
    pub fn state(&self) -> ValidationState {
        self.deriver.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ValidationState> {
        self.deriver.state.subscribe()
    }

    /// Subscribes to the shared availability signal.
    pub fn availability(&self) -> watch::Receiver<UsernameAvailability> {
        self.availability.clone()
    }
}

impl Drop for ValidationPipeline {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Folds the latest inputs and availability into the published state.
struct StateDeriver {
    username: watch::Receiver<String>,
    password: watch::Receiver<String>,
    confirmation: watch::Receiver<String>,
    availability: watch::Receiver<UsernameAvailability>,
    scorer: Arc<dyn PasswordStrengthScorer>,
    rules: FieldRules,
    state: watch::Sender<ValidationState>,
}

impl StateDeriver {
    /// Publishes a new state if it differs from the current one.
    ///
    /// The state is derived while the channel is locked, so the last
    /// publisher always saw the newest inputs.
    fn refresh(&self) -> bool {
        self.state.send_if_modified(|state| {
            let next = self.derive();
            if *state == next {
                return false;
            }
            debug!(
                is_valid = next.is_valid,
                username_message = %next.username_message,
                password_message = %next.password_message,
                needs_update = next.needs_update,
                "Validation state changed"
            );
            *state = next;
            true
        })
    }

    fn derive(&self) -> ValidationState {
        let inputs = FormInputs::new(
            self.username.borrow().clone(),
            self.password.borrow().clone(),
            self.confirmation.borrow().clone(),
        );
        let strength = self.scorer.strength(&inputs.password);
        let availability = self.availability.borrow().clone();

        ValidationState::derive(&self.rules, &inputs, strength, &availability)
    }
}

async fn run_derivation(
    deriver: Arc<StateDeriver>,
    mut username: watch::Receiver<String>,
    mut password: watch::Receiver<String>,
    mut confirmation: watch::Receiver<String>,
    mut availability: watch::Receiver<UsernameAvailability>,
) {
    loop {
        let changed = tokio::select! {
            changed = username.changed() => changed,
            changed = password.changed() => changed,
            changed = confirmation.changed() => changed,
            changed = availability.changed() => changed,
        };
        if changed.is_err() {
            debug!("Form closed, stopping derivation");
            return;
        }
        deriver.refresh();
    }
}

/// A username waiting out the debounce period.
struct PendingCheck {
    username: String,
    deadline: Instant,
}

/// A finished check with the generation it was issued under.
struct CompletedCheck {
    generation: u64,
    outcome: AvailabilityOutcome,
}

struct AvailabilityWorker {
    checker: Arc<dyn AvailabilityChecker>,
    rules: FieldRules,
    debounce: Duration,
    tokens: RequestTokens,
    publish: watch::Sender<UsernameAvailability>,
    pending: Option<PendingCheck>,
    last_committed: Option<String>,
    in_flight: FuturesUnordered<BoxFuture<'static, CompletedCheck>>,
}

impl AvailabilityWorker {
    async fn run(mut self, mut username: watch::Receiver<String>) {
        let initial = username.borrow_and_update().clone();
        self.on_username(initial);

        loop {
            let deadline = self.pending.as_ref().map(|pending| pending.deadline);

            tokio::select! {
                changed = username.changed() => {
                    if changed.is_err() {
                        debug!("Username stream closed, stopping availability checks");
                        return;
                    }
                    let value = username.borrow_and_update().clone();
                    self.on_username(value);
                }
                () = wait_until(deadline) => self.commit(),
                Some(completed) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.apply(completed);
                }
            }
        }
    }

    /// Restarts the debounce, or cancels it for a name that is too short.
    fn on_username(&mut self, username: String) {
        if !self.rules.username_length_valid(&username) {
            if self.pending.take().is_some() {
                debug!(username = %username, "Username too short, pending check cancelled");
            }
            return;
        }

        self.pending = Some(PendingCheck {
            username,
            deadline: Instant::now() + self.debounce,
        });
    }

    /// Issues the check for the debounced username.
    fn commit(&mut self) {
        let Some(PendingCheck { username, .. }) = self.pending.take() else {
            return;
        };

        if self.last_committed.as_deref() == Some(username.as_str()) {
            debug!(username = %username, "Username unchanged since last check, skipping");
            return;
        }
        self.last_committed = Some(username.clone());

        let token = self.tokens.issue();
        let generation = token.generation();
        let checker = Arc::clone(&self.checker);
        debug!(username = %username, generation, "Checking username availability");

        self.in_flight.push(Box::pin(async move {
            let result = checker.check_availability_until(&username, token).await;
            CompletedCheck {
                generation,
                outcome: AvailabilityOutcome::new(username, result),
            }
        }));
    }

    /// Publishes a finished check unless a newer one has been issued.
    fn apply(&mut self, completed: CompletedCheck) {
        let CompletedCheck {
            generation,
            outcome,
        } = completed;

        if !self.tokens.is_latest(generation) {
            debug!(
                username = %outcome.username,
                generation,
                "Discarding superseded availability result"
            );
            return;
        }

        debug!(
            username = %outcome.username,
            generation,
            result = ?outcome.result,
            "Username availability resolved"
        );
        self.publish
            .send_replace(UsernameAvailability::Resolved(outcome));
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
