//! Submission lifecycle of a single contact form.
//!
//! ```text
//! Idle -> Pending -> Succeeded | Failed -> Idle
//! ```
//!
//! A result returns to `Idle` when it is dismissed. A new submission moves it
//! straight back to `Pending`.

use std::sync::Arc;

use folio_core_contact_contracts::{ContactForm, MailSender, SubmitOutcome};
use folio_models::contact::{ContactFormFields, ContactFormInput, SubmissionState};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct ContactSubmissionFlow<Sender> {
    sender: Sender,
    form: watch::Sender<ContactForm>,
}

impl<Sender> ContactSubmissionFlow<Sender>
where
    Sender: MailSender,
{
    pub fn new(sender: Sender) -> Self {
        Self {
            sender,
            form: watch::Sender::new(ContactForm::default()),
        }
    }

    /// Receive every change of the form, including state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ContactForm> {
        self.form.subscribe()
    }

    pub fn snapshot(&self) -> ContactForm {
        self.form.borrow().clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.form.borrow().state.clone()
    }

    pub fn can_submit(&self) -> bool {
        self.form.borrow().can_submit()
    }

    pub fn set_fields(&self, fields: ContactFormFields) {
        self.update_fields(|current| *current = fields);
    }

    /// Apply a user edit. The errors of edited fields are cleared.
    pub fn update_fields(&self, f: impl FnOnce(&mut ContactFormFields)) {
        self.form.send_if_modified(|form| {
            let before = form.fields.clone();
            f(&mut form.fields);
            if form.fields == before {
                return false;
            }
            if form.fields.name != before.name {
                form.errors.name = None;
            }
            if form.fields.email != before.email {
                form.errors.email = None;
            }
            if form.fields.message != before.message {
                form.errors.message = None;
            }
            true
        });
    }

    /// Validate the current fields and submit them.
    ///
    /// Invalid fields are recorded as field errors and nothing is sent.
    pub async fn submit(&self) -> SubmitOutcome {
        match self.begin(None) {
            Ok(input) => self.deliver(input).await,
            Err(outcome) => outcome,
        }
    }

    /// Send an already validated submission.
    ///
    /// Exactly one message is sent per call, unless another submission is
    /// still pending, in which case nothing happens.
    pub async fn on_submit(&self, input: ContactFormInput) -> SubmitOutcome {
        match self.begin(Some(input)) {
            Ok(input) => self.deliver(input).await,
            Err(outcome) => outcome,
        }
    }

    /// Move to `Pending` unless a submission is already in flight.
    ///
    /// Checking the state, validating and entering `Pending` happen in a single
    /// update of the form, so racing submits cannot both get through.
    fn begin(&self, input: Option<ContactFormInput>) -> Result<ContactFormInput, SubmitOutcome> {
        let mut result = Err(SubmitOutcome::Ignored);
        self.form.send_if_modified(|form| {
            if form.state.is_pending() {
                return false;
            }
            let input = match input.map_or_else(|| form.fields.validate(), Ok) {
                Ok(input) => input,
                Err(errors) => {
                    form.errors = errors;
                    if form.state.has_result() {
                        form.state = SubmissionState::Idle;
                    }
                    result = Err(SubmitOutcome::Invalid(errors));
                    return true;
                }
            };
            form.errors = Default::default();
            form.state = SubmissionState::Pending;
            result = Ok(input);
            true
        });

        match &result {
            Err(SubmitOutcome::Ignored) => debug!("ignoring submit while a message is pending"),
            Err(SubmitOutcome::Invalid(errors)) => debug!(?errors, "contact form is invalid"),
            Ok(_) => debug!("contact form is pending"),
            Err(_) => {}
        }
        result
    }

    async fn deliver(&self, input: ContactFormInput) -> SubmitOutcome {
        match self.sender.send(&input).await {
            Ok(()) => {
                info!("contact message sent");
                self.form.send_modify(|form| {
                    form.fields = Default::default();
                    form.errors = Default::default();
                    form.state = SubmissionState::Succeeded;
                });
                SubmitOutcome::Succeeded
            }
            Err(failure) => {
                warn!(reason = %failure, "failed to send contact message");
                self.form
                    .send_modify(|form| form.state = SubmissionState::Failed(failure.0.clone()));
                SubmitOutcome::Failed(failure)
            }
        }
    }

    /// Close the success or failure notice. Returns whether anything changed.
    pub fn dismiss_result(&self) -> bool {
        self.form.send_if_modified(|form| {
            if !form.state.has_result() {
                return false;
            }
            form.state = SubmissionState::Idle;
            true
        })
    }

    /// Run [`submit`](Self::submit) as a separate task.
    pub fn spawn_submit(self: &Arc<Self>) -> JoinHandle<SubmitOutcome> {
        let flow = Arc::clone(self);
        tokio::spawn(async move { flow.submit().await })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    use folio_core_contact_contracts::{MockMailSender, SendFailure};
    use folio_models::contact::{ContactFormErrors, FieldError};
    use pretty_assertions::assert_eq;
    use tokio::sync::Notify;

    use super::*;

    fn jane() -> ContactFormFields {
        ContactFormFields {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            message: "Hi".into(),
        }
    }

    fn jane_input() -> ContactFormInput {
        jane().validate().unwrap()
    }

    /// Blocks every send until released and counts the calls.
    #[derive(Clone, Default)]
    struct GatedSender(Arc<Gate>);

    #[derive(Default)]
    struct Gate {
        calls: AtomicUsize,
        release: Notify,
    }

    impl GatedSender {
        fn release(&self) {
            self.0.release.notify_one();
        }

        fn calls(&self) -> usize {
            self.0.calls.load(Ordering::SeqCst)
        }
    }

    impl MailSender for GatedSender {
        async fn send(&self, _input: &ContactFormInput) -> Result<(), SendFailure> {
            self.0.calls.fetch_add(1, Ordering::SeqCst);
            self.0.release.notified().await;
            Ok(())
        }
    }

    /// Answers the sends with the given results, in order.
    struct ScriptedSender(Mutex<VecDeque<Result<(), SendFailure>>>);

    impl ScriptedSender {
        fn new(results: impl IntoIterator<Item = Result<(), SendFailure>>) -> Self {
            Self(Mutex::new(results.into_iter().collect()))
        }
    }

    impl MailSender for ScriptedSender {
        async fn send(&self, input: &ContactFormInput) -> Result<(), SendFailure> {
            assert_eq!(*input, jane_input());
            self.0.lock().unwrap().pop_front().unwrap()
        }
    }

    #[tokio::test]
    async fn success_clears_fields() {
        // Arrange
        let sender = MockMailSender::new().with_send(jane_input(), Ok(()));
        let sut = ContactSubmissionFlow::new(sender);
        sut.set_fields(jane());

        let mut rx = sut.subscribe();
        rx.mark_unchanged();

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Succeeded);
        assert_eq!(
            sut.snapshot(),
            ContactForm {
                fields: Default::default(),
                errors: Default::default(),
                state: SubmissionState::Succeeded,
            }
        );
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn failure_preserves_fields() {
        // Arrange
        let sender = MockMailSender::new()
            .with_send(jane_input(), Err(SendFailure("rate limited".into())));
        let sut = ContactSubmissionFlow::new(sender);
        sut.set_fields(jane());

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Failed("rate limited".into()));
        assert_eq!(
            sut.snapshot(),
            ContactForm {
                fields: jane(),
                errors: Default::default(),
                state: SubmissionState::Failed("rate limited".into()),
            }
        );
        assert!(sut.can_submit());
    }

    #[tokio::test]
    async fn empty_email_is_not_sent() {
        // Arrange
        let sut = ContactSubmissionFlow::new(MockMailSender::new());
        sut.set_fields(ContactFormFields {
            email: String::new(),
            ..jane()
        });

        // Act
        let result = sut.submit().await;

        // Assert
        let errors = ContactFormErrors {
            email: Some(FieldError::Required),
            ..Default::default()
        };
        assert_eq!(result, SubmitOutcome::Invalid(errors));
        assert_eq!(sut.state(), SubmissionState::Idle);
        assert_eq!(sut.snapshot().errors, errors);
    }

    #[tokio::test]
    async fn invalid_submit_after_failure_returns_to_idle() {
        // Arrange
        let sender = ScriptedSender::new([Err("rate limited".into())]);
        let sut = ContactSubmissionFlow::new(sender);
        sut.set_fields(jane());
        sut.submit().await;
        sut.update_fields(|fields| fields.email.clear());

        // Act
        let result = sut.submit().await;

        // Assert
        let errors = ContactFormErrors {
            email: Some(FieldError::Required),
            ..Default::default()
        };
        assert_eq!(result, SubmitOutcome::Invalid(errors));
        assert_eq!(
            sut.snapshot(),
            ContactForm {
                fields: ContactFormFields {
                    email: String::new(),
                    ..jane()
                },
                errors,
                state: SubmissionState::Idle,
            }
        );
    }

    #[tokio::test]
    async fn invalid_submit_after_success_returns_to_idle() {
        // Arrange
        let sender = MockMailSender::new().with_send(jane_input(), Ok(()));
        let sut = ContactSubmissionFlow::new(sender);
        sut.set_fields(jane());
        sut.submit().await;

        // Act
        let result = sut.submit().await;

        // Assert
        assert!(matches!(result, SubmitOutcome::Invalid(_)));
        assert_eq!(sut.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn editing_a_field_clears_its_error() {
        // Arrange
        let sut = ContactSubmissionFlow::new(MockMailSender::new());
        sut.set_fields(ContactFormFields::default());
        sut.submit().await;

        // Act
        sut.update_fields(|fields| fields.email = "jane@example.com".into());

        // Assert
        assert_eq!(
            sut.snapshot().errors,
            ContactFormErrors {
                name: Some(FieldError::Required),
                email: None,
                message: Some(FieldError::Required),
            }
        );
    }

    #[tokio::test]
    async fn transitions_through_pending() {
        // Arrange
        let sender = GatedSender::default();
        let sut = Arc::new(ContactSubmissionFlow::new(sender.clone()));
        sut.set_fields(jane());
        let mut rx = sut.subscribe();

        // Act
        let task = sut.spawn_submit();
        rx.wait_for(|form| form.state.is_pending()).await.unwrap();

        // Assert
        assert!(!sut.can_submit());
        assert!(!sut.dismiss_result());
        assert_eq!(sut.state(), SubmissionState::Pending);

        sender.release();
        assert_eq!(task.await.unwrap(), SubmitOutcome::Succeeded);
        assert_eq!(sut.state(), SubmissionState::Succeeded);
    }

    #[tokio::test]
    async fn submit_while_pending_is_ignored() {
        // Arrange
        let sender = GatedSender::default();
        let sut = Arc::new(ContactSubmissionFlow::new(sender.clone()));
        sut.set_fields(jane());
        let mut rx = sut.subscribe();

        let first = sut.spawn_submit();
        rx.wait_for(|form| form.state.is_pending()).await.unwrap();

        // Act
        let second = sut.submit().await;
        let third = sut.on_submit(jane_input()).await;

        // Assert
        assert_eq!(second, SubmitOutcome::Ignored);
        assert_eq!(third, SubmitOutcome::Ignored);

        sender.release();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Succeeded);
        assert_eq!(sender.calls(), 1);
    }

    #[tokio::test]
    async fn racing_submits_send_once() {
        // Arrange
        let sender = GatedSender::default();
        let sut = Arc::new(ContactSubmissionFlow::new(sender.clone()));
        sut.set_fields(jane());
        let mut rx = sut.subscribe();

        // Act
        let tasks = (0..8).map(|_| sut.spawn_submit()).collect::<Vec<_>>();
        rx.wait_for(|form| form.state.is_pending()).await.unwrap();
        sender.release();

        let mut outcomes = Vec::new();
        for task in tasks {
            outcomes.push(task.await.unwrap());
        }

        // Assert
        assert_eq!(sender.calls(), 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|x| **x == SubmitOutcome::Succeeded)
                .count(),
            1
        );
        // Tasks scheduled after the success find the cleared fields.
        assert!(outcomes.iter().all(|x| matches!(
            x,
            SubmitOutcome::Succeeded | SubmitOutcome::Ignored | SubmitOutcome::Invalid(_)
        )));
    }

    #[tokio::test]
    async fn dismiss_result() {
        // Arrange
        let sender = ScriptedSender::new([Err("rate limited".into()), Ok(())]);
        let sut = ContactSubmissionFlow::new(sender);

        // Act + Assert
        assert!(!sut.dismiss_result());
        assert_eq!(sut.state(), SubmissionState::Idle);

        sut.set_fields(jane());
        sut.submit().await;
        assert!(sut.dismiss_result());
        assert_eq!(sut.state(), SubmissionState::Idle);
        assert_eq!(sut.snapshot().fields, jane());

        sut.submit().await;
        assert_eq!(sut.state(), SubmissionState::Succeeded);
        assert!(sut.dismiss_result());
        assert_eq!(sut.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn resubmit_after_failure() {
        // Arrange
        let sender = ScriptedSender::new([Err("rate limited".into()), Ok(())]);
        let sut = ContactSubmissionFlow::new(sender);
        sut.set_fields(jane());
        sut.submit().await;

        // Act
        let result = sut.submit().await;

        // Assert
        assert_eq!(result, SubmitOutcome::Succeeded);
        assert_eq!(sut.snapshot().fields, ContactFormFields::default());
    }
}
