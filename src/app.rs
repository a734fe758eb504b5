//! Application state and core logic

use crate::config::AppConfig;
use crate::state::{
    validate_all, validate_step, ActionButton, AppState, FieldKind, FieldName, FocusTarget, Step,
    SubmissionStatus, ValidationError,
};
use crate::wizard::{
    send_with_timeout, FileStore, FormWizard, LogEndpoint, MemoryStore, PersistenceChannel,
    SubmissionEndpoint, SubmitError,
};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

const THANK_YOU: &str = "Thank you for your inquiry! We will contact you within 24 hours.";
const QUIT_WHILE_SUBMITTING: &str = "Submission in progress; quit once it finishes";

/// Main application struct
pub struct App {
    /// Focus, selection and messages
    pub state: AppState,
    /// The inquiry being filled in
    pub wizard: FormWizard,
    pub config: AppConfig,
    /// Where finished inquiries are sent
    endpoint: Arc<dyn SubmissionEndpoint>,
    submit_tx: mpsc::UnboundedSender<Result<(), SubmitError>>,
    submit_rx: mpsc::UnboundedReceiver<Result<(), SubmitError>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance with the configured draft store and endpoint
    pub fn new(config: AppConfig) -> Self {
        let store = open_store(&config);
        let endpoint = Arc::new(LogEndpoint::new(config.submit_latency));
        Self::with_parts(config, store, endpoint)
    }

    /// Create an App from explicit collaborators; restores any saved draft
    pub fn with_parts(
        config: AppConfig,
        store: Box<dyn PersistenceChannel>,
        endpoint: Arc<dyn SubmissionEndpoint>,
    ) -> Self {
        let mut wizard = FormWizard::new(store, config.autosave_delay);
        wizard.hydrate();

        let mut state = AppState::default();
        state.reset_focus(wizard.current_step());
        if !wizard.fields().is_empty() {
            state.status_message = Some("Restored your saved draft".to_string());
        }

        let (submit_tx, submit_rx) = mpsc::unbounded_channel();
        Self {
            state,
            wizard,
            config,
            endpoint,
            submit_tx,
            submit_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_submitting(&self) -> bool {
        self.wizard.submission_status() == SubmissionStatus::Submitting
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Autosave label for the status bar
    pub fn save_status(&self) -> String {
        if self.wizard.is_autosave_pending() {
            return "Saving…".to_string();
        }
        match self.wizard.persistence_meta().last_saved_at {
            Some(saved_at) => {
                let local = saved_at.with_timezone(&Local);
                format!("Saved at {}", local.format("%H:%M"))
            }
            None => "Not saved yet".to_string(),
        }
    }

    /// Run timer-driven work: due autosaves and finished submissions
    pub fn tick(&mut self) {
        self.wizard.poll_autosave();
        while let Ok(result) = self.submit_rx.try_recv() {
            self.apply_submit_result(result);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            if self.is_submitting() {
                self.state.status_message = Some(QUIT_WHILE_SUBMITTING.to_string());
            } else {
                self.request_quit();
            }
            return;
        }
        let copy = key.modifiers.contains(crate::platform::COPY_MODIFIER);
        if copy && key.code == KeyCode::Char('y') {
            self.copy_contact();
            return;
        }

        // The inquiry is frozen until the endpoint answers
        if self.is_submitting() {
            return;
        }

        self.state.status_message = None;
        let step = self.wizard.current_step();

        if ctrl {
            match key.code {
                KeyCode::Char('n') => self.next_step(),
                KeyCode::Char('p') => self.prev_step(),
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('r') => self.reset(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.state.next_focus(step),
            KeyCode::BackTab => self.state.prev_focus(step),
            _ => match self.state.current_focus(step) {
                FocusTarget::Field(name) => self.handle_field_key(name, key),
                FocusTarget::FabricGrid => self.handle_fabric_key(key),
                FocusTarget::Actions => self.handle_actions_key(key),
            },
        }
    }

    fn handle_field_key(&mut self, name: FieldName, key: KeyEvent) {
        let step = self.wizard.current_step();
        let current = self.wizard.fields().get(name).to_string();
        match name.kind() {
            FieldKind::Select(_) => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => {
                    if let Some(value) = name.cycle_option(&current, true) {
                        self.wizard.set_field(name, value);
                    }
                }
                KeyCode::Left => {
                    if let Some(value) = name.cycle_option(&current, false) {
                        self.wizard.set_field(name, value);
                    }
                }
                KeyCode::Backspace | KeyCode::Delete if !current.is_empty() => {
                    self.wizard.set_field(name, "");
                }
                KeyCode::Enter => self.state.next_focus(step),
                _ => {}
            },
            FieldKind::Text { multiline } => match key.code {
                KeyCode::Char(c) => {
                    let mut value = current;
                    value.push(c);
                    self.wizard.set_field(name, value);
                }
                KeyCode::Backspace if !current.is_empty() => {
                    let mut value = current;
                    value.pop();
                    self.wizard.set_field(name, value);
                }
                KeyCode::Enter if multiline => {
                    let mut value = current;
                    value.push('\n');
                    self.wizard.set_field(name, value);
                }
                KeyCode::Enter => self.state.next_focus(step),
                _ => {}
            },
        }
    }

    fn handle_fabric_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.move_fabric_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_fabric_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.state.move_fabric_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.state.move_fabric_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                let fabric = self.state.selected_fabric();
                self.wizard.toggle_fabric_type(fabric);
            }
            _ => {}
        }
    }

    fn handle_actions_key(&mut self, key: KeyEvent) {
        let step = self.wizard.current_step();
        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                self.state.prev_button(step)
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                self.state.next_button(step)
            }
            KeyCode::Enter => match self.state.selected_action(step) {
                ActionButton::Previous => self.prev_step(),
                ActionButton::Next => self.next_step(),
                ActionButton::Submit => self.submit(),
            },
            _ => {}
        }
    }

    /// Validate the current step, then move forward
    fn next_step(&mut self) {
        let step = self.wizard.current_step();
        if step.is_last() {
            return;
        }
        if let Err(errors) = validate_step(self.wizard.fields(), step) {
            self.push_error(describe(&errors));
            return;
        }
        self.wizard.advance_step();
        self.state.reset_focus(self.wizard.current_step());
    }

    fn prev_step(&mut self) {
        if self.wizard.current_step().is_first() {
            return;
        }
        self.wizard.retreat_step();
        self.state.reset_focus(self.wizard.current_step());
    }

    /// Validate everything and send the inquiry on a background task
    fn submit(&mut self) {
        if !self.wizard.current_step().is_last() {
            self.state.status_message =
                Some("Complete the remaining steps before submitting".to_string());
            return;
        }
        if let Err(errors) = validate_all(self.wizard.fields()) {
            self.push_error(describe(&errors));
            return;
        }
        let Some(payload) = self.wizard.begin_submit() else {
            return;
        };

        let endpoint = Arc::clone(&self.endpoint);
        let tx = self.submit_tx.clone();
        let timeout = self.config.submit_timeout;
        tokio::spawn(async move {
            let result = send_with_timeout(endpoint.as_ref(), &payload, timeout).await;
            // Receiver is gone only when the app has shut down
            let _ = tx.send(result);
        });
    }

    fn apply_submit_result(&mut self, result: Result<(), SubmitError>) {
        let failure = result.as_ref().err().map(ToString::to_string);
        self.wizard.finish_submit(result);
        match failure {
            None => {
                self.state.reset_focus(Step::One);
                self.state.status_message = Some(THANK_YOU.to_string());
            }
            Some(reason) => self.push_error(format!(
                "Submission failed: {reason}. Your answers are kept; submit again to retry."
            )),
        }
    }

    /// Explicit user reset: discard the inquiry and its draft
    fn reset(&mut self) {
        self.wizard.reset();
        self.state.reset_focus(Step::One);
        self.state.status_message = Some("Inquiry cleared".to_string());
    }

    /// Put the WhatsApp (or phone) contact on the clipboard
    fn copy_contact(&mut self) {
        let Some(contact) = self.config.quick_contact().map(str::to_string) else {
            self.state.status_message = Some("No contact number configured".to_string());
            return;
        };
        let copied = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(contact.clone()));
        match copied {
            Ok(()) => self.state.status_message = Some(format!("Copied {contact}")),
            Err(err) => {
                tracing::warn!("Clipboard unavailable: {err}");
                self.push_error(format!("Could not copy contact: {err}"));
            }
        }
    }

    /// Save pending edits, stop the autosave timer and leave
    fn request_quit(&mut self) {
        self.wizard.flush();
        self.wizard.teardown();
        self.quit = true;
    }
}

/// Pick the draft store: the configured directory, or memory when there is none
fn open_store(config: &AppConfig) -> Box<dyn PersistenceChannel> {
    if config.environment == crate::config::Environment::Test {
        return Box::new(MemoryStore::new());
    }
    match config.drafts_dir() {
        Some(dir) => {
            let store = FileStore::new(dir);
            tracing::debug!("Drafts stored in {}", store.dir().display());
            Box::new(store)
        }
        None => {
            tracing::warn!("No data directory available; drafts will not survive a restart");
            Box::new(MemoryStore::new())
        }
    }
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
