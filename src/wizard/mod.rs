//! Quote request wizard core: state machine, draft persistence and submission

mod machine;
mod persistence;
mod submit;
mod timer;

pub use machine::{FormWizard, DEFAULT_AUTOSAVE_DELAY};
pub use persistence::{FileStore, MemoryStore, PersistenceChannel};
pub use submit::{send_with_timeout, LogEndpoint, SubmissionEndpoint, SubmitError};

#[cfg(test)]
pub use persistence::DRAFT_KEY;
#[cfg(test)]
pub use submit::MockSubmissionEndpoint;
