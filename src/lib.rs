pub mod config;
pub mod error;
pub mod logging;
pub mod submission;
pub mod wizard;

// TUI module - optional via "tui" feature
#[cfg(feature = "tui")]
pub mod tui;

pub use config::OnboardingConfig;
pub use error::{AttachmentError, Error, GroupError};
pub use submission::{
    HttpProvisioner, ProvisionResponse, ProvisionedAccount, Provisioner, SubmissionFailure,
    SubmissionPayload, SubmissionResult, Submitter,
};
pub use wizard::{transition, Effect, Page, WizardEvent, WizardState};

// Re-export TUI entry point when feature is enabled
#[cfg(feature = "tui")]
pub use tui::run_tui;
