//! Onboarding wizard core
//!
//! Pure state and rules for the three form sections, with no terminal or
//! network code. The terminal front-end and the submitter both drive this
//! module through [`WizardState`] and [`WizardEvent`].

pub mod attachments;
pub mod fields;
pub mod groups;
pub mod review;
pub mod state;
pub mod validation;

pub use attachments::{AttachmentSet, UploadedFile};
pub use fields::{BusinessDay, Control, FieldKey, FieldKind, FieldValue};
pub use groups::{GroupKind, RepeatableFieldGroup};
pub use review::ReviewSummary;
pub use state::{
    transition, Effect, Page, Progress, StepStatus, Transition, WizardEvent, WizardState,
};
