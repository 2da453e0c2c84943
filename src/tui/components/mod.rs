//! Reusable UI Components
//!
//! Pieces shared by every page: the header with progress, the status bar
//! and the line renderers used by the form sections.

pub mod forms;
pub mod header;
pub mod status_bar;

pub use forms::*;
pub use header::*;
pub use status_bar::*;
