//! Screen Implementations
//!
//! One module per wizard page. The form sections share `details`.

pub mod details;
pub mod landing;
pub mod loading;
pub mod outcome;
pub mod review;

pub use details::render_section;
pub use landing::render_landing;
pub use loading::render_loading;
pub use outcome::{render_error, render_success};
pub use review::render_review;
