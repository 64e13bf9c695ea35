//! The slave device form: field model, presets, validation and rendering.

pub mod controller;
pub mod field;
pub mod notice;
pub mod render;
pub mod state;
pub mod validate;

pub use controller::DeviceConfigForm;
pub use field::{FieldGroup, FormField};
pub use notice::{LoggingNotice, NoOpNotice, NoticeSink, StderrNotice};
pub use render::{render, FieldView, FormView};
pub use state::{FieldState, FormState};
pub use validate::{validate, FormError, ValidationResult, MISSING_FIELDS_NOTICE};
