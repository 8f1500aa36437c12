//! Sign-up form application layer.
//!
//! - `fields` - The mutable inputs as observable values
//! - `pipeline` - Debounced availability checks and state derivation
//! - `controller` - The form controller exposed to the UI boundary

mod controller;
mod fields;
mod pipeline;

pub use controller::{FormController, SignUpRequest, SubmitError};
pub use fields::{FieldStream, FormFields};
pub use pipeline::{PipelineConfig, ValidationPipeline};
