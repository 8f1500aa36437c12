//! Application layer - Wires domain rules and ports into a live form.
//!
//! This layer owns the reactive pipeline: field streams in, validation
//! state out, with the availability check as the only async boundary.

pub mod signup;

pub use signup::{
    FieldStream, FormController, FormFields, PipelineConfig, SignUpRequest, SubmitError,
    ValidationPipeline,
};
