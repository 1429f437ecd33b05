//! Output rendering.

mod json;

pub use json::{failure_json, to_json, JsonFormat};
