//! Transport front ends for the request handler.

pub mod json_lines;

pub use json_lines::{parse_error_message, process_line};
