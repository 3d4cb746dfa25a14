//! Request validation
//!
//! - [`core`] - Lenient JSON body parsing and field extraction helpers
//! - [`generation`] - Required-field checks for the generation endpoints

pub mod core;
pub mod generation;

pub use core::{extract_required_text, extract_required_text_list, parse_json_body};
pub use generation::{GenerationValidator, ValidationError};
