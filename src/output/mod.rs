//! Result output formats

pub mod json;
pub mod text;
