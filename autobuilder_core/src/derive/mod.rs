//! Proc-macro side: Rust struct → descriptor → builder tokens.

pub mod attributes;
pub mod builder_impl;
pub mod descriptor_parser;
