//! Error types and error handling for the scanner.
//!
//! This module defines the errors a scan can surface. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexical and source-reading failures
//! - Helpful suggestions attached to each error

pub mod errors;
