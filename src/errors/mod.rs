//! Diagnostics produced while parsing.
//!
//! Parsing never stops at the first problem. Every error is recorded as a
//! [`errors::Diagnostic`]: a kind from [`errors::ErrorImpl`] plus the position
//! it was detected at, with a user-facing tip for display.

pub mod errors;
