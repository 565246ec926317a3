//! Utility modules.

/// Date/time serialization helpers for entity timestamps.
pub mod datetime;

/// Domain name comparison helpers.
pub mod domain;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
