//! Core types for Fixit.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod id;
pub mod status;
pub mod timestamp;

pub use credential::{PasswordDigest, PasswordDigestError};
pub use id::*;
pub use status::*;
pub use timestamp::{Timestamp, TimestampError};
