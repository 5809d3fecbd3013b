//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod evaluation;
pub mod profile;
pub mod role;
pub mod session;

pub use evaluation::*;
pub use profile::*;
pub use role::*;
pub use session::*;
