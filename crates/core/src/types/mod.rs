//! Core types for Shoplite.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod interaction;
pub mod role;

pub use email::{Email, EmailError};
pub use id::*;
pub use interaction::{InteractionKind, InteractionKindError};
pub use role::{Role, RoleError};
