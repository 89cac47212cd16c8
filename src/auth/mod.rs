//! Actor identity and roles
//!
//! The identity/session layer upstream authenticates callers and hands the
//! engine an [`Actor`] triple. Everything here trusts that input.

mod actor;

pub use actor::{Actor, Role};
