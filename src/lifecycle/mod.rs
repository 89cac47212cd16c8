//! Declaration lifecycle engine
//!
//! Owns the state machine: valid transitions, guard conditions, audit
//! stamping, conditional persistence, and notification emission.

mod engine;
mod gate;

pub use engine::{Decision, DeclarationUpdate, LifecycleEngine, NewDeclaration};
pub use gate::Gate;
