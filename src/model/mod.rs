//! Entities, their shared capabilities, and helpers over them.
//!
//! Each entity comes as a core type without an ID (for insertion) and a
//! database type carrying the ID, which dereferences to the core.

pub mod candidate;
pub mod common;
pub mod election;
pub mod ranking;
pub mod student;

mod entity;
mod id;

pub use entity::Entity;
pub use id::Id;
