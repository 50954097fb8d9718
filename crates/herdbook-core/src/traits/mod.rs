//! Trait seams for external collaborators.

mod access;

pub use access::{AccessPolicy, AllowAll, StaticAccessList};
