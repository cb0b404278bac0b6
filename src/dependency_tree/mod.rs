//! Dependency tree domain: the node model, per-ecosystem builders and the
//! pure merge/filter services over trees.
pub mod builders;
pub mod domain;
pub mod services;
