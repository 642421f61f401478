//! Aggregate roots - domain objects that own their related data
//!
//! The catalog is the only aggregate: it owns every scene and guarantees the
//! cross-scene invariants (routes, items, groups) by validating on
//! construction. Nothing mutates it afterwards.

pub mod catalog;

pub use catalog::{CatalogDocument, SceneCatalog, RESERVED_GROUP_IDS};
