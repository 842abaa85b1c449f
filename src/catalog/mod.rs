/// Projects catalog module
///
/// This module owns all catalog state and derivation logic, including:
/// - The immutable record model and seed data (record.rs)
/// - The catalog store with its filter/search/sort pipeline,
///   summary/statistics derivation, and JSON import/export (store.rs)
///
/// The UI layer only issues commands and queries against this module;
/// it holds no derivation logic of its own.
pub mod record;
pub mod store;

pub use record::{seed_projects, ProjectRecord, ProjectStats};
pub use store::{
    CatalogError, CatalogStatistics, ProjectsCatalog, SortKey, Summary, ALL_CATEGORIES,
};
