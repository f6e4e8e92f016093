//! Persistence implementations
//!
//! File-backed, read-only implementations of the domain repository traits.

mod file_catalog_repo;

pub use file_catalog_repo::FileCatalogRepository;
