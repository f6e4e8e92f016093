//! Infrastructure layer - catalog loading and file-backed repositories

pub mod catalog_loader;
pub mod estimate_csv;
pub mod persistence;
