//! Repository adapters for the catalog

use std::path::PathBuf;

use haulcost_infra::persistence::FileCatalogRepository;
use haulcost_types::Result;

use crate::config::Config;

/// Open the file-based catalog configured in `config`
pub fn open_catalog_repo(config: &Config) -> Result<FileCatalogRepository> {
    let path = config.catalog_path()?;
    open_catalog_repo_at(path)
}

/// Open the file-based catalog at a custom path
pub fn open_catalog_repo_at(toml_path: PathBuf) -> Result<FileCatalogRepository> {
    FileCatalogRepository::new(toml_path)
}
