//! Catalog persistence.
//!
//! A catalog is stored as its records only, laid out as
//! `{"card_data": [...], "set_data": [...]}`. Indices are rebuilt on load.
//! JSON goes through `serde_json`; `to_bytes` / `from_bytes` write the same
//! layout with `bincode`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cards::{Card, CardSet};
use crate::error::{CatalogError, Result};

use super::config::CatalogConfig;
use super::store::{CardCatalog, CatalogBuilder};

/// Serialized form of a catalog.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogData {
    pub card_data: Vec<Card>,
    pub set_data: Vec<CardSet>,
}

impl CatalogData {
    /// Index the records with the given configuration.
    pub fn into_catalog(self, config: CatalogConfig) -> Result<CardCatalog> {
        CatalogBuilder::new()
            .with_config(config)
            .with_cards(self.card_data)
            .with_sets(self.set_data)
            .build()
    }
}

fn check_json_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(()),
        _ => Err(CatalogError::InvalidArgument(format!(
            "catalog path \"{}\" must end in .json",
            path.display()
        ))),
    }
}

impl CardCatalog {
    /// Copy the records out of the catalog.
    #[must_use]
    pub fn to_data(&self) -> CatalogData {
        CatalogData {
            card_data: self.iter().cloned().collect(),
            set_data: self.sets().to_vec(),
        }
    }

    /// Serialize to JSON, indented unless the config asks for compact output.
    pub fn to_json(&self) -> Result<String> {
        let data = self.to_data();
        let json = if self.config().pretty_json {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };
        Ok(json)
    }

    /// Parse and index a JSON catalog with the default configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with(json, CatalogConfig::default())
    }

    pub fn from_json_with(json: &str, config: CatalogConfig) -> Result<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        data.into_catalog(config)
    }

    /// Write the catalog to a `.json` file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        check_json_path(path)?;
        fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), cards = self.len(), "saved card catalog");
        Ok(())
    }

    /// Read a catalog from a `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(path, CatalogConfig::default())
    }

    pub fn load_with(path: impl AsRef<Path>, config: CatalogConfig) -> Result<Self> {
        let path = path.as_ref();
        check_json_path(path)?;
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_with(&json, config)?;
        info!(path = %path.display(), cards = catalog.len(), "loaded card catalog");
        Ok(catalog)
    }

    /// Serialize to a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self.to_data())?)
    }

    /// Parse and index a binary snapshot with the default configuration.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let data: CatalogData = bincode::deserialize(bytes)?;
        data.into_catalog(CatalogConfig::default())
    }
}
