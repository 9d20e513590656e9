//! Static game tables: crop catalog, growth phases and the picture mapping.
//!
//! Files are read once at startup. A file that cannot be read or is not JSON
//! is an error; individual rows that do not make sense are dropped.

mod catalog;
mod coerce;
mod images;
mod phases;

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

pub use catalog::{CropCatalog, CropDefinition, SeedId};
pub use images::{ImageIndex, ImageRef, PLACEHOLDER_GLYPH};
pub use phases::{parse_grow_phases, GrowthPhaseProfile, PhaseTable};

use crate::config::DataConfig;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct StaticTables {
    pub catalog: CropCatalog,
    pub phases: PhaseTable,
    pub images: ImageIndex,
}

static TABLES: OnceLock<StaticTables> = OnceLock::new();

impl StaticTables {
    pub fn new(catalog: CropCatalog, phases: PhaseTable, images: ImageIndex) -> Self {
        Self {
            catalog,
            phases,
            images,
        }
    }

    pub fn from_documents(catalog: &Value, phases: &Value, images: &Value) -> Self {
        Self::new(
            CropCatalog::from_json(catalog),
            PhaseTable::from_json(phases),
            ImageIndex::from_json(images),
        )
    }

    /// Publishes the tables for the rest of the process. The first install wins;
    /// later calls get the tables that are already there.
    pub fn install(self) -> &'static StaticTables {
        TABLES.get_or_init(|| self)
    }

    pub fn installed() -> Option<&'static StaticTables> {
        TABLES.get()
    }
}

pub struct DataLoader {
    base_dir: PathBuf,
    config: DataConfig,
}

impl DataLoader {
    pub fn new(base_dir: impl AsRef<Path>, config: DataConfig) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            config,
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.dir)
    }

    pub fn load(&self) -> Result<StaticTables, DataError> {
        let dir = self.data_dir();
        let catalog = read_json(&dir.join(&self.config.catalog_file))?;
        let phases = read_json(&dir.join(&self.config.phases_file))?;
        let images = read_json(&dir.join(&self.config.images_file))?;

        let tables = StaticTables::from_documents(&catalog, &phases, &images);
        if tables.catalog.skipped() > 0 {
            debug!(
                skipped = tables.catalog.skipped(),
                "dropped catalog rows without a usable seed id"
            );
        }
        info!(
            dir = %dir.display(),
            crops = tables.catalog.len(),
            phase_profiles = tables.phases.len(),
            images = tables.images.id_count(),
            "loaded static tables"
        );
        Ok(tables)
    }
}

fn read_json(path: &Path) -> Result<Value, DataError> {
    let text = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}
