//! Searchable schema registries
//!
//! A [`SchemaSource`] holds the schemas found in one directory and may chain
//! a parent source behind it. Recursive lookups consult the source itself
//! first, then its parent, so a bundled directory chained in front of the
//! system default shadows any system schema with the same id.

use crate::config::{SchemaId, SettingsSchema};
use crate::error::{Error, Result, read_dir};
use crate::storage::StorageBackend;

use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A set of schemas with an optional fallback source
#[derive(Debug, Default)]
pub struct SchemaSource {
    origin: Option<PathBuf>,
    schemas: HashMap<SchemaId, Arc<SettingsSchema>>,
    parent: Option<Arc<SchemaSource>>,
}

impl SchemaSource {
    /// Source containing no schemas and no parent
    pub fn empty() -> Self {
        Self::default()
    }

    /// In-memory source, mostly useful for hosts that embed their schemas
    pub fn from_schemas(
        schemas: impl IntoIterator<Item = SettingsSchema>,
        parent: Option<Arc<SchemaSource>>,
    ) -> Self {
        Self {
            origin: None,
            schemas: schemas
                .into_iter()
                .map(|s| (s.id.clone(), Arc::new(s)))
                .collect(),
            parent,
        }
    }

    /// Load every schema file in `dir`
    ///
    /// Files are read in name order; when two files define the same id the
    /// first one wins. Untrusted directories have each schema checked with
    /// [`SettingsSchema::validate_schema`]. Trusted directories skip files
    /// that can't be read or parsed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can't be read, or if a schema file
    /// in an untrusted directory can't be read or fails validation.
    pub fn from_directory<S: StorageBackend>(
        dir: &Path,
        storage: &S,
        parent: Option<Arc<SchemaSource>>,
        trusted: bool,
    ) -> Result<Self> {
        let mut files = Vec::new();
        for entry in read_dir(dir)? {
            let entry = entry.map_err(|e| Error::DirectoryRead {
                path: dir.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() && storage.matches(&path) {
                files.push(path);
            } else {
                debug!("Skipping non-schema entry {}", path.display());
            }
        }
        files.sort();

        let mut schemas = HashMap::new();
        for path in files {
            let schema: SettingsSchema = match storage.read(&path) {
                Ok(schema) => schema,
                // Shared directories hold files from other packages
                Err(e) if trusted => {
                    warn!("Skipping unreadable schema file {}: {e}", path.display());
                    continue;
                }
                Err(e) => return Err(e),
            };
            if !trusted {
                schema
                    .validate_schema()
                    .map_err(|reason| Error::InvalidSchema {
                        path: path.clone(),
                        reason,
                    })?;
            }

            if schemas.contains_key(&schema.id) {
                warn!(
                    "Schema {} defined again in {}, ignoring",
                    schema.id,
                    path.display()
                );
                continue;
            }
            schemas.insert(schema.id.clone(), Arc::new(schema));
        }

        debug!("Loaded {} schema(s) from {}", schemas.len(), dir.display());

        Ok(Self {
            origin: Some(dir.to_path_buf()),
            schemas,
            parent,
        })
    }

    /// System-wide default source built from `dirs`, highest precedence first
    ///
    /// Directories that don't exist are skipped. If none exist the result is
    /// an empty source.
    pub fn system_default<S: StorageBackend>(dirs: &[PathBuf], storage: &S) -> Result<Self> {
        let mut top: Option<SchemaSource> = None;

        for dir in dirs.iter().rev() {
            if !dir.is_dir() {
                debug!("System schema directory {} does not exist", dir.display());
                continue;
            }
            let parent = top.take().map(Arc::new);
            top = Some(Self::from_directory(dir, storage, parent, true)?);
        }

        Ok(top.unwrap_or_default())
    }

    /// Find a schema by id, consulting parents when `recursive` is set
    pub fn lookup(&self, id: &SchemaId, recursive: bool) -> Option<Arc<SettingsSchema>> {
        if let Some(schema) = self.schemas.get(id) {
            return Some(Arc::clone(schema));
        }
        if recursive {
            return self.parent.as_ref()?.lookup(id, true);
        }
        None
    }

    /// Ids of all reachable schemas, sorted and deduplicated
    pub fn list_schemas(&self, recursive: bool) -> Vec<SchemaId> {
        let mut ids: Vec<SchemaId> = self.schemas.keys().cloned().collect();
        if recursive {
            if let Some(parent) = &self.parent {
                ids.extend(parent.list_schemas(true));
            }
        }
        ids.sort();
        ids.dedup();
        ids
    }

    /// Directory this source was loaded from, if any
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn parent(&self) -> Option<&Arc<SchemaSource>> {
        self.parent.as_ref()
    }
}
