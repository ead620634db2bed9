//! Loading and saving ontology documents on disk.
//!
//! This module is only available when the `directory-loading` feature is
//! enabled (which is the default).
//!
//! # Overview
//!
//! Each `*.json` file holds one ontology document, as written by
//! [`save_to_file`]. Files are decoded independently, so every file must be
//! self-contained: its references have to resolve within that file.
//!
//! Documents can be loaded from:
//! - A single file, with [`load_from_file`]
//! - A single directory, with [`load_from_directory`], which stops at the
//!   first bad file
//! - A list of directories, with [`load_from_config`], which skips bad files
//!   and reports them in the [`LoadResult`]
//!
//! The default directory is `~/.question-ontology/`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::{DecodeError, Ontology, OntologyMappings};

/// Errors that can occur when loading or saving ontology files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An I/O error occurred while reading or writing files.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A file could not be decoded into a valid ontology.
    #[error("invalid ontology in {}: {error}", .file.display())]
    Decode {
        file: PathBuf,
        #[source]
        error: DecodeError,
    },

    /// An ontology could not be written as JSON.
    #[error("could not encode ontology for {}: {error}", .file.display())]
    Encode {
        file: PathBuf,
        #[source]
        error: serde_json::Error,
    },
}

/// Result of loading from a [`DirectoryConfig`].
#[derive(Debug)]
pub struct LoadResult<M: OntologyMappings> {
    /// Ontologies loaded, with the file each came from, in load order.
    pub ontologies: Vec<(PathBuf, Ontology<M>)>,
    /// Directories that were successfully scanned.
    pub directories_processed: Vec<PathBuf>,
    /// Non-fatal errors encountered during loading.
    pub errors: Vec<(PathBuf, LoadError)>,
}

impl<M: OntologyMappings> Default for LoadResult<M> {
    fn default() -> Self {
        Self {
            ontologies: Vec::new(),
            directories_processed: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<M: OntologyMappings> LoadResult<M> {
    pub fn ontologies_count(&self) -> usize {
        self.ontologies.len()
    }

    /// Consumes the result and returns the loaded ontologies.
    pub fn into_ontologies(self) -> impl Iterator<Item = Ontology<M>> {
        self.ontologies.into_iter().map(|(_, ontology)| ontology)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Ordered search paths for ontology files.
///
/// # Examples
///
/// ```
/// use question_ontology::DirectoryConfig;
///
/// let config = DirectoryConfig::with_paths_and_default(vec!["/etc/ontologies".into()]);
/// assert_eq!(config.paths().len(), 2);
/// assert!(config.paths()[1].ends_with(".question-ontology"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectoryConfig {
    paths: Vec<PathBuf>,
}

impl DirectoryConfig {
    /// Creates a new empty configuration with no search paths.
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Creates configuration with only the default directory.
    pub fn default_only() -> Self {
        Self {
            paths: vec![Self::default_directory()],
        }
    }

    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Creates configuration with custom paths followed by the default directory.
    pub fn with_paths_and_default(mut paths: Vec<PathBuf>) -> Self {
        paths.push(Self::default_directory());
        Self { paths }
    }

    /// Returns the default directory: `~/.question-ontology/`
    ///
    /// Falls back to `./.question-ontology/` if the home directory cannot be
    /// determined.
    pub fn default_directory() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".question-ontology")
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn add_path(&mut self, path: PathBuf) {
        self.paths.push(path);
    }
}

/// Reads and decodes a single ontology file.
pub fn load_from_file<M: OntologyMappings>(path: &Path) -> Result<Ontology<M>, LoadError> {
    let content = fs::read(path)?;
    Ontology::from_json_slice(&content).map_err(|error| LoadError::Decode {
        file: path.to_path_buf(),
        error,
    })
}

/// Writes `ontology` to `path` as pretty-printed JSON.
pub fn save_to_file<M: OntologyMappings>(
    ontology: &Ontology<M>,
    path: &Path,
) -> Result<(), LoadError> {
    let json = ontology
        .to_json_string_pretty()
        .map_err(|error| LoadError::Encode {
            file: path.to_path_buf(),
            error,
        })?;
    fs::write(path, json)?;
    Ok(())
}

/// Loads every `*.json` file in a directory, sorted by file name.
///
/// Returns an empty list if the directory doesn't exist, and fails on the
/// first file that cannot be read or decoded.
pub fn load_from_directory<M: OntologyMappings>(
    path: &Path,
) -> Result<Vec<(PathBuf, Ontology<M>)>, LoadError> {
    json_files(path)?
        .into_iter()
        .map(|file| {
            let ontology = load_from_file(&file)?;
            Ok((file, ontology))
        })
        .collect()
}

/// Loads ontologies from all directories in the given configuration.
///
/// Directories are processed in order and missing ones are skipped. Files
/// that fail to load are skipped
/// and their errors collected in the returned [`LoadResult`].
pub fn load_from_config<M: OntologyMappings>(config: &DirectoryConfig) -> LoadResult<M> {
    let mut result = LoadResult::default();

    for dir_path in config.paths() {
        if !dir_path.is_dir() {
            debug!("no ontology directory at {}", dir_path.display());
            continue;
        }
        let files = match json_files(dir_path) {
            Ok(files) => files,
            Err(error) => {
                warn!("skipping directory {}: {error}", dir_path.display());
                result.errors.push((dir_path.clone(), error));
                continue;
            }
        };
        for file in files {
            match load_from_file(&file) {
                Ok(ontology) => result.ontologies.push((file, ontology)),
                Err(error) => {
                    warn!("skipping {}: {error}", file.display());
                    result.errors.push((file, error));
                }
            }
        }
        result.directories_processed.push(dir_path.clone());
    }

    result
}

fn json_files(path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !path.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let file_path = entry?.path();
        if file_path.extension().is_some_and(|ext| ext == "json") {
            files.push(file_path);
        }
    }
    files.sort();
    debug!("found {} ontology files in {}", files.len(), path.display());
    Ok(files)
}
