//! Resource Bundle Management Module
//!
//! Loads a morpheme resource bundle (one JSON document, see `ResourceTables`)
//! and validates it into `MorphemeResources`.
//! The bundle is read and validated on the first `load()`; later calls hand out
//! the same `Arc`. A failed load is cached too, so a broken bundle is reported
//! identically every time instead of being re-read.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::errors::error_definition::ResourceError;
use crate::resources::morpheme_resources::{MorphemeResources, ResourceTables};

/// File name of the bundle inside the default data directory
pub const BUNDLE_FILE_NAME: &str = "resources.json";

/// Resource bundle manager
pub struct ResourceManager {
  /// Bundle file path
  bundle_path: PathBuf,

  /// Loaded bundle (initialized only once at the first load)
  /// ResourceError implements Clone so it can hold Result
  resources: OnceLock<Result<Arc<MorphemeResources>, ResourceError>>,
}

/// Implementation block for ResourceManager
impl ResourceManager {
  /// Constructor for a bundle file at `path`
  ///
  /// # Errors
  /// Returns `ResourceError::BundleNotFound` if `path` is not a file.
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ResourceError> {
    let bundle_path = path.as_ref().to_path_buf();

    if !bundle_path.is_file() {
      return Err(ResourceError::BundleNotFound(bundle_path));
    }

    Ok(Self {
      bundle_path,
      resources: OnceLock::new(),
    })
  }

  /// Constructor for the bundle in the default data directory
  ///
  /// # Errors
  /// - `ResourceError::DataDirNotFound` if the platform has no data directory
  /// - `ResourceError::BundleNotFound` if no bundle has been installed there
  pub fn with_default_location() -> Result<Self, ResourceError> {
    Self::from_path(default_bundle_path()?)
  }

  /// Returns the bundle file path
  pub fn bundle_path(&self) -> &Path {
    &self.bundle_path
  }

  /// Whether `load()` has already run (successfully or not)
  pub fn is_loaded(&self) -> bool {
    self.resources.get().is_some()
  }

  /// Load the bundle
  /// - Reads, parses and validates the file on the first call
  /// - Returns a clone of `Arc<MorphemeResources>` from the second call onwards
  /// - If an error occurs on the first call, caches the error and keeps returning it
  pub fn load(&self) -> Result<Arc<MorphemeResources>, ResourceError> {
    self.resources.get_or_init(|| self.load_inner().map(Arc::new)).clone()
  }

  fn load_inner(&self) -> Result<MorphemeResources, ResourceError> {
    let file = File::open(&self.bundle_path).map_err(|e| ResourceError::Io {
      path: self.bundle_path.clone(),
      source: Arc::new(e),
    })?;

    let tables: ResourceTables = serde_json::from_reader(BufReader::new(file))
      .map_err(|e| ResourceError::Parse(Arc::new(e)))?;

    match MorphemeResources::from_tables(tables) {
      Ok(resources) => {
        info!(path = %self.bundle_path.display(), "Resource bundle loaded");
        Ok(resources)
      }
      Err(e) => {
        warn!(path = %self.bundle_path.display(), error = %e, "Resource bundle rejected");
        Err(e)
      }
    }
  }
}

/// Returns the default bundle path according to the OS
///
/// | OS      | Example Path                                          |
/// |---------|-------------------------------------------------------|
/// | Linux   | `~/.local/share/sarf/resources.json`                  |
/// | macOS   | `~/Library/Application Support/sarf/resources.json`   |
/// | Windows | `C:\Users\{user}\AppData\Roaming\sarf\resources.json` |
pub fn default_bundle_path() -> Result<PathBuf, ResourceError> {
  let base = dirs::data_dir().ok_or(ResourceError::DataDirNotFound)?;

  Ok(base.join("sarf").join(BUNDLE_FILE_NAME))
}

/// Manual `Debug` implementation for `ResourceManager`
///
/// The tables can hold hundreds of thousands of entries, so only meta
/// information is shown.
impl fmt::Debug for ResourceManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ResourceManager")
      .field("bundle_path", &self.bundle_path)
      .field("resources_initialized", &self.is_loaded())
      .finish()
  }
}
