//! Exercise library collaborator and its file store.
//!
//! The parser only needs two operations from a library: case-insensitive
//! lookup by name and insert. [`InMemoryLibrary`] implements both and can be
//! loaded from / saved to a JSON file with file locking, the same way user
//! state is persisted elsewhere in the workspace.
//!
//! Concurrent parses that share one library must not interleave their
//! lookup-then-insert sequences. In-process, hold a `Mutex<InMemoryLibrary>`
//! guard for the whole parse; across processes, hold a [`LibraryLock`].

use crate::{Error, Exercise, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Lookup-or-create capability the parser resolves exercise names against
pub trait ExerciseLibrary {
    /// Find an exercise whose name equals `name`, ignoring case
    fn find_by_name(&self, name: &str) -> Option<Exercise>;

    /// Register a new exercise; later lookups must see it
    fn insert(&mut self, exercise: Exercise) -> Result<()>;
}

/// Vec-backed library, also the on-disk format
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct InMemoryLibrary {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl InMemoryLibrary {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Exercises the resolver synthesized (not part of a seed catalog)
    pub fn custom_exercises(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter().filter(|e| e.is_custom)
    }

    /// Validate the library for consistency
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen_names = std::collections::HashSet::new();
        let mut seen_ids = std::collections::HashSet::new();

        for exercise in &self.exercises {
            if exercise.name.trim().is_empty() {
                errors.push(format!("Exercise {} has empty name", exercise.id));
            }
            if !seen_names.insert(exercise.name.to_lowercase()) {
                errors.push(format!("Duplicate exercise name '{}'", exercise.name));
            }
            if !seen_ids.insert(exercise.id) {
                errors.push(format!("Duplicate exercise id {}", exercise.id));
            }
        }

        errors
    }

    /// Load a library from a file with shared locking
    ///
    /// Returns `seed` if the file doesn't exist.
    /// If the file is unreadable or corrupted, logs a warning and returns `seed`.
    pub fn load_or(path: &Path, seed: InMemoryLibrary) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No library file at {:?}, starting from seed catalog", path);
            return Ok(seed);
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open library {:?}: {}. Using seed.", path, e);
                return Ok(seed);
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock library {:?}: {}. Using seed.", path, e);
            return Ok(seed);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read library {:?}: {}. Using seed.", path, e);
            return Ok(seed);
        }

        file.unlock()?;

        match serde_json::from_str::<InMemoryLibrary>(&contents) {
            Ok(library) => {
                tracing::debug!(
                    "Loaded {} exercises from {:?}",
                    library.exercises.len(),
                    path
                );
                Ok(library)
            }
            Err(e) => {
                tracing::warn!("Failed to parse library {:?}: {}. Using seed.", path, e);
                Ok(seed)
            }
        }
    }

    /// Save the library atomically (temp file, fsync, rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} exercises to {:?}", self.exercises.len(), path);
        Ok(())
    }
}

impl ExerciseLibrary for InMemoryLibrary {
    fn find_by_name(&self, name: &str) -> Option<Exercise> {
        let wanted = name.trim().to_lowercase();
        self.exercises
            .iter()
            .find(|e| e.name.to_lowercase() == wanted)
            .cloned()
    }

    fn insert(&mut self, exercise: Exercise) -> Result<()> {
        if self.find_by_name(&exercise.name).is_some() {
            return Err(Error::Library(format!(
                "Exercise '{}' already exists",
                exercise.name
            )));
        }
        self.exercises.push(exercise);
        Ok(())
    }
}

/// Exclusive cross-process lock over a library file
///
/// Held for the whole load → parse → save sequence so two processes cannot
/// both decide a name is new and insert two copies.
pub struct LibraryLock {
    file: File,
    path: PathBuf,
}

impl LibraryLock {
    /// Block until the sidecar `<library>.lock` file is exclusively ours
    pub fn acquire(library_path: &Path) -> Result<Self> {
        let path = lock_path(library_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()?;
        tracing::debug!("Acquired library lock {:?}", path);
        Ok(Self { file, path })
    }
}

impl Drop for LibraryLock {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            tracing::warn!("Failed to release library lock {:?}: {}", self.path, e);
        }
    }
}

fn lock_path(library_path: &Path) -> PathBuf {
    let mut name = library_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "library".into());
    name.push(".lock");
    library_path.with_file_name(name)
}
