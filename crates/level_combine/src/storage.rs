//! Level collections on disk.
//!
//! A store root holds two directories of level files: `published/` and
//! `user/`. The combination runner reads both and writes its output into
//! `user/`.
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rand::{Rng, RngCore};
use tracing::{debug, warn};

use crate::combine::config::OutputNaming;
use crate::error::{Error, Result};
use crate::format::{decode, encode, LevelFile};

/// One of the two level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Published,
    User,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Published, Collection::User];

    pub fn dir_name(self) -> &'static str {
        match self {
            Collection::Published => "published",
            Collection::User => "user",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A decoded level file together with the name it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredLevel {
    pub collection: Collection,
    pub file_name: String,
    pub file: LevelFile,
}

#[derive(Debug, Clone)]
pub struct LevelStore {
    root: PathBuf,
}

impl LevelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.dir_name())
    }

    /// Names of the regular files in a collection, sorted so repeated runs
    /// see the corpus in the same order.
    pub fn file_names(&self, collection: Collection) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.collection_dir(collection))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!("Skipping non UTF-8 file name {:?} in '{}'.", raw, collection),
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn read(&self, collection: Collection, file_name: &str) -> Result<LevelFile> {
        let path = self.collection_dir(collection).join(file_name);
        let bytes = fs::read(&path)?;
        decode(&bytes).map_err(|e| match e {
            Error::Json(source) => Error::Decode { path, source },
            other => other,
        })
    }

    /// Decode every file in `collection`. The first unreadable file aborts
    /// the load unless `skip_unreadable` is set, in which case it is logged
    /// and left out.
    pub fn load_collection(
        &self,
        collection: Collection,
        skip_unreadable: bool,
    ) -> Result<Vec<StoredLevel>> {
        let mut levels = Vec::new();
        for file_name in self.file_names(collection)? {
            match self.read(collection, &file_name) {
                Ok(file) => levels.push(StoredLevel {
                    collection,
                    file_name,
                    file,
                }),
                Err(e) if skip_unreadable => {
                    warn!("Skipping unreadable level '{}/{}': {}.", collection, file_name, e);
                }
                Err(e) => return Err(e),
            }
        }
        debug!("Loaded {} level(s) from '{}'.", levels.len(), collection);
        Ok(levels)
    }

    /// Published levels followed by user levels.
    pub fn load_corpus(&self, skip_unreadable: bool) -> Result<Vec<StoredLevel>> {
        let mut corpus = Vec::new();
        for collection in Collection::ALL {
            corpus.extend(self.load_collection(collection, skip_unreadable)?);
        }
        Ok(corpus)
    }

    /// Levels of a collection, leaving out soft-deleted ones unless asked.
    pub fn list(&self, collection: Collection, include_deleted: bool) -> Result<Vec<StoredLevel>> {
        let mut levels = self.load_collection(collection, false)?;
        if !include_deleted {
            levels.retain(|l| !l.file.deleted);
        }
        Ok(levels)
    }

    /// Encode `file` and write it under `file_name`, replacing any existing file.
    pub fn write(
        &self,
        collection: Collection,
        file_name: &str,
        file: &LevelFile,
    ) -> Result<PathBuf> {
        let path = self.collection_dir(collection).join(file_name);
        fs::write(&path, encode(file))?;
        Ok(path)
    }

    /// Zero the completion percentage and clear every coin flag of each level
    /// in `collection`. Returns the number of files rewritten.
    pub fn reset_completion(&self, collection: Collection) -> Result<usize> {
        let mut rewritten = 0;
        for file_name in self.file_names(collection)? {
            let mut file = self.read(collection, &file_name)?;
            file.completion.reset();
            self.write(collection, &file_name, &file)?;
            rewritten += 1;
        }
        Ok(rewritten)
    }
}

/// Output file name: prefix, a random integer in `[1, suffix_max]`, extension.
///
/// Names are not checked against existing files; a repeated suffix replaces
/// the earlier output.
pub fn generated_file_name<R: RngCore + ?Sized>(naming: &OutputNaming, rng: &mut R) -> String {
    let suffix = rng.random_range(1..=naming.suffix_max.max(1));
    format!("{}{}.{}", naming.prefix, suffix, naming.extension)
}
