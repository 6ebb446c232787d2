//! Shard artifact store
//!
//! Writes each shard of the current configuration to
//! `<dir>/<file name>.<index>` and removes those files again between
//! configurations. Other files in the directory are left alone.

use crate::error::Result;
use crate::shard::ShardSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default output directory for shard artifacts
pub const DEFAULT_OUTPUT_DIR: &str = "./output/";

/// Directory holding per-shard files
#[derive(Debug, Clone)]
pub struct ShardStore {
    dir: PathBuf,
}

impl ShardStore {
    /// Open the store, creating the directory if absent
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            debug!(dir = %dir.display(), "created output directory");
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the artifact for shard `index` of `file_name`
    pub fn shard_path(&self, file_name: &str, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}", file_name, index))
    }

    /// Write every present shard; returns the number of files written
    pub fn write_shards(&self, file_name: &str, shards: &ShardSet) -> Result<usize> {
        let mut written = 0;
        for (index, data) in shards.present() {
            fs::write(self.shard_path(file_name, index), data)?;
            written += 1;
        }
        Ok(written)
    }

    /// Remove the artifacts of `file_name` for shard indices `0..total_shards`;
    /// returns the number removed
    pub fn clear(&self, file_name: &str, total_shards: usize) -> Result<usize> {
        let mut removed = 0;
        for index in 0..total_shards {
            let path = self.shard_path(file_name, index);
            if path.is_file() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_set() -> ShardSet {
        let slots = (0..4u8).map(|i| Some(vec![i; 8])).collect();
        ShardSet::from_slots(2, slots).unwrap()
    }

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("output");
        let store = ShardStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_write_and_clear() {
        let temp = TempDir::new().unwrap();
        let store = ShardStore::open(temp.path()).unwrap();

        let written = store.write_shards("payload.txt", &sample_set()).unwrap();
        assert_eq!(written, 4);

        let third = fs::read(temp.path().join("payload.txt.2")).unwrap();
        assert_eq!(third, vec![2u8; 8]);

        assert_eq!(store.clear("payload.txt", 4).unwrap(), 4);
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_absent_shards_not_written() {
        let temp = TempDir::new().unwrap();
        let store = ShardStore::open(temp.path()).unwrap();

        let mut set = sample_set();
        set.mark_tail_absent(1);
        assert_eq!(store.write_shards("f", &set).unwrap(), 3);
        assert!(!store.shard_path("f", 3).exists());
    }

    #[test]
    fn test_clear_keeps_unrelated_files() {
        let temp = TempDir::new().unwrap();
        let store = ShardStore::open(temp.path()).unwrap();
        fs::create_dir(temp.path().join("keep")).unwrap();
        fs::write(temp.path().join("notes.txt"), b"mine").unwrap();
        fs::write(temp.path().join("other.bin.0"), b"x").unwrap();
        fs::write(temp.path().join("payload.txt"), b"source").unwrap();

        store.write_shards("payload.txt", &sample_set()).unwrap();
        assert_eq!(store.clear("payload.txt", 4).unwrap(), 4);

        assert!(temp.path().join("keep").is_dir());
        assert!(temp.path().join("notes.txt").is_file());
        assert!(temp.path().join("other.bin.0").is_file());
        assert!(temp.path().join("payload.txt").is_file());
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("output");
        let store = ShardStore::open(&dir).unwrap();

        fs::remove_dir(&dir).unwrap();
        fs::write(&dir, b"not a directory").unwrap();

        assert!(matches!(
            store.write_shards("payload.txt", &sample_set()),
            Err(crate::error::ShardScopeError::Io(_))
        ));
        assert_eq!(store.clear("payload.txt", 4).unwrap(), 0);
    }
}
