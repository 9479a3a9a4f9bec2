//! Append-only action log file.
//!
//! Records use the format:
//! ```text
//! [u32 length][bincode serialized entry]
//! [u32 length][bincode serialized entry]
//! ...
//! ```
//! Each entry is a [`DelayedAction`] encoded as its stable `u8` index, so a
//! log written by one build stays readable by the next as long as no kind is
//! renumbered.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use level_actions::{ActionLog, DelayedAction};
use serde::{Serialize, de::DeserializeOwned};

use super::{ActionLogRepository, RepositoryError, Result};

const LEN_PREFIX: u64 = 4;

/// File-backed [`ActionLogRepository`].
#[derive(Debug)]
pub struct FileActionLog {
    /// Filename identifier, e.g. "actions.log"
    name: String,
    path: PathBuf,
    writer: BufWriter<File>,
    /// Byte offset of the next write
    current_offset: u64,
    entries: usize,
}

impl FileActionLog {
    /// Create a new, empty log.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::LogAlreadyExists`] if the file is already
    /// there; an existing save is never truncated.
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let filename = filename.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename);
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new().create_new(true).write(true).open(&path)?;
        tracing::debug!("Created action log: {}", path.display());

        Ok(Self {
            name: filename.to_string(),
            path,
            writer: BufWriter::new(file),
            current_offset: 0,
            entries: 0,
        })
    }

    /// Open an existing log for appending.
    ///
    /// The file is validated record by record before any write happens.
    pub fn open(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let filename = filename.as_ref();
        let path = base_dir.as_ref().join(filename);
        let file = OpenOptions::new().append(true).open(&path)?;
        Self::from_existing(filename, path, file)
    }

    /// Open the log, creating the directory and file if needed.
    pub fn open_or_create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let filename = filename.as_ref();
        let path = base_dir.join(filename);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Self::from_existing(filename, path, file)
    }

    fn from_existing(filename: &str, path: PathBuf, file: File) -> Result<Self> {
        let current_offset = file.metadata()?.len();
        let entries = read_records::<DelayedAction>(&path)?.len();

        tracing::debug!(
            "Opened action log: {} at offset {} ({} entries)",
            path.display(),
            current_offset,
            entries
        );

        Ok(Self {
            name: filename.to_string(),
            path,
            writer: BufWriter::new(file),
            current_offset,
            entries,
        })
    }

    /// Current size of the log in bytes, including unflushed writes.
    pub fn size(&self) -> u64 {
        self.current_offset
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActionLogRepository for FileActionLog {
    fn append(&mut self, act: DelayedAction) -> Result<u64> {
        let offset = self.current_offset;
        let written = write_record(&mut self.writer, &act)?;
        self.current_offset += written;
        self.entries += 1;
        Ok(offset)
    }

    fn load_all(&mut self) -> Result<ActionLog> {
        self.flush()?;
        Ok(read_records(&self.path)?.into_iter().collect())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries
    }
}

impl Drop for FileActionLog {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush action log '{}' on drop: {}", self.name, e);
        }
    }
}

/// Writes one length-prefixed record, returning the bytes written.
fn write_record<T: Serialize>(writer: &mut impl Write, item: &T) -> Result<u64> {
    let bytes =
        bincode::serialize(item).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    let len = u32::try_from(bytes.len())
        .map_err(|_| RepositoryError::Serialization(format!("record of {} bytes", bytes.len())))?;

    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&bytes)?;
    Ok(LEN_PREFIX + bytes.len() as u64)
}

/// Reads every record of the file at `path`.
///
/// A record cut short by a crash is reported as a partial write; a record
/// that decodes to something other than `T` is corrupted data.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)?;
    let file_size = file.metadata()?.len();
    let mut reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut offset = 0u64;
    while offset < file_size {
        let remaining = file_size - offset;
        if remaining < LEN_PREFIX {
            return Err(RepositoryError::PartialWrite {
                offset,
                expected: LEN_PREFIX as usize,
                actual: remaining as usize,
            });
        }

        let mut len_bytes = [0u8; LEN_PREFIX as usize];
        reader.read_exact(&mut len_bytes)?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        let available = remaining - LEN_PREFIX;
        if available < len as u64 {
            return Err(RepositoryError::PartialWrite {
                offset,
                expected: len,
                actual: available as usize,
            });
        }

        let mut data = vec![0u8; len];
        reader.read_exact(&mut data)?;
        let item = bincode::deserialize(&data).map_err(|e| {
            RepositoryError::CorruptedData(format!("record at offset {offset}: {e}"))
        })?;

        records.push(item);
        offset += LEN_PREFIX + len as u64;
    }

    Ok(records)
}
