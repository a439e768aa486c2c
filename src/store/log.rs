//! Append-only entry log
//!
//! Every accepted entry is appended to a single file and never rewritten.
//! On open the file is scanned to find where the insertion sequence left
//! off. A torn or corrupt tail ends the scan and is cut off, so new records
//! always follow the last valid one.
//!
//! Format per record:
//! - length: u32 (4 bytes)
//! - data: [u8; length] (bincode-serialized StoredEntry)
//! - crc: u32 (4 bytes, CRC32 of length + data)

use crate::store::error::{StoreError, StoreResult};
use crate::store::types::{Entry, StoredEntry};
use serde::Deserialize;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

/// Largest record accepted when reading back (1MB)
const MAX_RECORD_LEN: usize = 1_000_000;

/// Length prefix plus trailing CRC
const FRAME_OVERHEAD: u64 = 8;

/// Sync strategy for log appends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Fsync after every append
    #[default]
    EveryWrite,
    /// Fsync once enough bytes have accumulated
    Batched,
    /// Hand writes to the OS only
    None,
}

/// Append-only log of stored entries
pub struct EntryLog {
    file: File,
    path: PathBuf,
    /// Byte offset just past the last complete record
    committed_len: u64,
    /// Records currently in the file
    entry_count: u64,
    /// Sequence number for the next append
    next_seq: u64,
    bytes_since_sync: usize,
    sync_mode: SyncMode,
    sync_threshold: usize,
    /// Set when a failed append could not be rolled back
    poisoned: bool,
}

/// What a scan found in an existing file
struct ScanResult {
    entry_count: u64,
    next_seq: u64,
    valid_len: u64,
}

impl EntryLog {
    /// Open or create a log file
    pub fn open(path: impl AsRef<Path>, sync_mode: SyncMode) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;

        let scan = Self::scan(&path)?;

        let file_len = file.metadata()?.len();
        if file_len > scan.valid_len {
            tracing::warn!(
                path = %path.display(),
                valid_len = scan.valid_len,
                dropped_bytes = file_len - scan.valid_len,
                "Truncating invalid tail of entry log"
            );
            file.set_len(scan.valid_len)?;
            file.sync_all()?;
        }

        tracing::debug!(
            path = %path.display(),
            entries = scan.entry_count,
            "Opened entry log"
        );

        Ok(Self {
            file,
            path,
            committed_len: scan.valid_len,
            entry_count: scan.entry_count,
            next_seq: scan.next_seq,
            bytes_since_sync: 0,
            sync_mode,
            sync_threshold: 64 * 1024,
            poisoned: false,
        })
    }

    /// Count valid records and find where they end
    fn scan(path: &Path) -> StoreResult<ScanResult> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut result = ScanResult {
            entry_count: 0,
            next_seq: 0,
            valid_len: 0,
        };

        loop {
            match Self::read_frame(&mut reader) {
                Ok(Some((stored, frame_len))) => {
                    result.entry_count += 1;
                    result.next_seq = result.next_seq.max(stored.seq + 1);
                    result.valid_len += frame_len;
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(
                        "Entry log corruption at record {}: {}",
                        result.entry_count,
                        e
                    );
                    break;
                }
            }
        }

        Ok(result)
    }

    /// Append an entry, assigning it the next sequence number.
    ///
    /// Either the whole record lands or the file is cut back to where it
    /// was before the call.
    pub fn append(&mut self, entry: Entry) -> StoreResult<StoredEntry> {
        if self.poisoned {
            return Err(StoreError::Corruption(format!(
                "entry log {} has an unrecovered partial write",
                self.path.display()
            )));
        }

        let stored = StoredEntry::new(self.next_seq, entry);
        let data = bincode::serialize(&stored)?;

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&(data.len() as u32).to_le_bytes());
        hasher.update(&data);
        let crc = hasher.finalize();

        let mut frame = Vec::with_capacity(data.len() + FRAME_OVERHEAD as usize);
        frame.extend_from_slice(&(data.len() as u32).to_le_bytes());
        frame.extend_from_slice(&data);
        frame.extend_from_slice(&crc.to_le_bytes());

        if let Err(e) = self.write_frame(&frame) {
            self.rollback();
            return Err(e);
        }

        self.committed_len += frame.len() as u64;
        self.entry_count += 1;
        self.next_seq += 1;

        Ok(stored)
    }

    fn write_frame(&mut self, frame: &[u8]) -> StoreResult<()> {
        self.file.write_all(frame)?;
        self.bytes_since_sync += frame.len();

        match self.sync_mode {
            SyncMode::EveryWrite => self.sync()?,
            SyncMode::Batched => {
                if self.bytes_since_sync >= self.sync_threshold {
                    self.sync()?;
                }
            }
            SyncMode::None => {}
        }
        Ok(())
    }

    /// Cut the file back to the last complete record
    fn rollback(&mut self) {
        match self.file.set_len(self.committed_len) {
            Ok(()) => {
                tracing::warn!(
                    path = %self.path.display(),
                    committed_len = self.committed_len,
                    "Rolled back partial entry log write"
                );
            }
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Could not roll back partial write, refusing further appends"
                );
                self.poisoned = true;
            }
        }
    }

    /// Force everything written so far onto disk
    pub fn sync(&mut self) -> StoreResult<()> {
        self.file.flush()?;
        self.file.sync_all()?;
        self.bytes_since_sync = 0;
        Ok(())
    }

    /// Read back every valid record, in insertion order
    #[cfg(test)]
    fn recover(&self) -> StoreResult<Vec<StoredEntry>> {
        LogIterator::new(&self.path)?.collect()
    }

    fn read_frame<R: Read>(reader: &mut R) -> StoreResult<Option<(StoredEntry, u64)>> {
        let mut len_buf = [0u8; 4];
        match reader.read_exact(&mut len_buf) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        }
        let len = u32::from_le_bytes(len_buf) as usize;

        if len > MAX_RECORD_LEN {
            return Err(StoreError::Corruption(format!(
                "Record length too large: {}",
                len
            )));
        }

        let mut data = vec![0u8; len];
        reader.read_exact(&mut data)?;

        let mut crc_buf = [0u8; 4];
        reader.read_exact(&mut crc_buf)?;
        let stored_crc = u32::from_le_bytes(crc_buf);

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&len_buf);
        hasher.update(&data);
        let computed_crc = hasher.finalize();

        if stored_crc != computed_crc {
            return Err(StoreError::Corruption(format!(
                "CRC mismatch: stored={}, computed={}",
                stored_crc, computed_crc
            )));
        }

        let stored: StoredEntry = bincode::deserialize(&data)?;
        Ok(Some((stored, len as u64 + FRAME_OVERHEAD)))
    }

    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }
}

/// Streaming reader over a log file
pub struct LogIterator {
    reader: BufReader<File>,
}

impl LogIterator {
    pub fn new(path: impl AsRef<Path>) -> StoreResult<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }
}

impl Iterator for LogIterator {
    type Item = StoreResult<StoredEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        EntryLog::read_frame(&mut self.reader)
            .map(|frame| frame.map(|(stored, _)| stored))
            .transpose()
    }
}
