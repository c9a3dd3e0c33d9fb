//! Instance state that survives a destroy/recreate cycle of the container.
//!
//! Binary layout, in order:
//!
//! | field            | encoding                                   |
//! |------------------|--------------------------------------------|
//! | completed flag   | 1 byte, `0` or `1`                         |
//! | current extent   | `i32`, little endian                       |
//! | elapsed ms       | `u32` byte length + decimal digits (UTF-8) |
//!
//! The elapsed time travels as text for compatibility with state written by older releases.
//! Extents are limited to [`MAX_EXTENT`], the largest value the signed field holds; the
//! layout clamps them on entry so a saved extent always decodes unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{OverlapError, Result};
use crate::layout::MAX_EXTENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    /// The overlap finished (or was cancelled) before the state was saved.
    pub completed: bool,
    /// Panel extent along the reveal axis.
    pub current_extent: u32,
    /// Progress checkpoint of the interrupted run.
    pub elapsed_ms: u64,
}

impl PersistedSnapshot {
    /// Encode to the binary layout. An extent above [`MAX_EXTENT`] is written as
    /// [`MAX_EXTENT`].
    pub fn encode(&self) -> Vec<u8> {
        let elapsed = self.elapsed_ms.to_string();
        let extent = i32::try_from(self.current_extent.min(MAX_EXTENT)).unwrap_or(i32::MAX);

        let mut out = Vec::with_capacity(1 + 4 + 4 + elapsed.len());
        out.push(u8::from(self.completed));
        out.extend_from_slice(&extent.to_le_bytes());
        out.extend_from_slice(&(elapsed.len() as u32).to_le_bytes());
        out.extend_from_slice(elapsed.as_bytes());
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader { bytes };

        let completed = match reader.take(1)?[0] {
            0 => false,
            1 => true,
            other => return Err(corrupt(format!("completed flag {other}"))),
        };

        let extent = i32::from_le_bytes(reader.array()?);
        let current_extent =
            u32::try_from(extent).map_err(|_| corrupt(format!("negative extent {extent}")))?;

        let len = u32::from_le_bytes(reader.array()?) as usize;
        let text = std::str::from_utf8(reader.take(len)?)
            .map_err(|_| corrupt("elapsed time is not UTF-8".to_string()))?;
        let elapsed_ms = text
            .parse::<u64>()
            .map_err(|_| corrupt(format!("elapsed time '{text}' is not a number")))?;

        if !reader.bytes.is_empty() {
            return Err(corrupt(format!("{} trailing bytes", reader.bytes.len())));
        }

        Ok(Self {
            completed,
            current_extent,
            elapsed_ms,
        })
    }
}

fn corrupt(reason: String) -> OverlapError {
    OverlapError::CorruptSnapshot(reason)
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.bytes.len() < len {
            return Err(corrupt(format!(
                "truncated: wanted {len} bytes, {} left",
                self.bytes.len()
            )));
        }
        let (head, tail) = self.bytes.split_at(len);
        self.bytes = tail;
        Ok(head)
    }

    fn array(&mut self) -> Result<[u8; 4]> {
        let mut out = [0u8; 4];
        out.copy_from_slice(self.take(4)?);
        Ok(out)
    }
}
