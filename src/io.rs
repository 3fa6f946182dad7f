//! Flat-file sources and sinks.
//!
//! Every file-backed source here follows the same replay rule: it opens its
//! input lazily on the first pull, and a clone starts over from the first row
//! with its own reader. Sinks collect the pipeline first and only create the
//! output file once every record has been produced, so a failing pipeline
//! never leaves a half-written file behind.

#![cfg_attr(not(any(feature = "io-csv", feature = "io-jsonl")), allow(dead_code))]

use crate::io::compression::{DynWriter, auto_detect_reader, auto_detect_writer};
use anyhow::{Context, Result};
use std::fmt;
use std::fs::{File, create_dir_all};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod compression;

#[cfg_attr(docsrs, doc(cfg(feature = "io-jsonl")))]
#[cfg(feature = "io-jsonl")]
pub mod jsonl;

#[cfg_attr(docsrs, doc(cfg(feature = "io-csv")))]
#[cfg(feature = "io-csv")]
pub mod csv;

/// Where a file-backed source reads from.
#[derive(Debug, Clone)]
pub(crate) enum Input {
    /// Shared, immutable bytes; every reader starts at offset zero.
    Bytes(Arc<[u8]>),
    /// A path reopened by every reader. Compressed files are detected by
    /// extension or magic bytes.
    File(PathBuf),
}

impl Input {
    pub(crate) fn open(&self) -> Result<Box<dyn Read + Send>> {
        match self {
            Input::Bytes(bytes) => Ok(Box::new(Cursor::new(Arc::clone(bytes)))),
            Input::File(path) => {
                let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
                auto_detect_reader(f, path)
                    .with_context(|| format!("setup decompression for {}", path.display()))
            }
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Bytes(bytes) => write!(f, "<{} in-memory bytes>", bytes.len()),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Create `path` (and any missing parent directories) for writing, wrapped in
/// a compressor when the extension asks for one. The caller must `finish` it.
pub(crate) fn create_output(path: &Path) -> Result<DynWriter> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    auto_detect_writer(f, path).with_context(|| format!("setup compression for {}", path.display()))
}
