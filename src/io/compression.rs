//! Transparent compression for file sources and sinks.
//!
//! Codecs are detected from the file extension first and, for readers, from
//! the stream's magic bytes as a fallback. Without any compression feature the
//! functions here are plain pass-throughs.
//!
//! ## Built-in codecs
//! - **Gzip** (`.gz`, `.gzip`) via `flate2` (feature: `compression-gzip`)
//! - **Zstd** (`.zst`, `.zstd`) via `zstd` (feature: `compression-zstd`)
//!
//! Further codecs can be plugged in with [`register_codec`].
//!
//! ```no_run
//! use rowflow::io::compression::auto_detect_reader;
//! use std::fs::File;
//! # fn main() -> anyhow::Result<()> {
//! let file = File::open("rows.csv.gz")?;
//! let reader = auto_detect_reader(file, "rows.csv.gz")?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Reader type handed to sources; `Send` so sources can move between threads.
pub type DynReader = Box<dyn Read + Send>;

/// Writer type handed to sinks.
pub type DynWriter = Box<dyn FinishWrite>;

/// A writer whose last bytes (a compression trailer, a buffered tail) are
/// written by an explicit [`finish`](FinishWrite::finish) so that failures
/// surface as errors instead of being lost in `Drop`.
pub trait FinishWrite: Write {
    /// Write any pending bytes and trailers, then flush the underlying writer.
    ///
    /// # Errors
    /// Returns the I/O error hit while writing the tail.
    fn finish(self: Box<Self>) -> std::io::Result<()>;
}

impl<W: Write> FinishWrite for BufWriter<W> {
    fn finish(self: Box<Self>) -> std::io::Result<()> {
        let mut inner = (*self).into_inner().map_err(|e| e.into_error())?;
        inner.flush()
    }
}

#[cfg(feature = "compression-gzip")]
impl<W: Write> FinishWrite for flate2::write::GzEncoder<W> {
    fn finish(self: Box<Self>) -> std::io::Result<()> {
        (*self).finish()?.flush()
    }
}

#[cfg(feature = "compression-zstd")]
impl<W: Write> FinishWrite for zstd::stream::write::Encoder<'static, W> {
    fn finish(self: Box<Self>) -> std::io::Result<()> {
        (*self).finish()?.flush()
    }
}

static CODEC_REGISTRY: RwLock<Vec<Arc<dyn CompressionCodec>>> = RwLock::new(Vec::new());

/// Built-in codecs followed by any registered ones.
fn codecs() -> Vec<Arc<dyn CompressionCodec>> {
    let mut all: Vec<Arc<dyn CompressionCodec>> = Vec::new();
    #[cfg(feature = "compression-gzip")]
    all.push(Arc::new(GzipCodec));
    #[cfg(feature = "compression-zstd")]
    all.push(Arc::new(ZstdCodec));
    let extra = CODEC_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    all.extend(extra.iter().cloned());
    all
}

/// Register a custom codec. It is consulted after the built-in ones.
pub fn register_codec(codec: Arc<dyn CompressionCodec>) {
    CODEC_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(codec);
}

/// A pluggable compression algorithm.
pub trait CompressionCodec: Send + Sync {
    fn name(&self) -> &str;

    /// Lowercase extensions including the leading dot, e.g. `&[".gz"]`.
    fn extensions(&self) -> &[&str];

    /// Signature at the start of a compressed stream, if the format has one.
    fn magic_bytes(&self) -> Option<&[u8]>;

    /// Wrap `reader` with a decompressor.
    ///
    /// # Errors
    /// Returns an error if the decoder cannot be initialised.
    fn wrap_reader(&self, reader: DynReader) -> std::io::Result<DynReader>;

    /// Wrap `writer` with a compressor. The sink calls
    /// [`FinishWrite::finish`] once all data is written.
    ///
    /// # Errors
    /// Returns an error if the encoder cannot be initialised.
    fn wrap_writer(&self, writer: Box<dyn Write>) -> std::io::Result<DynWriter>;
}

fn detect_from_extension(path: &Path) -> Option<Arc<dyn CompressionCodec>> {
    let path_str = path.to_string_lossy().to_lowercase();
    codecs()
        .into_iter()
        .find(|codec| codec.extensions().iter().any(|ext| path_str.ends_with(ext)))
}

/// Peeks at the buffered head of the stream without consuming it.
fn detect_from_magic<R: BufRead>(reader: &mut R) -> Option<Arc<dyn CompressionCodec>> {
    let buf = reader.fill_buf().ok()?;
    if buf.is_empty() {
        return None;
    }
    codecs()
        .into_iter()
        .find(|codec| codec.magic_bytes().is_some_and(|magic| buf.starts_with(magic)))
}

/// Wrap `reader` with a decompressor if `path_hint` or the stream's first bytes
/// identify a known codec; otherwise return it buffered and unchanged.
///
/// # Errors
/// Returns an error if the detected codec fails to initialise.
pub fn auto_detect_reader<R: Read + Send + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<DynReader> {
    if let Some(codec) = detect_from_extension(path_hint.as_ref()) {
        return codec
            .wrap_reader(Box::new(reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    let mut buf_reader = BufReader::new(reader);
    if let Some(codec) = detect_from_magic(&mut buf_reader) {
        return codec
            .wrap_reader(Box::new(buf_reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    Ok(Box::new(buf_reader))
}

/// Wrap `writer` with a compressor chosen by the extension of `path_hint`;
/// otherwise return it buffered. Call [`FinishWrite::finish`] when done.
///
/// # Errors
/// Returns an error if the detected codec fails to initialise.
pub fn auto_detect_writer<W: Write + 'static>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> Result<DynWriter> {
    if let Some(codec) = detect_from_extension(path_hint.as_ref()) {
        return codec
            .wrap_writer(Box::new(writer))
            .with_context(|| format!("wrap writer with {} codec", codec.name()));
    }
    Ok(Box::new(BufWriter::new(writer)))
}

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz", ".gzip"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x1f, 0x8b])
    }

    fn wrap_reader(&self, reader: DynReader) -> std::io::Result<DynReader> {
        use flate2::read::MultiGzDecoder;
        Ok(Box::new(MultiGzDecoder::new(reader)))
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> std::io::Result<DynWriter> {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        Ok(Box::new(GzEncoder::new(writer, Compression::default())))
    }
}

#[cfg(feature = "compression-zstd")]
struct ZstdCodec;

#[cfg(feature = "compression-zstd")]
impl CompressionCodec for ZstdCodec {
    fn name(&self) -> &str {
        "zstd"
    }

    fn extensions(&self) -> &[&str] {
        &[".zst", ".zstd"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x28, 0xb5, 0x2f, 0xfd])
    }

    fn wrap_reader(&self, reader: DynReader) -> std::io::Result<DynReader> {
        zstd::stream::read::Decoder::new(reader).map(|d| Box::new(d) as DynReader)
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> std::io::Result<DynWriter> {
        zstd::stream::write::Encoder::new(writer, 3).map(|e| Box::new(e) as DynWriter)
    }
}
