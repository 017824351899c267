use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Something a catalog can be read from.
///
/// The cursor reader does not hold a stream until the first byte is
/// requested; it holds a source and calls [`open`](Self::open) lazily.
/// Each call returns a fresh, independent stream positioned at offset 0
/// together with the total stream length, which bounds the movie loop.
pub trait CatalogSource {
    type Stream: Read + Seek;

    /// Open a new stream over the catalog bytes.
    ///
    /// # Errors
    ///
    /// Any I/O error raised while opening or measuring the stream.
    fn open(&self) -> std::io::Result<(Self::Stream, u64)>;

    /// Human-readable name for log lines.
    fn describe(&self) -> String;
}

/// A catalog file on disk.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileSource {
    type Stream = BufReader<File>;

    fn open(&self) -> std::io::Result<(Self::Stream, u64)> {
        let file = File::open(&self.path)?;
        let len = file.metadata()?.len();
        Ok((BufReader::with_capacity(8192, file), len))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A catalog already held in memory.
///
/// The bytes are shared, so opening is cheap and the header sniff and
/// the cursor reader can each get their own stream.
#[derive(Clone, Debug)]
pub struct MemorySource {
    bytes: Arc<[u8]>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl CatalogSource for MemorySource {
    type Stream = Cursor<Arc<[u8]>>;

    fn open(&self) -> std::io::Result<(Self::Stream, u64)> {
        Ok((Cursor::new(Arc::clone(&self.bytes)), self.bytes.len() as u64))
    }

    fn describe(&self) -> String {
        format!("<memory, {} bytes>", self.bytes.len())
    }
}

impl<S: CatalogSource> CatalogSource for &S {
    type Stream = S::Stream;

    fn open(&self) -> std::io::Result<(Self::Stream, u64)> {
        (**self).open()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
