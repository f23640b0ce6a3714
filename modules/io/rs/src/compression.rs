use eyre::{ensure, Result, WrapErr};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Input stream of a text file that might be gzip-compressed.
pub enum DecompressedStream<R: Read> {
    PlainText(R),
    Gzip(MultiGzDecoder<R>),
}

impl<R: Read + Send + 'static> DecompressedStream<R> {
    pub fn boxed(self) -> Box<dyn BufRead + Send + 'static> {
        match self {
            DecompressedStream::PlainText(x) => Box::new(BufReader::new(x)),
            DecompressedStream::Gzip(x) => Box::new(BufReader::new(x)),
        }
    }
}

/// Detect the compression of an in-memory payload by its signature.
pub fn from_bytes(bytes: &[u8]) -> DecompressedStream<std::io::Cursor<Vec<u8>>> {
    let cursor = std::io::Cursor::new(bytes.to_vec());
    match infer::get(bytes).map(|x| x.mime_type()) {
        Some("application/gzip") => DecompressedStream::Gzip(MultiGzDecoder::new(cursor)),
        _ => DecompressedStream::PlainText(cursor),
    }
}

/// Open a file for reading. Gzip is detected by the file signature, everything else is
/// treated as plain text.
pub fn read_file(path: impl AsRef<Path>) -> Result<DecompressedStream<File>> {
    let path = path.as_ref();
    ensure!(path.exists(), "File {} does not exist", path.display());

    let mime = infer::get_from_path(path)
        .wrap_err_with(|| format!("Failed to read the signature of {}", path.display()))?
        .map(|x| x.mime_type());

    let file = File::open(path)?;
    let stream = match mime {
        Some("application/gzip") => DecompressedStream::Gzip(MultiGzDecoder::new(file)),
        _ => DecompressedStream::PlainText(file),
    };
    Ok(stream)
}

/// Create a file for writing. Output is gzip-compressed if the extension is `gz` or `gzip`.
pub fn write_file(path: impl AsRef<Path>) -> Result<Box<dyn Write + Send + 'static>> {
    let path = path.as_ref();
    let file = File::create(path)
        .wrap_err_with(|| format!("Failed to create the output file {}", path.display()))?;

    let gzipped = matches!(
        path.extension().and_then(|x| x.to_str()),
        Some("gz") | Some("gzip")
    );
    let writer: Box<dyn Write + Send + 'static> = if gzipped {
        Box::new(BufWriter::new(GzEncoder::new(file, Compression::default())))
    } else {
        Box::new(BufWriter::new(file))
    };
    Ok(writer)
}
