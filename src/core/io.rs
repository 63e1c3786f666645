//! Input opening with compression auto-detection
//!
//! Variant files frequently arrive gzip- or bzip2-compressed. Detection uses
//! the file extension first, then magic bytes, so misnamed files still open.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Default buffer size for input readers (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression format from file path and/or content
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    // First check by extension
    if extension == "gz" {
        return Ok(CompressionFormat::Gzip);
    }
    if extension == "bz2" {
        return Ok(CompressionFormat::Bzip2);
    }

    // Then check by magic bytes
    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(CompressionFormat::Gzip);
    }
    // BZ2 magic: "BZh" (0x42 0x5a 0x68)
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(CompressionFormat::Bzip2);
    }

    Ok(CompressionFormat::Plain)
}

/// Open an input file for line-oriented reading, decompressing if needed
pub fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let format = detect_compression(path)?;
    let file = File::open(path)?;

    Ok(match format {
        CompressionFormat::Gzip => {
            let decoder = flate2::read::GzDecoder::new(file);
            Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder))
        }
        CompressionFormat::Bzip2 => {
            let decoder = bzip2::read::BzDecoder::new(file);
            Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder))
        }
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detect_plain() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        writeln!(temp, "chr1\t100\tA\tT")?;
        temp.flush()?;

        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Plain);
        Ok(())
    }

    #[test]
    fn test_detect_gzip_by_magic() -> io::Result<()> {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let temp = NamedTempFile::new()?;
        let mut encoder = GzEncoder::new(File::create(temp.path())?, Compression::default());
        encoder.write_all(b"chr1\t100\tA\tT\n")?;
        encoder.finish()?;

        // No .gz extension, detection must fall back to magic bytes
        assert_eq!(detect_compression(temp.path())?, CompressionFormat::Gzip);
        Ok(())
    }

    #[test]
    fn test_open_input_gzip_roundtrip() -> io::Result<()> {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let temp = NamedTempFile::new()?;
        let mut encoder = GzEncoder::new(File::create(temp.path())?, Compression::default());
        encoder.write_all(b"line1\nline2\n")?;
        encoder.finish()?;

        let mut reader = open_input(temp.path())?;
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        assert_eq!(content, "line1\nline2\n");
        Ok(())
    }

    #[test]
    fn test_open_input_bzip2_roundtrip() -> io::Result<()> {
        use bzip2::write::BzEncoder;
        use bzip2::Compression;

        let temp = NamedTempFile::new()?;
        let mut encoder = BzEncoder::new(File::create(temp.path())?, Compression::default());
        encoder.write_all(b"line1\nline2\n")?;
        encoder.finish()?;

        let mut reader = open_input(temp.path())?;
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        assert_eq!(content, "line1\nline2\n");
        Ok(())
    }

    #[test]
    fn test_open_input_missing_file() {
        let result = open_input(Path::new("/nonexistent/input.vcf"));
        assert!(result.is_err());
    }
}
