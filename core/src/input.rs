//! Opening line-oriented input files.

use std::{
    fs::File,
    io::{self, BufRead},
    path::Path,
};

use flate2::bufread::MultiGzDecoder;

/// A compression method for input files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMethod {
    /// Gzip, including BGZF.
    Gzip,
}

impl CompressionMethod {
    const GZIP_MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

    /// Detects the compression method of a reader without consuming any input.
    pub fn detect<R>(reader: &mut R) -> io::Result<Option<Self>>
    where
        R: BufRead,
    {
        let src = reader.fill_buf()?;

        match src.get(..Self::GZIP_MAGIC_NUMBER.len()) {
            Some(buf) if buf == Self::GZIP_MAGIC_NUMBER => Ok(Some(Self::Gzip)),
            _ => Ok(None),
        }
    }
}

/// Returns a buffered reader from a reader, decompressing gzip input if detected.
pub fn decompress<R>(mut reader: R) -> io::Result<Box<dyn BufRead>>
where
    R: 'static + BufRead,
{
    Ok(match CompressionMethod::detect(&mut reader)? {
        Some(CompressionMethod::Gzip) => Box::new(io::BufReader::new(MultiGzDecoder::new(reader))),
        None => Box::new(reader),
    })
}

/// Opens a path for reading, decompressing gzip input if detected.
pub fn open<P>(path: P) -> io::Result<Box<dyn BufRead>>
where
    P: AsRef<Path>,
{
    File::open(path).map(io::BufReader::new).and_then(decompress)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::{Read, Write};

    use flate2::{write::GzEncoder, Compression};

    #[test]
    fn test_detect_gzip() {
        let mut bytes = CompressionMethod::GZIP_MAGIC_NUMBER.to_vec();
        bytes.extend(b"foobar");

        assert_eq!(
            CompressionMethod::detect(&mut &bytes[..]).unwrap(),
            Some(CompressionMethod::Gzip)
        );
    }

    #[test]
    fn test_detect_plain_text() {
        assert_eq!(
            CompressionMethod::detect(&mut &b"FID IID PHENO PRS\n"[..]).unwrap(),
            None
        );
        assert_eq!(CompressionMethod::detect(&mut &b""[..]).unwrap(), None);
    }

    #[test]
    fn test_decompress_gzip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"f1 p1 1 0.5\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut s = String::new();
        decompress(io::Cursor::new(compressed))
            .unwrap()
            .read_to_string(&mut s)
            .unwrap();

        assert_eq!(s, "f1 p1 1 0.5\n");
    }

    #[test]
    fn test_decompress_plain_text() {
        let mut s = String::new();
        decompress(io::Cursor::new(b"f1 p1 1 0.5\n".to_vec()))
            .unwrap()
            .read_to_string(&mut s)
            .unwrap();

        assert_eq!(s, "f1 p1 1 0.5\n");
    }
}
