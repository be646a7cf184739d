use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use gol_base::{GolError, Result};

/// Read a binary PGM ("P5") image from `r`, validating its header against
/// the session's `(width, height)`. Any header mismatch or truncated body
/// is a `GolError::Io`, matching the "fail closed, no silent truncation"
/// policy the rest of the wire codecs use.
pub fn read_pgm<R: Read>(r: &mut R, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut r = BufReader::new(r);

    let magic = read_token(&mut r)?;
    if magic != "P5" {
        return Err(GolError::Io(format!("unsupported PGM magic {magic:?}")).into());
    }
    let w: u32 = read_token(&mut r)?
        .parse()
        .map_err(|_| GolError::Io("non-numeric PGM width".into()))?;
    let h: u32 = read_token(&mut r)?
        .parse()
        .map_err(|_| GolError::Io("non-numeric PGM height".into()))?;
    if w != width || h != height {
        return Err(GolError::Io(format!(
            "PGM dimensions {w}x{h} don't match session {width}x{height}"
        ))
        .into());
    }
    let maxval: u32 = read_token(&mut r)?
        .parse()
        .map_err(|_| GolError::Io("non-numeric PGM maxval".into()))?;
    if maxval != 255 {
        return Err(GolError::Io(format!("unsupported PGM maxval {maxval}, must be 255")).into());
    }

    let count = (width as usize) * (height as usize);
    let mut pixels = vec![0u8; count];
    r.read_exact(&mut pixels)
        .map_err(|e| GolError::Io(format!("truncated PGM body: {e}")))?;
    Ok(pixels)
}

/// Write `pixels` (row-major, one byte per cell) as a binary PGM "P5" image.
pub fn write_pgm<W: Write>(w: &mut W, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    let mut w = BufWriter::new(w);
    write!(w, "P5\n{width} {height}\n255\n").map_err(|e| GolError::Io(e.to_string()))?;
    w.write_all(pixels)
        .map_err(|e| GolError::Io(e.to_string()))?;
    w.flush().map_err(|e| GolError::Io(e.to_string()))?;
    Ok(())
}

pub fn read_pgm_file(path: impl AsRef<Path>, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut f = File::open(path).map_err(|e| GolError::Io(e.to_string()))?;
    read_pgm(&mut f, width, height)
}

pub fn write_pgm_file(
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<()> {
    let mut f = File::create(path).map_err(|e| GolError::Io(e.to_string()))?;
    write_pgm(&mut f, width, height, pixels)
}

/// Reads one whitespace-delimited token from a PGM header, byte by byte --
/// PGM headers have no fixed width, so we can't just split on a known
/// delimiter length.
fn read_token<R: BufRead>(r: &mut R) -> Result<String> {
    let mut buf = [0u8; 1];
    let mut token = String::new();
    loop {
        let n = r
            .read(&mut buf)
            .map_err(|e| GolError::Io(format!("truncated PGM header: {e}")))?;
        if n == 0 {
            if token.is_empty() {
                return Err(GolError::Io("truncated PGM header".into()).into());
            }
            return Ok(token);
        }
        let b = buf[0];
        if b.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            return Ok(token);
        }
        token.push(b as char);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;
    use test_log::test;

    fn sample_pixels() -> Vec<u8> {
        vec![0, 255, 0, 255, 0, 255]
    }

    #[test]
    fn test_roundtrip() {
        let pixels = sample_pixels();
        let mut buf = Vec::new();
        write_pgm(&mut buf, 3, 2, &pixels).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded = read_pgm(&mut cursor, 3, 2).unwrap();
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn test_header_is_canonical() {
        let mut buf = Vec::new();
        write_pgm(&mut buf, 3, 2, &sample_pixels()).unwrap();
        assert!(buf.starts_with(b"P5\n3 2\n255\n"));
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let mut buf = Vec::new();
        write_pgm(&mut buf, 3, 2, &sample_pixels()).unwrap();
        let mut cursor = Cursor::new(buf);
        assert!(read_pgm(&mut cursor, 4, 4).is_err());
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let mut cursor = Cursor::new(b"P6\n3 2\n255\n".to_vec());
        assert!(read_pgm(&mut cursor, 3, 2).is_err());
    }

    #[test]
    fn test_bad_maxval_is_rejected() {
        let mut cursor = Cursor::new(b"P5\n3 2\n128\n".to_vec());
        assert!(read_pgm(&mut cursor, 3, 2).is_err());
    }

    #[test]
    fn test_truncated_body_is_rejected() {
        let mut cursor = Cursor::new(b"P5\n3 2\n255\n\x00\xff".to_vec());
        assert!(read_pgm(&mut cursor, 3, 2).is_err());
    }
}
