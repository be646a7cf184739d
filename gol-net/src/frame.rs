use gol_base::{err, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::io::{Read, Write};

/// Write `val` msgpack-encoded, preceded by a 4-byte big-endian length
/// prefix, so a stream reader knows exactly how many bytes to pull before
/// handing them to `rmp_serde`. TCP gives no message boundaries of its own.
pub fn write_framed<T: Serialize, W: Write>(w: &mut W, val: &T) -> Result<()> {
    let body = rmp_serde::to_vec(val).map_err(|e| err(e.to_string()))?;
    let len = u32::try_from(body.len()).map_err(|e| err(e.to_string()))?;
    w.write_all(&len.to_be_bytes())?;
    w.write_all(&body)?;
    Ok(())
}

/// Read one length-prefixed msgpack value back. Returns `Ok(None)` if the
/// stream is closed cleanly before any bytes of the next frame arrive.
pub fn read_framed<T: DeserializeOwned, R: Read>(r: &mut R) -> Result<Option<T>> {
    let mut len_buf = [0u8; 4];
    match r.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    let len = u32::from_be_bytes(len_buf) as usize;
    let mut body = vec![0u8; len];
    r.read_exact(&mut body)?;
    let val = rmp_serde::from_slice(&body).map_err(|e| err(e.to_string()))?;
    Ok(Some(val))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;
    use std::io::Cursor;
    use test_log::test;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Sample {
        a: u32,
        b: String,
    }

    #[test]
    fn test_roundtrip() {
        let mut buf = Vec::new();
        let val = Sample {
            a: 42,
            b: "hello".into(),
        };
        write_framed(&mut buf, &val).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded: Sample = read_framed(&mut cursor).unwrap().unwrap();
        assert_eq!(decoded, val);
    }

    #[test]
    fn test_empty_stream_is_none() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        let decoded: Option<Sample> = read_framed(&mut cursor).unwrap();
        assert!(decoded.is_none());
    }
}
