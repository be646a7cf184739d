use gol_base::{GolError, Result};

/// Zigzag-encode a signed value the way Go's `encoding/binary.PutVarint`
/// does: map `0,-1,1,-2,2,...` onto `0,1,2,3,4,...` so that small-magnitude
/// negative values still encode in few bytes under the uvarint scheme.
fn zigzag_encode(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

fn zigzag_decode(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

/// Encode `v` as a zigzag varint into at most 8 bytes, LEB128-style: each
/// byte carries 7 bits of payload plus a continuation bit in the high bit.
/// The `FLIPPED` event length field never needs more than this for any
/// grid size this protocol can address.
pub fn encode_varint(v: i64) -> Result<Vec<u8>> {
    let mut u = zigzag_encode(v);
    let mut out = Vec::with_capacity(8);
    loop {
        if out.len() == 8 {
            return Err(GolError::WireFraming("varint exceeds 8 bytes".into()).into());
        }
        let mut b = (u & 0x7f) as u8;
        u >>= 7;
        if u != 0 {
            b |= 0x80;
            out.push(b);
        } else {
            out.push(b);
            break;
        }
    }
    Ok(out)
}

/// Decode a zigzag varint from the front of `buf`, returning the value and
/// the number of bytes consumed.
pub fn decode_varint(buf: &[u8]) -> Result<(i64, usize)> {
    let mut u: u64 = 0;
    for (i, &b) in buf.iter().enumerate() {
        if i == 8 {
            return Err(GolError::WireFraming("varint exceeds 8 bytes".into()).into());
        }
        u |= ((b & 0x7f) as u64) << (7 * i);
        if b & 0x80 == 0 {
            return Ok((zigzag_decode(u), i + 1));
        }
    }
    Err(GolError::WireFraming("truncated varint".into()).into())
}

/// Encode `v` into a fixed 8-byte frame: the same zigzag varint bytes
/// `encode_varint` would produce, zero-padded on the right to fill all 8
/// bytes. This is the `FLIPPED` event's length field, which the grounded
/// original writes via `binary.PutVarint` into a pre-zeroed 8-byte buffer
/// and `Write`s whole, rather than only the bytes the varint itself needs.
pub fn encode_varint_fixed8(v: i64) -> Result<[u8; 8]> {
    let bytes = encode_varint(v)?;
    let mut frame = [0u8; 8];
    frame[..bytes.len()].copy_from_slice(&bytes);
    Ok(frame)
}

/// Decode a zigzag varint out of a fixed 8-byte frame produced by
/// `encode_varint_fixed8`. The zero padding after the varint's last byte
/// is never read: the last real byte has its continuation bit clear, so
/// `decode_varint` stops there on its own.
pub fn decode_varint_fixed8(frame: &[u8; 8]) -> Result<i64> {
    let (v, _) = decode_varint(frame)?;
    Ok(v)
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_roundtrip_small_values() {
        for v in [-1i64, 0, 1, 2, -2, 63, -64, 64, 1000, -1000] {
            let bytes = encode_varint(v).unwrap();
            let (decoded, consumed) = decode_varint(&bytes).unwrap();
            assert_eq!(decoded, v);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn test_zero_encodes_single_byte() {
        let bytes = encode_varint(0).unwrap();
        assert_eq!(bytes, vec![0]);
    }

    #[test]
    fn test_truncated_buffer_errs() {
        assert!(decode_varint(&[0x80]).is_err());
    }

    #[test]
    fn test_fixed8_roundtrip_and_padding() {
        for v in [0i64, 1, -1, 63, -64, 1000, -1000] {
            let frame = encode_varint_fixed8(v).unwrap();
            assert_eq!(frame.len(), 8);
            assert_eq!(decode_varint_fixed8(&frame).unwrap(), v);
        }
        let frame = encode_varint_fixed8(0).unwrap();
        assert_eq!(frame, [0u8; 8]);
    }
}
