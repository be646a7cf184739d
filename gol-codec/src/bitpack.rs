/// Pack a full alive/dead pixel plane (one byte per cell, 0 or 255) into
/// one bit per cell, row-major, MSB first within each byte, padded with
/// zero bits to a whole byte at the end of each row's... no: padded only
/// at the very end of the plane, matching a flat bitstream rather than a
/// per-row byte boundary.
pub fn pack_bits(pixels: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; pixels.len().div_ceil(8)];
    for (i, &p) in pixels.iter().enumerate() {
        if p != 0 {
            out[i / 8] |= 0x80 >> (i % 8);
        }
    }
    out
}

/// Inverse of [`pack_bits`]: expand `count` bits back into a pixel plane
/// using the same 0/255 convention.
pub fn unpack_bits(packed: &[u8], count: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let byte = packed[i / 8];
        let bit = (byte >> (7 - (i % 8))) & 1;
        out.push(if bit == 1 { 255 } else { 0 });
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_roundtrip() {
        let pixels = vec![255, 0, 0, 255, 255, 255, 0, 0, 255];
        let packed = pack_bits(&pixels);
        assert_eq!(packed.len(), 2);
        let unpacked = unpack_bits(&packed, pixels.len());
        assert_eq!(unpacked, pixels);
    }

    #[test]
    fn test_all_dead_packs_to_zero() {
        let pixels = vec![0u8; 16];
        let packed = pack_bits(&pixels);
        assert!(packed.iter().all(|&b| b == 0));
    }
}
