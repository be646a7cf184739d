use crate::bitpack::{pack_bits, unpack_bits};
use crate::coords::{decode_coords, encode_coords};
use gol_base::Result;
use gol_grid::{size_int_bytes, Cell, InitialPixels};

/// Choose whichever of the two initial-grid encodings is smaller on the
/// wire: a dense bit-packed plane, or a sparse list of alive coordinates.
pub fn encode_initial(pixels: &[u8], width: u32, height: u32) -> InitialPixels {
    let size = size_int_bytes(width.max(height));
    let alive: Vec<Cell> = pixels
        .iter()
        .enumerate()
        .filter(|(_, &p)| p != 0)
        .map(|(i, _)| Cell::new((i as u32) % width, (i as u32) / width))
        .collect();
    let coord_bytes = encode_coords(&alive, size);
    let packed_bytes = pack_bits(pixels);
    if coord_bytes.len() < packed_bytes.len() {
        InitialPixels::Coordinates(coord_bytes)
    } else {
        InitialPixels::BitPacked(packed_bytes)
    }
}

pub fn decode_initial(
    encoded: &InitialPixels,
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    let count = (width as usize) * (height as usize);
    match encoded {
        InitialPixels::BitPacked(bytes) => Ok(unpack_bits(bytes, count)),
        InitialPixels::Coordinates(bytes) => {
            let size = size_int_bytes(width.max(height));
            let cells = decode_coords(bytes, size)?;
            let mut pixels = vec![0u8; count];
            for c in cells {
                pixels[(c.y as usize) * (width as usize) + (c.x as usize)] = 255;
            }
            Ok(pixels)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_roundtrip_sparse_grid_picks_coordinates() {
        let width = 64u32;
        let height = 64u32;
        let mut pixels = vec![0u8; (width * height) as usize];
        pixels[10] = 255;
        pixels[200] = 255;
        let encoded = encode_initial(&pixels, width, height);
        assert!(matches!(encoded, InitialPixels::Coordinates(_)));
        let decoded = decode_initial(&encoded, width, height).unwrap();
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn test_roundtrip_dense_grid_picks_bitpacked() {
        let width = 16u32;
        let height = 16u32;
        let pixels: Vec<u8> = (0..width * height)
            .map(|i| if i % 2 == 0 { 255 } else { 0 })
            .collect();
        let encoded = encode_initial(&pixels, width, height);
        assert!(matches!(encoded, InitialPixels::BitPacked(_)));
        let decoded = decode_initial(&encoded, width, height).unwrap();
        assert_eq!(decoded, pixels);
    }
}
