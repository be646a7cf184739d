use gol_base::{GolError, Result};
use gol_grid::Cell;

/// Encode a list of cells as `2*size` bytes each: X little-endian in `size`
/// bytes, then Y little-endian in `size` bytes. `size` is the grid's
/// `SizeInt` width, the minimal width that can hold its largest dimension.
pub fn encode_coords(cells: &[Cell], size: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(cells.len() * 2 * size as usize);
    for c in cells {
        out.extend_from_slice(&c.x.to_le_bytes()[..size as usize]);
        out.extend_from_slice(&c.y.to_le_bytes()[..size as usize]);
    }
    out
}

pub fn decode_coords(buf: &[u8], size: u8) -> Result<Vec<Cell>> {
    let stride = 2 * size as usize;
    if stride == 0 || buf.len() % stride != 0 {
        return Err(GolError::WireFraming(format!(
            "coordinate buffer length {} is not a multiple of stride {}",
            buf.len(),
            stride
        ))
        .into());
    }
    let mut out = Vec::with_capacity(buf.len() / stride);
    for chunk in buf.chunks_exact(stride) {
        let mut xb = [0u8; 4];
        xb[..size as usize].copy_from_slice(&chunk[..size as usize]);
        let mut yb = [0u8; 4];
        yb[..size as usize].copy_from_slice(&chunk[size as usize..stride]);
        out.push(Cell::new(u32::from_le_bytes(xb), u32::from_le_bytes(yb)));
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_roundtrip_one_byte_coords() {
        let cells = vec![Cell::new(1, 2), Cell::new(100, 50)];
        let buf = encode_coords(&cells, 1);
        assert_eq!(buf.len(), 4);
        let decoded = decode_coords(&buf, 1).unwrap();
        assert_eq!(decoded, cells);
    }

    #[test]
    fn test_roundtrip_two_byte_coords() {
        let cells = vec![Cell::new(300, 4000), Cell::new(0, 65000)];
        let buf = encode_coords(&cells, 2);
        let decoded = decode_coords(&buf, 2).unwrap();
        assert_eq!(decoded, cells);
    }

    #[test]
    fn test_misaligned_buffer_errs() {
        assert!(decode_coords(&[0, 0, 0], 1).is_err());
    }
}
