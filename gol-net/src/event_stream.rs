use gol_base::Result;
use gol_codec::{decode_coords, decode_varint_fixed8, Event, EventTag};
use std::io::{Read, Write};

/// Write one event to the broker<->controller stream.
pub fn write_event<W: Write>(w: &mut W, ev: &Event, size_int: u8) -> Result<()> {
    let bytes = ev.encode(size_int)?;
    if !bytes.is_empty() {
        w.write_all(&bytes)?;
    }
    Ok(())
}

/// Read one event off the stream. Unlike [`Event::decode`], which works on
/// an already-buffered slice, this pulls exactly as many bytes as each
/// event needs: a tag byte, then (for `Flipped`) a fixed 8-byte length
/// frame followed by that many payload bytes.
///
/// Returns `Ok(None)` on a clean stream close before the next tag byte.
pub fn read_event<R: Read>(r: &mut R, size_int: u8) -> Result<Option<Event>> {
    let mut tag_buf = [0u8; 1];
    match r.read_exact(&mut tag_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    let tag = EventTag::from_u8(tag_buf[0])?;
    let event = match tag {
        EventTag::TurnComplete => Event::TurnComplete,
        EventTag::Pause => Event::Pause,
        EventTag::Resume => Event::Resume,
        EventTag::Save => Event::Save,
        EventTag::Quit => Event::Quit,
        EventTag::Kill => Event::Kill,
        EventTag::Flipped => {
            let mut len_frame = [0u8; 8];
            r.read_exact(&mut len_frame)?;
            let len = decode_varint_fixed8(&len_frame)?;
            let mut payload = vec![0u8; len as usize];
            r.read_exact(&mut payload)?;
            let cells = decode_coords(&payload, size_int)?;
            Event::Flipped(cells)
        }
    };
    Ok(Some(event))
}

#[cfg(test)]
mod test {
    use super::*;
    use gol_grid::Cell;
    use std::io::Cursor;
    use test_log::test;

    #[test]
    fn test_turn_complete_roundtrip() {
        let mut buf = Vec::new();
        write_event(&mut buf, &Event::TurnComplete, 1).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded = read_event(&mut cursor, 1).unwrap().unwrap();
        assert_eq!(decoded, Event::TurnComplete);
    }

    #[test]
    fn test_flipped_roundtrip() {
        let mut buf = Vec::new();
        let cells = vec![Cell::new(2, 3), Cell::new(9, 9)];
        write_event(&mut buf, &Event::Flipped(cells.clone()), 1).unwrap();
        let mut cursor = Cursor::new(buf);
        let decoded = read_event(&mut cursor, 1).unwrap().unwrap();
        assert_eq!(decoded, Event::Flipped(cells));
    }

    #[test]
    fn test_flipped_length_field_is_fixed_eight_bytes() {
        let mut buf = Vec::new();
        let cells = vec![Cell::new(2, 3)];
        write_event(&mut buf, &Event::Flipped(cells.clone()), 1).unwrap();
        let body_len = gol_codec::encode_coords(&cells, 1).len();
        assert_eq!(buf.len(), 1 + 8 + body_len);
    }

    #[test]
    fn test_empty_flipped_writes_nothing() {
        let mut buf = Vec::new();
        write_event(&mut buf, &Event::Flipped(vec![]), 1).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_closed_stream_is_none() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(read_event(&mut cursor, 1).unwrap().is_none());
    }
}
