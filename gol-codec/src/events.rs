use crate::coords::{decode_coords, encode_coords};
use crate::varint::{decode_varint_fixed8, encode_varint_fixed8};
use gol_base::{GolError, Result};
use gol_grid::Cell;

/// One byte on the broker<->controller event stream; see `Event` for the
/// payloads that follow each tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum EventTag {
    TurnComplete = 0,
    Pause = 1,
    Resume = 2,
    Save = 3,
    Quit = 4,
    Kill = 5,
    Flipped = 6,
}

impl EventTag {
    pub fn from_u8(b: u8) -> Result<Self> {
        Ok(match b {
            0 => EventTag::TurnComplete,
            1 => EventTag::Pause,
            2 => EventTag::Resume,
            3 => EventTag::Save,
            4 => EventTag::Quit,
            5 => EventTag::Kill,
            6 => EventTag::Flipped,
            other => {
                return Err(GolError::WireFraming(format!("unknown event tag {other}")).into())
            }
        })
    }
}

/// A decoded broker<->controller event stream message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    TurnComplete,
    Pause,
    Resume,
    Save,
    Quit,
    Kill,
    Flipped(Vec<Cell>),
}

impl Event {
    pub fn tag(&self) -> EventTag {
        match self {
            Event::TurnComplete => EventTag::TurnComplete,
            Event::Pause => EventTag::Pause,
            Event::Resume => EventTag::Resume,
            Event::Save => EventTag::Save,
            Event::Quit => EventTag::Quit,
            Event::Kill => EventTag::Kill,
            Event::Flipped(_) => EventTag::Flipped,
        }
    }

    /// Encode this event onto the stream, including its leading tag byte.
    /// A `Flipped` event with no cells is omitted entirely (returns an
    /// empty vec), matching the `L == 0` elision rule. The length field
    /// that precedes a `Flipped` payload is always exactly 8 bytes, per
    /// the grounded original's `binary.PutVarint` into a fixed buffer.
    pub fn encode(&self, size_int: u8) -> Result<Vec<u8>> {
        if let Event::Flipped(cells) = self {
            if cells.is_empty() {
                return Ok(Vec::new());
            }
            let body = encode_coords(cells, size_int);
            let len_bytes = encode_varint_fixed8(body.len() as i64)?;
            let mut out = Vec::with_capacity(1 + len_bytes.len() + body.len());
            out.push(EventTag::Flipped as u8);
            out.extend_from_slice(&len_bytes);
            out.extend_from_slice(&body);
            return Ok(out);
        }
        Ok(vec![self.tag() as u8])
    }

    /// Decode one event (tag plus any payload) from the front of `buf`,
    /// returning the event and the number of bytes consumed.
    pub fn decode(buf: &[u8], size_int: u8) -> Result<(Event, usize)> {
        if buf.is_empty() {
            return Err(GolError::WireFraming("empty event buffer".into()).into());
        }
        let tag = EventTag::from_u8(buf[0])?;
        match tag {
            EventTag::TurnComplete => Ok((Event::TurnComplete, 1)),
            EventTag::Pause => Ok((Event::Pause, 1)),
            EventTag::Resume => Ok((Event::Resume, 1)),
            EventTag::Save => Ok((Event::Save, 1)),
            EventTag::Quit => Ok((Event::Quit, 1)),
            EventTag::Kill => Ok((Event::Kill, 1)),
            EventTag::Flipped => {
                if buf.len() < 9 {
                    return Err(GolError::WireFraming("truncated flipped length".into()).into());
                }
                let mut len_frame = [0u8; 8];
                len_frame.copy_from_slice(&buf[1..9]);
                let len = decode_varint_fixed8(&len_frame)? as usize;
                let body_start = 9;
                let body_end = body_start + len;
                if buf.len() < body_end {
                    return Err(GolError::WireFraming("truncated flipped payload".into()).into());
                }
                let cells = decode_coords(&buf[body_start..body_end], size_int)?;
                Ok((Event::Flipped(cells), body_end))
            }
        }
    }
}
