mod bitpack;
mod coords;
mod events;
mod initial;
mod varint;

pub use bitpack::{pack_bits, unpack_bits};
pub use coords::{decode_coords, encode_coords};
pub use events::{Event, EventTag};
pub use initial::{decode_initial, encode_initial};
pub use varint::{decode_varint, decode_varint_fixed8, encode_varint, encode_varint_fixed8};
