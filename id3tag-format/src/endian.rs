use byteorder::{ByteOrder, LittleEndian};

/// Reverses the order of a 4-byte buffer. Applying it twice yields the input.
#[inline(always)]
pub fn swap_u32_bytes(bytes: [u8; 4]) -> [u8; 4] {
    let [a, b, c, d] = bytes;
    [d, c, b, a]
}

/// Turns an on-disk size field into the host integer.
#[inline(always)]
pub(crate) fn decode_size(raw: [u8; 4]) -> u32 {
    LittleEndian::read_u32(&swap_u32_bytes(raw))
}

/// Turns a host integer into the bytes written for a size field.
///
/// The integer is laid out little-endian and then swapped, so files written
/// here match the ones produced by the existing tooling on little-endian hosts.
#[inline(always)]
pub(crate) fn encode_size(size: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    LittleEndian::write_u32(&mut buf, size);
    swap_u32_bytes(buf)
}
