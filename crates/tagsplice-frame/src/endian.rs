//! Size-field byte order.
//!
//! Every 32-bit size in the tag (the header's declared size and each frame's
//! size) is stored big-endian. On a little-endian host decoding is a plain
//! 4-byte reversal. This is not the 7-bit synchsafe encoding; the two are
//! never mixed.

/// Width of an encoded size field.
pub const SIZE_FIELD_LEN: usize = 4;

/// Decode a wire-order size field.
pub fn to_host_order(bytes: [u8; SIZE_FIELD_LEN]) -> u32 {
    u32::from_be_bytes(bytes)
}

/// Encode a size for the wire.
pub fn to_wire_order(value: u32) -> [u8; SIZE_FIELD_LEN] {
    value.to_be_bytes()
}
