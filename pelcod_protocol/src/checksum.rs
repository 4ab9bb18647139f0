//! Frame checksum.

/// Computes the Pelco-D checksum: the sum of all bytes, modulo 256.
///
/// For a [`Frame`][crate::Frame], this covers everything after the sync byte
/// (address, both command bytes and both data bytes).
///
/// ```
/// use pelcod_protocol::checksum::checksum;
///
/// assert_eq!(0x25, checksum(&[0x01, 0x00, 0x04, 0x20, 0x00]));
/// assert_eq!(0x75, checksum(&[0xff, 0x00, 0x4b, 0x8c, 0x9f]));
/// ```
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, b| sum.wrapping_add(*b))
}
