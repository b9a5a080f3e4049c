use crate::io::per::Error;
use std::convert::TryFrom;

pub const BYTE_LEN: usize = 8;

/// A run of significant bits, most significant bit first within each octet.
///
/// The content is left aligned: `value` holds exactly `ceil(bit_len / 8)` octets and every bit
/// at a position `>= bit_len` is zero. All operations return a new [`BitField`] and leave their
/// inputs untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBitField")]
pub struct BitField {
    value: Vec<u8>,
    len: usize,
}

#[derive(Deserialize)]
struct RawBitField {
    value: Vec<u8>,
    len: usize,
}

impl TryFrom<RawBitField> for BitField {
    type Error = Error;

    fn try_from(raw: RawBitField) -> Result<Self, Self::Error> {
        BitField::new(raw.value, raw.len)
    }
}

impl BitField {
    #[inline]
    pub const fn empty() -> Self {
        BitField {
            value: Vec::new(),
            len: 0,
        }
    }

    /// Takes the first `bit_len` bits of `value`. Surplus octets are dropped and the unused bits
    /// of the last octet are cleared.
    pub fn new(mut value: Vec<u8>, bit_len: usize) -> Result<Self, Error> {
        if bit_len > value.len() * BYTE_LEN {
            return Err(Error::insufficient_bits(bit_len, value.len() * BYTE_LEN));
        }
        value.truncate(octets_for(bit_len));
        if let Some(last) = value.last_mut() {
            *last &= trailing_mask(bit_len);
        }
        Ok(BitField {
            value,
            len: bit_len,
        })
    }

    #[inline]
    pub fn from_bytes(value: Vec<u8>) -> Self {
        let len = value.len() * BYTE_LEN;
        BitField { value, len }
    }

    #[inline]
    pub fn from_bit(bit: bool) -> Self {
        BitField {
            value: vec![if bit { 0x80 } else { 0x00 }],
            len: 1,
        }
    }

    /// Interprets the last `bit_len` bits of `bytes` as the run, as numbers and raw register
    /// values are laid out, and moves them to the front.
    pub fn from_right_aligned(bytes: &[u8], bit_len: usize) -> Result<Self, Error> {
        let available = bytes.len() * BYTE_LEN;
        if bit_len > available {
            return Err(Error::insufficient_bits(bit_len, available));
        }
        Ok(BitField::from_bytes(bytes.to_vec()).shift_left(available - bit_len))
    }

    #[inline]
    pub fn bit_len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        self.value.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_octet_aligned(&self) -> bool {
        self.len % BYTE_LEN == 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.value[..]
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.value
    }

    pub fn bit(&self, position: usize) -> Option<bool> {
        if position < self.len {
            Some(self.value[position / BYTE_LEN] & (0x80 >> (position % BYTE_LEN)) != 0)
        } else {
            None
        }
    }

    /// Appends the significant bits of `other` directly behind the ones of `self`.
    pub fn concatenate(&self, other: &BitField) -> BitField {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_octet_aligned() {
            let mut value = Vec::with_capacity(self.value.len() + other.value.len());
            value.extend_from_slice(&self.value);
            value.extend_from_slice(&other.value);
            return BitField {
                value,
                len: self.len + other.len,
            };
        }

        let len = self.len + other.len;
        let mut value = vec![0u8; octets_for(len)];
        value[..self.value.len()].copy_from_slice(&self.value);
        bit_string_copy_bulked(&other.value, 0, &mut value, self.len, other.len);
        BitField { value, len }
    }

    /// Drops the `n` leading bits, the remaining ones move to the front.
    pub fn shift_left(&self, n: usize) -> BitField {
        if n == 0 {
            return self.clone();
        }
        let len = self.len.saturating_sub(n);
        let mut value = vec![0u8; octets_for(len)];
        bit_string_copy_bulked(&self.value, n.min(self.len), &mut value, 0, len);
        BitField { value, len }
    }

    /// Inserts `n` zero bits in front of the current content.
    pub fn shift_right(&self, n: usize) -> BitField {
        if n == 0 {
            return self.clone();
        }
        let len = self.len + n;
        let mut value = vec![0u8; octets_for(len)];
        bit_string_copy_bulked(&self.value, 0, &mut value, n, self.len);
        BitField { value, len }
    }

    /// Extends the field with zero bits up to the next octet boundary.
    pub fn pad_to_octet(&self) -> BitField {
        BitField {
            value: self.value.clone(),
            len: self.value.len() * BYTE_LEN,
        }
    }
}

impl From<bool> for BitField {
    #[inline]
    fn from(bit: bool) -> Self {
        BitField::from_bit(bit)
    }
}

#[inline]
pub(crate) const fn octets_for(bit_len: usize) -> usize {
    (bit_len + BYTE_LEN - 1) / BYTE_LEN
}

#[inline]
const fn trailing_mask(bit_len: usize) -> u8 {
    match bit_len % BYTE_LEN {
        0 => 0xFF,
        used => 0xFF << (BYTE_LEN - used),
    }
}

#[inline]
fn bit_string_copy(
    src: &[u8],
    src_bit_position: usize,
    dst: &mut [u8],
    dst_bit_position: usize,
    len: usize,
) {
    debug_assert!(dst.len() * BYTE_LEN >= dst_bit_position + len);
    debug_assert!(src.len() * BYTE_LEN >= src_bit_position + len);
    for bit in 0..len {
        let dst_byte_pos = (dst_bit_position + bit) / BYTE_LEN;
        let dst_bit_pos = (dst_bit_position + bit) % BYTE_LEN;
        let dst_bit_pos = BYTE_LEN - dst_bit_pos - 1; // flip

        let bit = {
            let src_byte_pos = (src_bit_position + bit) / BYTE_LEN;
            let src_bit_pos = (src_bit_position + bit) % BYTE_LEN;
            let src_bit_pos = BYTE_LEN - src_bit_pos - 1; // flip

            src[src_byte_pos] & (0x01 << src_bit_pos) > 0
        };

        if bit {
            // set bit
            dst[dst_byte_pos] |= 0x01 << dst_bit_pos;
        } else {
            // reset bit
            dst[dst_byte_pos] &= !(0x01 << dst_bit_pos);
        }
    }
}

pub(crate) fn bit_string_copy_bulked(
    src: &[u8],
    src_bit_position: usize,
    dst: &mut [u8],
    dst_bit_position: usize,
    len: usize,
) {
    // chosen by real world tests
    if len <= BYTE_LEN * 2 {
        return bit_string_copy(src, src_bit_position, dst, dst_bit_position, len);
    }

    let bits_till_full_byte_src = (BYTE_LEN - (src_bit_position % BYTE_LEN)) % BYTE_LEN;

    // align the source position to a full byte
    if bits_till_full_byte_src != 0 {
        bit_string_copy(
            src,
            src_bit_position,
            dst,
            dst_bit_position,
            bits_till_full_byte_src,
        );
    }

    let src_bit_position = src_bit_position + bits_till_full_byte_src;
    let dst_bit_position = dst_bit_position + bits_till_full_byte_src;
    let len = len - bits_till_full_byte_src;

    let dst_byte_index = dst_bit_position / BYTE_LEN;
    let dst_byte_offset = dst_bit_position % BYTE_LEN;

    let src_byte_index = src_bit_position / BYTE_LEN;
    let len_in_bytes = len / BYTE_LEN;

    if dst_byte_offset == 0 {
        dst[dst_byte_index..dst_byte_index + len_in_bytes]
            .copy_from_slice(&src[src_byte_index..src_byte_index + len_in_bytes]);
    } else {
        for index in 0..len_in_bytes {
            let byte = src[index + src_byte_index];
            let half_left = byte >> dst_byte_offset;
            let half_right = byte << (BYTE_LEN - dst_byte_offset);

            // keep what is already written on the left side
            dst[index + dst_byte_index] =
                (dst[index + dst_byte_index] & (0xFF << (BYTE_LEN - dst_byte_offset))) | half_left;

            dst[index + dst_byte_index + 1] = half_right;
        }
    }

    if len % BYTE_LEN != 0 {
        bit_string_copy(
            src,
            src_bit_position + (len_in_bytes * BYTE_LEN),
            dst,
            dst_bit_position + (len_in_bytes * BYTE_LEN),
            len % BYTE_LEN,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(value: &[u8], len: usize) -> BitField {
        BitField::new(value.to_vec(), len).unwrap()
    }

    #[test]
    fn test_new_normalizes_trailing_bits() {
        let bits = field(&[0xFF, 0xFF, 0xFF], 9);
        assert_eq!(&[0xFF, 0x80], bits.as_bytes());
        assert_eq!(9, bits.bit_len());
    }

    #[test]
    fn test_new_rejects_length_beyond_content() {
        let error = BitField::new(vec![0x00], 9).unwrap_err();
        assert!(error.is_range_error());
    }

    #[test]
    fn test_concatenate_across_octet_boundary() {
        let result = field(&[0x80, 0x80], 9).concatenate(&field(&[0x08, 0x80], 9));
        assert_eq!(field(&[0x80, 0x84, 0x40], 18), result);
    }

    #[test]
    fn test_concatenate_octet_aligned_appends() {
        let result = field(&[0xAB], 8).concatenate(&field(&[0xC0], 3));
        assert_eq!(field(&[0xAB, 0xC0], 11), result);
    }

    #[test]
    fn test_concatenate_long_unaligned_run() {
        let head = field(&[0xA0], 3);
        let tail = BitField::from_bytes(vec![0xFF, 0x00, 0xFF, 0x00, 0x81]);
        let result = head.concatenate(&tail);
        assert_eq!(43, result.bit_len());
        assert_eq!(&[0xBF, 0xE0, 0x1F, 0xE0, 0x10, 0x20], result.as_bytes());
    }

    #[test]
    fn test_concatenate_identity() {
        let bits = field(&[0x80, 0x80], 9);
        assert_eq!(bits, bits.concatenate(&BitField::empty()));
        assert_eq!(bits, BitField::empty().concatenate(&bits));
    }

    #[test]
    fn test_shift_left() {
        let bits = field(&[0x00, 0x11, 0x22], 24);
        assert_eq!(&[0x01, 0x12, 0x20], bits.shift_left(4).as_bytes());
        assert_eq!(20, bits.shift_left(4).bit_len());
        assert_eq!(&[0x11, 0x22], bits.shift_left(8).as_bytes());
        assert_eq!(&[0x12, 0x20], bits.shift_left(12).as_bytes());
        assert_eq!(BitField::empty(), bits.shift_left(30));
        assert_eq!(bits, bits.shift_left(0));
    }

    #[test]
    fn test_shift_right() {
        let bits = field(&[0x00, 0x11, 0x20], 20);
        assert_eq!(&[0x00, 0x01, 0x12], bits.shift_right(4).as_bytes());
        assert_eq!(&[0x00, 0x00, 0x01, 0x12], bits.shift_right(12).as_bytes());
        assert_eq!(&[0x00, 0x00, 0x08, 0x90], bits.shift_right(9).as_bytes());
        assert_eq!(bits, bits.shift_right(0));
    }

    #[test]
    fn test_shift_right_grows_by_octet() {
        let bits = field(&[0xFF], 8);
        let shifted = bits.shift_right(1);
        assert_eq!(field(&[0x7F, 0x80], 9), shifted);
    }

    #[test]
    fn test_from_right_aligned() {
        assert_eq!(
            field(&[0x10], 4),
            BitField::from_right_aligned(&[0x01], 4).unwrap()
        );
        assert_eq!(
            field(&[0x00, 0x00, 0x01, 0x80], 25),
            BitField::from_right_aligned(&[0x00, 0x00, 0x00, 0x03], 25).unwrap()
        );
        assert!(BitField::from_right_aligned(&[0x00], 9).is_err());
    }

    #[test]
    fn test_pad_to_octet() {
        let padded = field(&[0x80, 0x80], 9).pad_to_octet();
        assert_eq!(16, padded.bit_len());
        assert!(padded.is_octet_aligned());
        assert_eq!(&[0x80, 0x80], padded.as_bytes());
    }

    #[test]
    fn test_bit_access() {
        let bits = field(&[0x40], 2);
        assert_eq!(Some(false), bits.bit(0));
        assert_eq!(Some(true), bits.bit(1));
        assert_eq!(None, bits.bit(2));
    }
}
