use crate::io::buffer::BitField;
use crate::io::buffer::BYTE_LEN;
use crate::io::per::Error;
use crate::io::per::OctetCursor;
use byteorder::ByteOrder;
use byteorder::NetworkEndian;
use log::trace;

const U64_LEN: usize = std::mem::size_of::<u64>();

/// The octets of an encoded whole number. The value is right aligned within `bytes`, just as
/// a big endian integer is, `bit_len` counts the bits that are actually transmitted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WholeNumber {
    bytes: Vec<u8>,
    bit_len: usize,
    octet_aligned: bool,
}

impl WholeNumber {
    pub(crate) fn from_octets(bytes: Vec<u8>) -> Self {
        WholeNumber {
            bit_len: bytes.len() * BYTE_LEN,
            bytes,
            octet_aligned: true,
        }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Whether the standard demands this number to start on an octet boundary
    #[inline]
    pub fn is_octet_aligned(&self) -> bool {
        self.octet_aligned
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The transmitted bits, left aligned
    pub fn to_bit_field(&self) -> BitField {
        let padding = self.bytes.len() * BYTE_LEN - self.bit_len;
        BitField::from_bytes(self.bytes.clone()).shift_left(padding)
    }
}

/// How a constrained whole number is laid out for a given range (`ub - lb + 1`)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Layout {
    /// The value is implied by the constraint
    Empty,
    /// Not octet-aligned, the value is right aligned in a single octet
    BitField { bits: usize },
    /// Octet-aligned and of a fixed octet count
    Octets { octets: usize },
    /// Octet-aligned, the octet count depends on the value
    Indefinite,
}

impl Layout {
    fn for_range(range: u128) -> Self {
        match range {
            0..=1 => Layout::Empty,
            2..=255 => Layout::BitField {
                bits: bit_width(range),
            },
            256 => Layout::Octets { octets: 1 },
            257..=65536 => Layout::Octets { octets: 2 },
            _ => Layout::Indefinite,
        }
    }
}

/// Number of binary digits of `range`. An exact power of two is granted the additional digit.
#[inline]
fn bit_width(range: u128) -> usize {
    (u128::BITS - range.leading_zeros()) as usize
}

#[inline]
fn minimal_octets(value: u64) -> usize {
    let bits = (u64::BITS - value.leading_zeros()) as usize;
    ((bits + BYTE_LEN - 1) / BYTE_LEN).max(1)
}

#[inline]
fn range_of(lower_bound: i64, upper_bound: i64) -> u128 {
    (i128::from(upper_bound) - i128::from(lower_bound) + 1) as u128
}

/// ITU-TX.691 | ISO/IEC 8825-2:2015, chapter 11.5
///
/// Encodes `value - lower_bound` with as few bits as the range requires. Ranges of up to 255
/// values produce an unaligned bit-field, ranges of 256 and of up to 64K values one and two
/// octets. Bigger ranges use the minimal octet count of the offset but never less than two
/// octets.
pub fn encode_constrained_whole_number(
    value: i64,
    lower_bound: i64,
    upper_bound: i64,
) -> Result<WholeNumber, Error> {
    if lower_bound > upper_bound {
        return Err(Error::invalid_constraint(lower_bound, upper_bound));
    }
    if value < lower_bound || value > upper_bound {
        return Err(Error::value_not_in_range(value, lower_bound, upper_bound));
    }

    let offset = (i128::from(value) - i128::from(lower_bound)) as u64;
    let mut buffer = [0u8; U64_LEN];
    NetworkEndian::write_u64(&mut buffer[..], offset);

    let layout = Layout::for_range(range_of(lower_bound, upper_bound));
    let (octets, bit_len, octet_aligned) = match layout {
        Layout::Empty => (0, 0, false),
        Layout::BitField { bits } => (1, bits, false),
        Layout::Octets { octets } => (octets, octets * BYTE_LEN, true),
        Layout::Indefinite => {
            let octets = minimal_octets(offset).max(2);
            (octets, octets * BYTE_LEN, true)
        }
    };

    trace!(
        "constrained whole number {} in {}..={} uses {} bits",
        value,
        lower_bound,
        upper_bound,
        bit_len
    );

    Ok(WholeNumber {
        bytes: buffer[U64_LEN - octets..].to_vec(),
        bit_len,
        octet_aligned,
    })
}

/// Reads a constrained whole number that was written octet by octet, as the bounded length
/// determinant is. The cursor is only advanced on success.
pub fn decode_constrained_whole_number(
    cursor: &mut OctetCursor<'_>,
    lower_bound: i64,
    upper_bound: i64,
) -> Result<i64, Error> {
    if lower_bound > upper_bound {
        return Err(Error::invalid_constraint(lower_bound, upper_bound));
    }
    let range = range_of(lower_bound, upper_bound);
    let octets = match Layout::for_range(range) {
        Layout::Empty => return Ok(lower_bound),
        Layout::BitField { .. } => 1,
        Layout::Octets { octets } => octets,
        Layout::Indefinite => {
            return Err(Error::unsupported_range(format!(
                "the octet count of a whole number in {}..={} is not self-describing",
                lower_bound, upper_bound
            )))
        }
    };

    let offset = NetworkEndian::read_uint(cursor.peek(octets)?, octets);
    if u128::from(offset) >= range {
        return Err(Error::value_not_in_range(
            (i128::from(lower_bound) + i128::from(offset)) as i64,
            lower_bound,
            upper_bound,
        ));
    }
    cursor.advance(octets);
    Ok((i128::from(lower_bound) + i128::from(offset)) as i64)
}
