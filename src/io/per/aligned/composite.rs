use crate::io::buffer::BitField;
use crate::io::buffer::BYTE_LEN;
use crate::io::per::aligned::encode_constrained_whole_number;
use crate::io::per::aligned::encode_length_determinant;
use crate::io::per::aligned::length::IMPLICIT_UPPER_BOUND_LIMIT;
use crate::io::per::aligned::root_extension_bit;
use crate::io::per::aligned::with_extension_bit;
use crate::io::per::Error;
use log::debug;
use log::trace;

/// The presence flags and the extension bit share a single octet
pub const MAX_OPTIONAL_FIELDS: usize = 7;

/// Fixed size bit strings up to this length are never octet-aligned (16.9)
const UNALIGNED_FIXED_BIT_STRING_MAX: usize = 16;

/// Fixed size octet strings up to this length are never octet-aligned (17.6)
const UNALIGNED_FIXED_OCTET_STRING_MAX: usize = 2;

/// ITU-TX.691 | ISO/IEC 8825-2:2015, chapter 19
///
/// Writes the preamble of a SEQUENCE: the extension bit if `extensible` and one presence flag
/// per OPTIONAL field. The flags are the lowest `optional_count` bits of `presence_bitmap`, the
/// first field being the most significant one.
pub fn encode_sequence(
    extensible: bool,
    optional_count: usize,
    presence_bitmap: u64,
) -> Result<BitField, Error> {
    if optional_count > MAX_OPTIONAL_FIELDS {
        debug!("{} optional fields exceed the presence bitmap", optional_count);
        return Err(Error::unsupported_range(format!(
            "At most {} optional fields are supported, got {}",
            MAX_OPTIONAL_FIELDS, optional_count
        )));
    }
    if presence_bitmap >> optional_count != 0 {
        return Err(Error::invalid_presence_bitmap(presence_bitmap, optional_count));
    }

    let flags = BitField::from_right_aligned(&[presence_bitmap as u8], optional_count)?;
    Ok(with_extension_bit(root_extension_bit(extensible), &flags, false))
}

/// ITU-TX.691 | ISO/IEC 8825-2:2015, chapter 16
///
/// The bit string is made of the last `bit_len` bits of `src`. Returns the preamble (extension
/// bit and length) and the left aligned payload. Fixed size payloads of up to 16 bits are not
/// octet-aligned and are therefore appended to a non-empty preamble, leaving the payload empty.
pub fn encode_bit_string(
    src: &[u8],
    bit_len: usize,
    lower_bound_size: u64,
    upper_bound_size: Option<u64>,
    extensible: bool,
) -> Result<(BitField, BitField), Error> {
    let payload = BitField::from_right_aligned(src, bit_len)?;
    let preamble = size_preamble(
        bit_len as u64,
        lower_bound_size,
        upper_bound_size,
        extensible,
    )?;
    trace!(
        "bit string of {} bits with a preamble of {} bits",
        bit_len,
        preamble.field.bit_len()
    );
    Ok(preamble.fold_short_fixed(payload, UNALIGNED_FIXED_BIT_STRING_MAX))
}

/// ITU-TX.691 | ISO/IEC 8825-2:2015, chapter 17
///
/// Same as [`encode_bit_string`] with the size counted in octets. Fixed size payloads of up to
/// two octets are appended to a non-empty preamble.
pub fn encode_octet_string(
    src: &[u8],
    lower_bound_size: u64,
    upper_bound_size: Option<u64>,
    extensible: bool,
) -> Result<(BitField, BitField), Error> {
    let preamble = size_preamble(
        src.len() as u64,
        lower_bound_size,
        upper_bound_size,
        extensible,
    )?;
    trace!(
        "octet string of {} octets with a preamble of {} bits",
        src.len(),
        preamble.field.bit_len()
    );
    Ok(preamble.fold_short_fixed(
        BitField::from_bytes(src.to_vec()),
        UNALIGNED_FIXED_OCTET_STRING_MAX * BYTE_LEN,
    ))
}

struct SizePreamble {
    field: BitField,
    fixed_size: bool,
}

impl SizePreamble {
    fn fold_short_fixed(
        self,
        payload: BitField,
        unaligned_max_bits: usize,
    ) -> (BitField, BitField) {
        if self.fixed_size && !self.field.is_empty() && payload.bit_len() <= unaligned_max_bits {
            (self.field.concatenate(&payload), BitField::empty())
        } else {
            (self.field, payload)
        }
    }
}

fn size_preamble(
    size: u64,
    lower_bound: u64,
    upper_bound: Option<u64>,
    extensible: bool,
) -> Result<SizePreamble, Error> {
    if let Some(upper_bound) = upper_bound.filter(|ub| lower_bound > *ub) {
        return Err(Error::invalid_constraint(lower_bound as i64, upper_bound as i64));
    }

    let within_root = size >= lower_bound && upper_bound.map_or(true, |ub| size <= ub);
    if !within_root {
        if !extensible {
            debug!(
                "size {} violates the non-extensible constraint {}..={:?}",
                size, lower_bound, upper_bound
            );
            return Err(Error::size_not_in_range(size, lower_bound, upper_bound));
        }
        // 16.6 and 17.3: the size is written as semi-constrained whole number
        let length = encode_length_determinant(size, None)?;
        return Ok(SizePreamble {
            field: with_extension_bit(Some(true), &length.to_bit_field(), true),
            fixed_size: false,
        });
    }

    let extension = root_extension_bit(extensible);
    match upper_bound {
        Some(upper_bound) if upper_bound < IMPLICIT_UPPER_BOUND_LIMIT => {
            if lower_bound == upper_bound {
                Ok(SizePreamble {
                    field: with_extension_bit(extension, &BitField::empty(), false),
                    fixed_size: true,
                })
            } else {
                // within the root, hence all values are below 64K
                let number = encode_constrained_whole_number(
                    size as i64,
                    lower_bound as i64,
                    upper_bound as i64,
                )?;
                Ok(SizePreamble {
                    field: with_extension_bit(
                        extension,
                        &number.to_bit_field(),
                        number.is_octet_aligned(),
                    ),
                    fixed_size: false,
                })
            }
        }
        _ => {
            let length = encode_length_determinant(size, None)?;
            Ok(SizePreamble {
                field: with_extension_bit(extension, &length.to_bit_field(), true),
                fixed_size: false,
            })
        }
    }
}
