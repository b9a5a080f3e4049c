use crate::io::buffer::BitField;
use crate::io::per::aligned::encode_constrained_whole_number;
use crate::io::per::aligned::root_extension_bit;
use crate::io::per::aligned::with_extension_bit;
use crate::io::per::Error;
use log::debug;
use log::trace;
use std::convert::TryFrom;

/// Values up to this bound are normally small and written in 6 bits
const NORMALLY_SMALL_MAX: u64 = 63;

/// ITU-TX.691 | ISO/IEC 8825-2:2015, chapter 13
///
/// The value must be within the root range, even for extensible types: this codec does not
/// produce the extension additions of an integer, so the extension bit is always `0`.
pub fn encode_integer(
    value: i64,
    lower_bound: i64,
    upper_bound: i64,
    extensible: bool,
) -> Result<BitField, Error> {
    let number = encode_constrained_whole_number(value, lower_bound, upper_bound)?;
    let field = with_extension_bit(
        root_extension_bit(extensible),
        &number.to_bit_field(),
        number.is_octet_aligned(),
    );
    trace!("integer {} encoded in {} bits", value, field.bit_len());
    Ok(field)
}

/// ITU-TX.691 | ISO/IEC 8825-2:2015, chapter 14
///
/// Encodes the zero based `index` of the enumerant. For extensible enumerations, an index
/// above `upper_bound` names an extension addition and is written as normally small number
/// behind a set extension bit.
pub fn encode_enumerated(
    index: u64,
    lower_bound: u64,
    upper_bound: u64,
    extensible: bool,
) -> Result<BitField, Error> {
    encode_index(index, lower_bound, upper_bound, extensible)
}

/// ITU-TX.691 | ISO/IEC 8825-2:2015, chapter 23
///
/// Same layout as [`encode_enumerated`]; a choice with a single root alternative and no
/// extension marker encodes to nothing.
pub fn encode_choice(
    index: u64,
    lower_bound: u64,
    upper_bound: u64,
    extension_marker: bool,
) -> Result<BitField, Error> {
    encode_index(index, lower_bound, upper_bound, extension_marker)
}

fn encode_index(
    index: u64,
    lower_bound: u64,
    upper_bound: u64,
    extensible: bool,
) -> Result<BitField, Error> {
    if lower_bound > upper_bound {
        return Err(Error::invalid_constraint(signed(lower_bound)?, signed(upper_bound)?));
    }

    if extensible && index > upper_bound {
        trace!("index {} is an extension addition", index);
        let (head, aligned) = normally_small_parts(index - upper_bound - 1)?;
        return Ok(append_aligned(BitField::from_bit(true).concatenate(&head), aligned));
    }

    let number = encode_constrained_whole_number(
        signed(index)?,
        signed(lower_bound)?,
        signed(upper_bound)?,
    )?;
    Ok(with_extension_bit(
        root_extension_bit(extensible),
        &number.to_bit_field(),
        number.is_octet_aligned(),
    ))
}

#[inline]
fn signed(value: u64) -> Result<i64, Error> {
    i64::try_from(value).map_err(|_| {
        debug!("index {} exceeds the supported integer size", value);
        Error::unsupported_range(format!("index {} exceeds i64::MAX", value))
    })
}

/// ITU-TX.691 | ISO/IEC 8825-2:2015, chapter 11.6
///
/// Values up to 63 are written as a `0` bit followed by six bits. Bigger values are written as
/// a `1` bit followed by an octet-aligned semi-constrained whole number, i.e. a one octet length
/// and the minimal count of octets.
pub fn encode_normally_small_non_negative_whole_number(value: u64) -> Result<BitField, Error> {
    let (head, aligned) = normally_small_parts(value)?;
    Ok(append_aligned(head, aligned))
}

/// The unaligned leading bits and the octet-aligned remainder of a normally small number
fn normally_small_parts(value: u64) -> Result<(BitField, Option<BitField>), Error> {
    if value <= NORMALLY_SMALL_MAX {
        // 11.6.1
        return Ok((BitField::from_right_aligned(&[value as u8], 7)?, None));
    }

    // 11.6.2
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0x00).count();
    let mut octets = Vec::with_capacity(1 + bytes.len() - skip);
    octets.push((bytes.len() - skip) as u8);
    octets.extend_from_slice(&bytes[skip..]);

    Ok((BitField::from_bit(true), Some(BitField::from_bytes(octets))))
}

#[inline]
fn append_aligned(head: BitField, aligned: Option<BitField>) -> BitField {
    match aligned {
        Some(aligned) => head.pad_to_octet().concatenate(&aligned),
        None => head,
    }
}
