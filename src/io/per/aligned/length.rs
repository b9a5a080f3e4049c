use crate::io::per::aligned::whole_number::decode_constrained_whole_number;
use crate::io::per::aligned::whole_number::encode_constrained_whole_number;
use crate::io::per::aligned::WholeNumber;
use crate::io::per::Error;
use crate::io::per::OctetCursor;
use byteorder::ByteOrder;
use byteorder::NetworkEndian;
use log::debug;

pub const LENGTH_DET_L1: u64 = 127;
pub const LENGTH_DET_L2: u64 = 16383;

/// Upper bounds from here on no longer produce an implicit (constrained) length determinant
pub const IMPLICIT_UPPER_BOUND_LIMIT: u64 = 64 * 1024;

#[inline]
fn implicit_upper_bound(upper_bound: Option<u64>) -> Option<u64> {
    upper_bound.filter(|ub| *ub < IMPLICIT_UPPER_BOUND_LIMIT)
}

/// ITU-TX.691 | ISO/IEC 8825-2:2015, chapter 11.9
///
/// With an upper bound below 64K, the length is encoded as constrained whole number in
/// `0..=upper_bound` and is not self-describing. Otherwise the length is prefixed by its form:
/// a single octet for up to 127 and two octets with the leading bits `10` for up to 16383.
/// Bigger lengths need fragmentation, which is left to the caller.
pub fn encode_length_determinant(
    length: u64,
    upper_bound: Option<u64>,
) -> Result<WholeNumber, Error> {
    if let Some(upper_bound) = implicit_upper_bound(upper_bound) {
        if length > upper_bound {
            debug!("length {} exceeds the upper bound {}", length, upper_bound);
            return Err(Error::size_not_in_range(length, 0, Some(upper_bound)));
        }
        // both fit into an i64 since the upper bound is below 64K
        return encode_constrained_whole_number(length as i64, 0, upper_bound as i64);
    }

    if length <= LENGTH_DET_L1 {
        // 11.9.3.6
        Ok(WholeNumber::from_octets(vec![length as u8]))
    } else if length <= LENGTH_DET_L2 {
        // 11.9.3.7
        let mut buffer = [0u8; 2];
        NetworkEndian::write_u16(&mut buffer[..], 0x8000 | length as u16);
        Ok(WholeNumber::from_octets(buffer.to_vec()))
    } else {
        debug!("length {} requires a fragmented length determinant", length);
        Err(Error::unsupported_range(format!(
            "Writing length determinant for lengths > {} is unsupported, tried for length {}",
            LENGTH_DET_L2, length
        )))
    }
}

/// ITU-TX.691 | ISO/IEC 8825-2:2015, chapter 11.9
///
/// Counterpart of [`encode_length_determinant`], consumes exactly the octets the determinant was
/// written with. On failure, the cursor is left untouched.
pub fn decode_length_determinant(
    cursor: &mut OctetCursor<'_>,
    upper_bound: Option<u64>,
) -> Result<u64, Error> {
    if let Some(upper_bound) = implicit_upper_bound(upper_bound) {
        return decode_constrained_whole_number(cursor, 0, upper_bound as i64).map(|l| l as u64);
    }

    let first = cursor.peek(1)?[0];
    if first & 0x80 == 0 {
        // 11.9.3.6: less than or equal to 127
        cursor.advance(1);
        Ok(u64::from(first & 0x7F))
    } else if first & 0x40 == 0 {
        // 11.9.3.7: greater than 127 and less than or equal to 16K
        let pair = cursor.peek(2)?;
        cursor.advance(2);
        Ok(u64::from(NetworkEndian::read_u16(pair) & 0x3FFF))
    } else {
        // 11.9.3.8: chunks of 16k multiples
        Err(Error::unsupported_range("Cannot read a fragmented length determinant"))
    }
}
