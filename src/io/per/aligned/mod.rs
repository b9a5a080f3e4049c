//! Encoders of the ALIGNED variant (ITU-TX.691 | ISO/IEC 8825-2:2015). Fields that the
//! standard requires to be octet-aligned are aligned relative to the start of the returned
//! field, the absolute alignment within the final message is up to the caller.

pub mod composite;
pub mod length;
pub mod scalar;
pub mod whole_number;

pub use composite::encode_bit_string;
pub use composite::encode_octet_string;
pub use composite::encode_sequence;
pub use length::decode_length_determinant;
pub use length::encode_length_determinant;
pub use scalar::encode_choice;
pub use scalar::encode_enumerated;
pub use scalar::encode_integer;
pub use scalar::encode_normally_small_non_negative_whole_number;
pub use whole_number::decode_constrained_whole_number;
pub use whole_number::encode_constrained_whole_number;
pub use whole_number::WholeNumber;

use crate::io::buffer::BitField;

/// Puts the optional extension bit in front of `body`. If `body` has to start on an octet
/// boundary, the extension bit is padded to a full octet.
pub(crate) fn with_extension_bit(
    extension: Option<bool>,
    body: &BitField,
    body_octet_aligned: bool,
) -> BitField {
    let head = match extension {
        Some(bit) => BitField::from_bit(bit),
        None => BitField::empty(),
    };
    if body_octet_aligned {
        head.pad_to_octet().concatenate(body)
    } else {
        head.concatenate(body)
    }
}

/// `Some(false)` for extensible types whose value lies within the root, `None` otherwise
#[inline]
pub(crate) fn root_extension_bit(extensible: bool) -> Option<bool> {
    if extensible {
        Some(false)
    } else {
        None
    }
}
