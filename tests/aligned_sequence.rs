
use test_utils::*;

#[test]
fn test_too_many_optional_fields() {
    let error = encode_sequence(false, 8, 0).unwrap_err();
    assert!(error.is_range_error());
    assert!(matches!(error.kind(), ErrorKind::UnsupportedRange(_)));
}

#[test]
fn test_extensible_single_optional() {
    assert_bit_field(2, &[0x00], &encode_sequence(true, 1, 0).unwrap());
    assert_bit_field(2, &[0x40], &encode_sequence(true, 1, 1).unwrap());
    assert_eq!(
        BitField::from(false).concatenate(&BitField::from(true)),
        encode_sequence(true, 1, 1).unwrap()
    );
}

#[test]
fn test_all_optional_fields_present() {
    assert_bit_field(8, &[0x7F], &encode_sequence(true, 7, 0x7F).unwrap());
    assert_bit_field(7, &[0xFE], &encode_sequence(false, 7, 0x7F).unwrap());
}

#[test]
fn test_extensible_without_optional_fields() {
    assert_eq!(BitField::from(false), encode_sequence(true, 0, 0).unwrap());
}

#[test]
fn test_presence_bitmap_beyond_count() {
    let error = encode_sequence(false, 3, 0b1000).unwrap_err();
    assert_eq!(
        &ErrorKind::InvalidPresenceBitmap {
            bitmap: 0b1000,
            optional_count: 3
        },
        error.kind()
    );
}

#[test]
fn test_sequence_followed_by_member() {
    let preamble = encode_sequence(true, 2, 0b10).unwrap();
    let member = encode_integer(5, 0, 7, false).unwrap();
    assert_bit_field(7, &[0x4A], &preamble.concatenate(&member));
}
