
use test_utils::*;

#[test]
fn test_constrained() {
    assert_whole_number(8, &[0x01], &encode_length_determinant(1, Some(255)).unwrap());
    assert_whole_number(4, &[0x05], &encode_length_determinant(5, Some(7)).unwrap());
    assert_whole_number(
        16,
        &[0x02, 0xBC],
        &encode_length_determinant(700, Some(1000)).unwrap(),
    );
    assert_whole_number(0, &[], &encode_length_determinant(0, Some(0)).unwrap());
}

#[test]
fn test_constrained_too_long() {
    let error = encode_length_determinant(300, Some(255)).unwrap_err();
    assert_eq!(
        &ErrorKind::SizeNotInRange {
            size: 300,
            min: 0,
            max: Some(255)
        },
        error.kind()
    );
}

#[test]
fn test_unconstrained() {
    assert_whole_number(8, &[0x01], &encode_length_determinant(1, None).unwrap());
    assert_whole_number(8, &[0x7F], &encode_length_determinant(127, None).unwrap());
    assert_whole_number(
        16,
        &[0x80, 0x80],
        &encode_length_determinant(128, None).unwrap(),
    );
    assert_whole_number(
        16,
        &[0xBF, 0xFF],
        &encode_length_determinant(16383, None).unwrap(),
    );
}

#[test]
fn test_unconstrained_requires_fragmentation() {
    let error = encode_length_determinant(16384, None).unwrap_err();
    assert!(error.is_range_error());
    assert!(matches!(error.kind(), ErrorKind::UnsupportedRange(_)));
}

#[test]
fn test_decode_empty() {
    let data: [u8; 0] = [];
    let mut cursor = OctetCursor::new(&data);
    let error = decode_length_determinant(&mut cursor, Some(1)).unwrap_err();
    assert!(error.is_underflow());
    assert!(cursor.is_exhausted());

    let error = decode_length_determinant(&mut cursor, None).unwrap_err();
    assert!(error.is_underflow());
}

#[test]
fn test_decode_single_octet() {
    let data = [0x7F];
    let mut cursor = OctetCursor::new(&data);
    assert_eq!(0x7F, decode_length_determinant(&mut cursor, None).unwrap());
    assert!(cursor.is_exhausted());
}

#[test]
fn test_decode_two_octets() {
    let data = [0x80, 0xFF];
    let mut cursor = OctetCursor::new(&data);
    assert_eq!(0xFF, decode_length_determinant(&mut cursor, None).unwrap());
    assert!(cursor.is_exhausted());
}

#[test]
fn test_decode_truncated_two_octets() {
    let data = [0x80];
    let mut cursor = OctetCursor::new(&data);
    let error = decode_length_determinant(&mut cursor, None).unwrap_err();
    assert!(error.is_underflow());
    assert_eq!(0, cursor.position());
}

#[test]
fn test_decode_constrained() {
    let data = [0x02, 0xBC, 0x05];
    let mut cursor = OctetCursor::new(&data);
    assert_eq!(700, decode_length_determinant(&mut cursor, Some(1000)).unwrap());
    assert_eq!(5, decode_length_determinant(&mut cursor, Some(7)).unwrap());
    assert_eq!(0, decode_length_determinant(&mut cursor, Some(0)).unwrap());
    assert!(cursor.is_exhausted());
}

#[test]
fn test_decode_constrained_value_beyond_bound() {
    let data = [0x09];
    let mut cursor = OctetCursor::new(&data);
    assert_range_error(decode_length_determinant(&mut cursor, Some(7)));
    assert_eq!(0, cursor.position());
}

#[test]
fn test_decode_consecutive_determinants() {
    let data = [0x05, 0x81, 0x00, 0x7F];
    let mut cursor = OctetCursor::new(&data);
    assert_eq!(5, decode_length_determinant(&mut cursor, None).unwrap());
    assert_eq!(256, decode_length_determinant(&mut cursor, None).unwrap());
    assert_eq!(127, decode_length_determinant(&mut cursor, None).unwrap());
    assert!(cursor.is_exhausted());
}

#[test]
fn test_round_trip_unconstrained() {
    for length in 0..16384_u64 {
        let encoded = encode_length_determinant(length, None).unwrap();
        let mut cursor = OctetCursor::new(encoded.bytes());
        assert_eq!(length, decode_length_determinant(&mut cursor, None).unwrap());
        assert!(cursor.is_exhausted(), "Not consumed for length {}", length);
    }
}

#[test]
fn test_round_trip_constrained() {
    for upper_bound in &[1_u64, 7, 255, 256, 1000, 65535] {
        for length in &[0, 1, *upper_bound / 2, *upper_bound] {
            let encoded = encode_length_determinant(*length, Some(*upper_bound)).unwrap();
            let mut cursor = OctetCursor::new(encoded.bytes());
            assert_eq!(
                *length,
                decode_length_determinant(&mut cursor, Some(*upper_bound)).unwrap()
            );
            assert!(cursor.is_exhausted());
        }
    }
}
