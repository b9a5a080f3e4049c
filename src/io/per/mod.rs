//! This module contains the building blocks to encode basic ASN.1 types with the ALIGNED variant
//! of the packed encoding rules. Every encoder returns a [`BitField`](crate::io::buffer::BitField)
//! (or the raw octets of a whole number) that the caller stitches together in the order the
//! schema demands. Decoding is limited to the length determinant, which reads through an
//! [`OctetCursor`] the caller owns.

pub mod aligned;
pub mod constraint;
pub mod cursor;
pub mod err;

pub use constraint::Constraint;
pub use cursor::OctetCursor;
pub use err::Error;
pub use err::ErrorKind;

pub use crate::io::buffer::BYTE_LEN;
