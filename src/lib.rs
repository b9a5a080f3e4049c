//! Bit-exact building blocks for the ALIGNED variant of the ASN.1 packed encoding rules
//! (ITU-TX.691 | ISO/IEC 8825-2:2015).
//!
//! Values are encoded into [`BitField`](io::buffer::BitField)s of arbitrary bit length, which
//! are then concatenated in schema order and flushed as octets once the accumulated length is
//! octet-aligned:
//!
//! ```
//! use asn1per::prelude::*;
//!
//! let preamble = encode_sequence(true, 1, 0b1).unwrap();
//! let value = encode_integer(1, 0, 7, false).unwrap();
//! let message = preamble.concatenate(&value).pad_to_octet();
//! assert_eq!(&[0x44], message.as_bytes());
//! ```
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(unused_extern_crates)]

#[macro_use]
pub extern crate serde_derive;

pub mod io;
pub mod prelude;
