pub use crate::io::buffer::BitField;
pub use crate::io::per::aligned::*;
pub use crate::io::per::Constraint;
pub use crate::io::per::Error;
pub use crate::io::per::ErrorKind;
pub use crate::io::per::OctetCursor;
