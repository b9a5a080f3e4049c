use backtrace::Backtrace;
use std::fmt::{Debug, Display, Formatter};

pub struct Error(pub(crate) Box<Inner>);

impl Error {
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.0.kind
    }

    /// Whether this is a range failure: a value, size, index or constraint outside of what the
    /// declared constraint or this codec allows. Unsupported ranges count as range failures.
    pub fn is_range_error(&self) -> bool {
        !self.is_underflow()
    }

    pub fn is_underflow(&self) -> bool {
        matches!(self.0.kind, ErrorKind::Underflow { .. })
    }

    #[cold]
    #[inline(never)]
    pub fn value_not_in_range(value: i64, min: i64, max: i64) -> Self {
        Self::from(ErrorKind::ValueNotInRange { value, min, max })
    }

    #[cold]
    #[inline(never)]
    pub fn size_not_in_range(size: u64, min: u64, max: Option<u64>) -> Self {
        Self::from(ErrorKind::SizeNotInRange { size, min, max })
    }

    #[cold]
    #[inline(never)]
    pub fn invalid_constraint(min: i64, max: i64) -> Self {
        Self::from(ErrorKind::InvalidConstraint { min, max })
    }

    #[cold]
    #[inline(never)]
    pub fn insufficient_bits(expected: usize, available: usize) -> Self {
        Self::from(ErrorKind::InsufficientBits {
            expected,
            available,
        })
    }

    #[cold]
    #[inline(never)]
    pub fn invalid_presence_bitmap(bitmap: u64, optional_count: usize) -> Self {
        Self::from(ErrorKind::InvalidPresenceBitmap {
            bitmap,
            optional_count,
        })
    }

    #[cold]
    #[inline(never)]
    pub fn unsupported_range(reason: impl Into<String>) -> Self {
        Self::from(ErrorKind::UnsupportedRange(reason.into()))
    }

    #[cold]
    #[inline(never)]
    pub fn underflow(needed: usize, available: usize) -> Self {
        Self::from(ErrorKind::Underflow { needed, available })
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Error(Box::new(Inner::from(kind)))
    }
}

impl Debug for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.0.kind)?;
        let mut backtrace = self.0.backtrace.clone();
        backtrace.resolve();
        writeln!(f, "{backtrace:?}")
    }
}

impl std::error::Error for Error {
    fn description(&self) -> &str {
        "encoding or decoding aligned PER failed"
    }
}

#[derive(Debug)]
pub(crate) struct Inner {
    pub(crate) kind: ErrorKind,
    pub(crate) backtrace: Backtrace,
}

impl From<ErrorKind> for Inner {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            backtrace: Backtrace::new_unresolved(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    ValueNotInRange {
        value: i64,
        min: i64,
        max: i64,
    },
    SizeNotInRange {
        size: u64,
        min: u64,
        max: Option<u64>,
    },
    InvalidConstraint {
        min: i64,
        max: i64,
    },
    InsufficientBits {
        expected: usize,
        available: usize,
    },
    InvalidPresenceBitmap {
        bitmap: u64,
        optional_count: usize,
    },
    UnsupportedRange(String),
    Underflow {
        needed: usize,
        available: usize,
    },
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ValueNotInRange { value, min, max } => write!(
                f,
                "The value {value} is not within the inclusive range of {min} and {max}"
            ),
            ErrorKind::SizeNotInRange {
                size,
                min,
                max: Some(max),
            } => write!(
                f,
                "The size {size} is not within the inclusive range of {min} and {max}"
            ),
            ErrorKind::SizeNotInRange {
                size,
                min,
                max: None,
            } => write!(f, "The size {size} is below the lower bound of {min}"),
            ErrorKind::InvalidConstraint { min, max } => write!(
                f,
                "The lower bound {min} is greater than the upper bound {max}"
            ),
            ErrorKind::InsufficientBits {
                expected,
                available,
            } => write!(
                f,
                "Expected at least {expected} bits in the source buffer but only {available} are available"
            ),
            ErrorKind::InvalidPresenceBitmap {
                bitmap,
                optional_count,
            } => write!(
                f,
                "The presence bitmap {bitmap:#x} has flags beyond the {optional_count} optional fields"
            ),
            ErrorKind::UnsupportedRange(reason) => {
                write!(f, "The range is not supported: {reason}")
            }
            ErrorKind::Underflow { needed, available } => write!(
                f,
                "Need {needed} more octets but only {available} remain in the source"
            ),
        }
    }
}
