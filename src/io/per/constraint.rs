use crate::io::buffer::BitField;
use crate::io::per::aligned;
use crate::io::per::aligned::WholeNumber;
use crate::io::per::Error;
use std::convert::TryFrom;

/// The `(min, max, extensible)` triple a schema attaches to an INTEGER, ENUMERATED or CHOICE.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawConstraint")]
pub struct Constraint {
    min: i64,
    max: i64,
    extensible: bool,
}

#[derive(Deserialize)]
struct RawConstraint {
    min: i64,
    max: i64,
    #[serde(default)]
    extensible: bool,
}

impl TryFrom<RawConstraint> for Constraint {
    type Error = Error;

    fn try_from(raw: RawConstraint) -> Result<Self, Self::Error> {
        if raw.extensible {
            Constraint::extensible(raw.min, raw.max)
        } else {
            Constraint::new(raw.min, raw.max)
        }
    }
}

impl Constraint {
    pub fn new(min: i64, max: i64) -> Result<Self, Error> {
        if min > max {
            Err(Error::invalid_constraint(min, max))
        } else {
            Ok(Constraint {
                min,
                max,
                extensible: false,
            })
        }
    }

    pub fn extensible(min: i64, max: i64) -> Result<Self, Error> {
        Self::new(min, max).map(|c| Constraint {
            extensible: true,
            ..c
        })
    }

    #[inline]
    pub fn min(&self) -> i64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> i64 {
        self.max
    }

    #[inline]
    pub fn is_extensible(&self) -> bool {
        self.extensible
    }

    /// Count of values within the root, `max - min + 1`
    #[inline]
    pub fn range(&self) -> u128 {
        (i128::from(self.max) - i128::from(self.min) + 1) as u128
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn encode_whole_number(&self, value: i64) -> Result<WholeNumber, Error> {
        aligned::encode_constrained_whole_number(value, self.min, self.max)
    }

    pub fn encode_integer(&self, value: i64) -> Result<BitField, Error> {
        aligned::encode_integer(value, self.min, self.max, self.extensible)
    }

    pub fn encode_enumerated(&self, index: u64) -> Result<BitField, Error> {
        let (min, max) = self.index_bounds()?;
        aligned::encode_enumerated(index, min, max, self.extensible)
    }

    pub fn encode_choice(&self, index: u64) -> Result<BitField, Error> {
        let (min, max) = self.index_bounds()?;
        aligned::encode_choice(index, min, max, self.extensible)
    }

    fn index_bounds(&self) -> Result<(u64, u64), Error> {
        match (u64::try_from(self.min), u64::try_from(self.max)) {
            (Ok(min), Ok(max)) => Ok((min, max)),
            _ => Err(Error::invalid_constraint(self.min, self.max)),
        }
    }
}
