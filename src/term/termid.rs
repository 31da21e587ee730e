use core::fmt::Debug;
use std::fmt::Display;

use crate::{ReduceError, ReduceResult};

/// The unique identifier of a Gene Ontology term
///
/// Only the numeric part is stored, the `GO:` prefix and the zero-padding
/// are added when the ID is displayed.
///
/// # Examples
///
/// ```
/// use revigo_export::GoTermId;
///
/// let id = GoTermId::try_from("GO:0008150").unwrap();
/// assert_eq!(id.as_u32(), 8150);
/// assert_eq!(id.to_string(), "GO:0008150");
///
/// let same: GoTermId = 8150u32.into();
/// assert_eq!(id, same);
/// ```
#[derive(Copy, Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GoTermId {
    inner: u32,
}

impl GoTermId {
    /// Returns the numeric part of the ID, e.g. `8150` for `GO:0008150`
    pub fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for GoTermId {
    type Error = ReduceError;
    /// Parses `GO:0008150`, `go:0008150` or the bare number `8150`
    fn try_from(s: &str) -> ReduceResult<Self> {
        let s = s.trim();
        let digits = match s.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("GO:") => &s[3..],
            _ => s,
        };
        Ok(GoTermId {
            inner: digits.parse::<u32>()?,
        })
    }
}

impl From<u32> for GoTermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl Debug for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoTermId({self})")
    }
}

impl Display for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GO:{:07}", self.inner)
    }
}

impl PartialEq<str> for GoTermId {
    fn eq(&self, other: &str) -> bool {
        GoTermId::try_from(other).map_or(false, |other| *self == other)
    }
}
