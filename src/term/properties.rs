use smallvec::SmallVec;

use crate::term::GoTermId;
use crate::{ReduceError, ReduceResult};

/// Coordinates of a term in the 2-D projection (`PC_0`, `PC_1`)
///
/// Terms that could not be placed have less than 2 (or no) components.
pub type Coordinates = SmallVec<[f64; 2]>;

/// The numeric properties of a term, as calculated by the job engine
///
/// `TermProperties` is built with chained setters and validated once
/// it is attached to a [`Term`](`crate::Term`).
///
/// # Examples
///
/// ```
/// use revigo_export::{GoTermId, TermProperties};
///
/// let props = TermProperties::default()
///     .with_value(-5.2)
///     .with_log_size(4.31)
///     .with_frequency(0.25)
///     .with_uniqueness(0.92)
///     .with_dispensability(0.0)
///     .with_coordinates(&[1.5, -3.2]);
///
/// assert_eq!(props.frequency_percent(), 25.0);
/// assert!(props.representative().is_none());
/// assert_eq!(props.pc(1), Some(-3.2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermProperties {
    value: f64,
    log_size: f64,
    frequency: f64,
    uniqueness: f64,
    dispensability: f64,
    pc: Coordinates,
    representative: Option<GoTermId>,
    user_values: Vec<f64>,
}

impl TermProperties {
    /// Sets the value (e.g. the p-value) supplied by the user
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Sets the log10 of the annotation size
    #[must_use]
    pub fn with_log_size(mut self, log_size: f64) -> Self {
        self.log_size = log_size;
        self
    }

    /// Sets the annotation frequency as a fraction (`0..=1`)
    #[must_use]
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the uniqueness (`0..=1`)
    #[must_use]
    pub fn with_uniqueness(mut self, uniqueness: f64) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    /// Sets the dispensability (`0..=1`)
    #[must_use]
    pub fn with_dispensability(mut self, dispensability: f64) -> Self {
        self.dispensability = dispensability;
        self
    }

    /// Sets the coordinates of the 2-D projection
    #[must_use]
    pub fn with_coordinates(mut self, pc: &[f64]) -> Self {
        self.pc = Coordinates::from_slice(pc);
        self
    }

    /// Sets the representative term
    #[must_use]
    pub fn with_representative<I: Into<GoTermId>>(mut self, representative: I) -> Self {
        self.representative = Some(representative.into());
        self
    }

    /// Sets the additional values supplied by the user
    #[must_use]
    pub fn with_user_values(mut self, user_values: Vec<f64>) -> Self {
        self.user_values = user_values;
        self
    }

    /// The value supplied by the user, e.g. a p-value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// log10 of the number of annotations of the term
    pub fn log_size(&self) -> f64 {
        self.log_size
    }

    /// The annotation frequency as a fraction of the whole corpus
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// The annotation frequency in percent
    pub fn frequency_percent(&self) -> f64 {
        self.frequency * 100.0
    }

    /// Uniqueness of the term
    pub fn uniqueness(&self) -> f64 {
        self.uniqueness
    }

    /// Dispensability of the term, higher is more redundant
    pub fn dispensability(&self) -> f64 {
        self.dispensability
    }

    /// Returns the `idx`th component of the 2-D projection, if present
    pub fn pc(&self, idx: usize) -> Option<f64> {
        self.pc.get(idx).copied()
    }

    /// All components of the 2-D projection
    pub fn coordinates(&self) -> &[f64] {
        &self.pc
    }

    /// The term representing the cluster of this term
    ///
    /// `None` if the term is itself a representative
    pub fn representative(&self) -> Option<GoTermId> {
        self.representative
    }

    /// The additional values supplied by the user
    pub fn user_values(&self) -> &[f64] {
        &self.user_values
    }

    /// Checks the value ranges of all properties of the term `id`
    ///
    /// # Errors
    ///
    /// - Frequency, uniqueness or dispensability outside of `0..=1`:
    ///   [`ReduceError::InvalidProperty`]
    /// - More than 2 projection components or a term representing itself:
    ///   [`ReduceError::InvalidInput`]
    pub(crate) fn validate(&self, id: GoTermId) -> ReduceResult<()> {
        for (field, value) in [
            ("frequency", self.frequency),
            ("uniqueness", self.uniqueness),
            ("dispensability", self.dispensability),
        ] {
            // NaN fails the range check as well
            if !(0.0..=1.0).contains(&value) {
                return Err(ReduceError::InvalidProperty { id, field, value });
            }
        }

        if self.pc.len() > 2 {
            return Err(ReduceError::InvalidInput(format!(
                "{id} has {} projection components, at most 2 are allowed",
                self.pc.len()
            )));
        }

        match self.representative {
            Some(rep) if rep == id => Err(ReduceError::InvalidInput(format!(
                "{id} cannot be its own representative"
            ))),
            _ => Ok(()),
        }
    }
}
