//! Terms of the Gene Ontology together with their reduction properties
//!
//! A [`Term`] is produced by the job engine and never modified afterwards.
//! All terms of one namespace are grouped into a [`TermList`].

use std::fmt::Display;

use crate::{ReduceError, ReduceResult};

mod list;
mod properties;
mod termid;

pub use list::{Iter, TermList};
pub use properties::{Coordinates, TermProperties};
pub use termid::GoTermId;

/// The three sub-ontologies of the Gene Ontology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// `biological_process`
    BiologicalProcess,
    /// `cellular_component`
    CellularComponent,
    /// `molecular_function`
    MolecularFunction,
}

impl Namespace {
    /// All namespaces, in the order they are exported
    pub const ALL: [Namespace; 3] = [
        Namespace::BiologicalProcess,
        Namespace::CellularComponent,
        Namespace::MolecularFunction,
    ];

    /// The two-letter abbreviation, e.g. `BP`
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Namespace::BiologicalProcess => "BP",
            Namespace::CellularComponent => "CC",
            Namespace::MolecularFunction => "MF",
        }
    }

    /// The name used in OBO files, e.g. `biological_process`
    pub fn obo_name(&self) -> &'static str {
        match self {
            Namespace::BiologicalProcess => "biological_process",
            Namespace::CellularComponent => "cellular_component",
            Namespace::MolecularFunction => "molecular_function",
        }
    }
}

impl TryFrom<&str> for Namespace {
    type Error = ReduceError;
    fn try_from(value: &str) -> ReduceResult<Self> {
        match value {
            "BP" | "biological_process" => Ok(Namespace::BiologicalProcess),
            "CC" | "cellular_component" => Ok(Namespace::CellularComponent),
            "MF" | "molecular_function" => Ok(Namespace::MolecularFunction),
            _ => Err(ReduceError::InvalidInput(format!("unknown namespace {value}"))),
        }
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.obo_name())
    }
}

/// A single GO term of a job result
///
/// # Examples
///
/// ```
/// use revigo_export::{Term, TermProperties};
///
/// let term = Term::try_new(
///     "GO:0008150",
///     "biological_process",
///     TermProperties::default().with_value(-3.5).with_uniqueness(0.98),
/// ).unwrap();
///
/// assert_eq!(term.id().to_string(), "GO:0008150");
/// assert_eq!(term.name(), "biological_process");
/// assert!(!term.is_eliminated(0.7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    id: GoTermId,
    name: String,
    properties: TermProperties,
}

impl Term {
    /// Constructs a new `Term` and validates its properties
    ///
    /// # Errors
    ///
    /// - `id` is not a valid GO term ID: [`ReduceError::ParseIntError`]
    /// - invalid properties, see [`TermProperties`]
    pub fn try_new<I>(id: I, name: &str, properties: TermProperties) -> ReduceResult<Self>
    where
        I: TryInto<GoTermId>,
        ReduceError: From<I::Error>,
    {
        let id = id.try_into()?;
        properties.validate(id)?;
        Ok(Self {
            id,
            name: name.to_string(),
            properties,
        })
    }

    /// The ID of the term
    pub fn id(&self) -> GoTermId {
        self.id
    }

    /// The name of the term, e.g. `cell cycle`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The numeric properties of the term
    pub fn properties(&self) -> &TermProperties {
        &self.properties
    }

    /// The representative of the term, `None` if the term is a representative itself
    pub fn representative(&self) -> Option<GoTermId> {
        self.properties.representative()
    }

    /// Dispensability of the term
    pub fn dispensability(&self) -> f64 {
        self.properties.dispensability()
    }

    /// Returns `true` if the term is too redundant to be kept at `cutoff`
    ///
    /// This only looks at the dispensability. A term without a representative
    /// can still report `true` here if its dispensability exceeds `cutoff`.
    pub fn is_eliminated(&self, cutoff: f64) -> bool {
        self.properties.dispensability() > cutoff
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn namespace_names() {
        assert_eq!(Namespace::BiologicalProcess.abbreviation(), "BP");
        assert_eq!(Namespace::CellularComponent.to_string(), "cellular_component");
        assert_eq!(Namespace::try_from("MF").unwrap(), Namespace::MolecularFunction);
        assert_eq!(
            Namespace::try_from("molecular_function").unwrap(),
            Namespace::MolecularFunction
        );
        assert!(Namespace::try_from("XX").is_err());
    }

    #[test]
    fn term_from_u32() {
        let term = Term::try_new(5737u32, "cytoplasm", TermProperties::default()).unwrap();
        assert_eq!(term.id(), GoTermId::from(5737u32));
    }

    #[test]
    fn invalid_id() {
        assert!(Term::try_new("cytoplasm", "cytoplasm", TermProperties::default()).is_err());
    }

    #[test]
    fn elimination() {
        let term = Term::try_new(
            "GO:0008150",
            "biological_process",
            TermProperties::default()
                .with_dispensability(0.85)
                .with_representative(9987u32),
        )
        .unwrap();
        assert!(term.is_eliminated(0.7));
        assert!(!term.is_eliminated(0.85));
        assert!(!term.is_eliminated(0.9));
    }
}
