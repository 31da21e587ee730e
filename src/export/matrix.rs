use std::io::Write;

use crate::format::Float;
use crate::matrix::SimilarityMatrix;
use crate::term::TermList;
use crate::ReduceResult;

/// Writes the matrix with a header row and a header column of term IDs
///
/// `terms` and `matrix` must have the same order, the caller ensures
/// that the dimensions match.
pub(crate) fn write<W: Write>(writer: &mut W, terms: &TermList, matrix: &SimilarityMatrix) -> ReduceResult<()> {
    for term in terms {
        write!(writer, "\t{}", term.id())?;
    }
    writeln!(writer)?;

    for (term, scores) in terms.iter().zip(matrix.rows()) {
        write!(writer, "{}", term.id())?;
        for score in scores {
            write!(writer, "\t{}", Float(*score))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
