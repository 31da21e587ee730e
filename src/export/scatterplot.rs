use std::io::Write;

use crate::format::{Float, OptionalFloat, Quoted, NULL};
use crate::ReduceResult;

use super::Row;

const HEADER: &str = "TermID\tName\tValue\tLogSize\tFrequency\tUniqueness\tDispensability\tPC_0\tPC_1\tRepresentative";

/// Writes one row per term, including both coordinates
///
/// Missing coordinates are written as `null`.
pub(crate) fn write<W: Write>(writer: &mut W, rows: &[Row]) -> ReduceResult<()> {
    writeln!(writer, "{HEADER}")?;
    for row in rows {
        let term = row.term;
        let props = term.properties();
        write!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t",
            Quoted(&term.id().to_string()),
            Quoted(term.name()),
            Float(props.value()),
            Float(props.log_size()),
            Float(props.frequency_percent()),
            Float(props.uniqueness()),
            Float(props.dispensability()),
            OptionalFloat(props.pc(0)),
            OptionalFloat(props.pc(1))
        )?;
        match row.representative {
            Some((id, _)) => writeln!(writer, "{}", id.as_u32())?,
            None => writeln!(writer, "{NULL}")?,
        }
    }
    Ok(())
}
