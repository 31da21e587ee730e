use std::io::Write;

use crate::format::{Float, Quoted, NULL};
use crate::ReduceResult;

use super::Row;

/// Writes the header of the Table export
fn write_header<W: Write>(writer: &mut W, user_values: usize) -> ReduceResult<()> {
    write!(writer, "TermID\tName\tValue\t")?;
    for idx in 0..user_values {
        write!(writer, "UserValue_{idx}\t")?;
    }
    writeln!(
        writer,
        "LogSize\tFrequency\tUniqueness\tDispensability\tRepresentative"
    )?;
    Ok(())
}

/// Writes one row per term, in the order of `rows`
///
/// The representative is written as bare numeric ID, e.g. `8150`
pub(crate) fn write<W: Write>(writer: &mut W, rows: &[Row], user_values: usize) -> ReduceResult<()> {
    write_header(writer, user_values)?;
    for row in rows {
        let term = row.term;
        let props = term.properties();
        write!(
            writer,
            "{}\t{}\t{}\t",
            Quoted(&term.id().to_string()),
            Quoted(term.name()),
            Float(props.value())
        )?;
        for value in props.user_values().iter().take(user_values) {
            write!(writer, "{}\t", Float(*value))?;
        }
        write!(
            writer,
            "{}\t{}\t{}\t{}\t",
            Float(props.log_size()),
            Float(props.frequency_percent()),
            Float(props.uniqueness()),
            Float(props.dispensability())
        )?;
        match row.representative {
            Some((id, _)) => writeln!(writer, "{}", id.as_u32())?,
            None => writeln!(writer, "{NULL}")?,
        }
    }
    Ok(())
}
