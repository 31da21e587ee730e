use std::io::Write;

use tracing::trace;

use crate::format::{Float, Quoted, NULL};
use crate::ReduceResult;

use super::Row;

fn write_warning<W: Write>(writer: &mut W, treemap_cutoff: f64) -> ReduceResult<()> {
    writeln!(
        writer,
        "# WARNING - This exported Revigo data is only useful for the specific purpose of constructing a TreeMap visualization."
    )?;
    writeln!(
        writer,
        "# Do not use this table as a general list of non-redundant GO categories, as it sets an extremely permissive "
    )?;
    writeln!(
        writer,
        "# threshold to detect redundancies (c={treemap_cutoff:.2}) and fill the 'representative' column, while normally c>=0.4 is recommended."
    )?;
    writeln!(
        writer,
        "# To export a reduced-redundancy set of GO terms, go to the Scatterplot or Table tab, and export from there."
    )?;
    Ok(())
}

/// Writes the warning, the header and all rows that are not eliminated at `cutoff`
///
/// Rows without representative are never eliminated. The representative is
/// written as its quoted name.
pub(crate) fn write<W: Write>(
    writer: &mut W,
    rows: &[Row],
    user_values: usize,
    treemap_cutoff: f64,
    cutoff: f64,
) -> ReduceResult<()> {
    write_warning(writer, treemap_cutoff)?;

    write!(writer, "TermID\tName\tFrequency\tValue\t")?;
    for idx in 0..user_values {
        write!(writer, "UserValue_{idx}\t")?;
    }
    writeln!(writer, "Uniqueness\tDispensability\tRepresentative")?;

    for row in rows {
        let term = row.term;
        if row.representative.is_some() && term.is_eliminated(cutoff) {
            trace!("{} is eliminated at {}", term.id(), cutoff);
            continue;
        }
        let props = term.properties();
        write!(
            writer,
            "{}\t{}\t{}\t{}\t",
            Quoted(&term.id().to_string()),
            Quoted(term.name()),
            Float(props.frequency_percent()),
            Float(props.value())
        )?;
        for value in props.user_values().iter().take(user_values) {
            write!(writer, "{}\t", Float(*value))?;
        }
        write!(
            writer,
            "{}\t{}\t",
            Float(props.uniqueness()),
            Float(props.dispensability())
        )?;
        match row.representative {
            Some((_, name)) => writeln!(writer, "{}", Quoted(name))?,
            None => writeln!(writer, "{NULL}")?,
        }
    }
    Ok(())
}
