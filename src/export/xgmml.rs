use std::io::Write;

use crate::job::GraphExport;
use crate::ReduceResult;

/// Lets `graph` write its document and flushes the sink
pub(crate) fn write<W: Write>(writer: &mut W, graph: &dyn GraphExport) -> ReduceResult<()> {
    graph.write_xgmml(&mut *writer)?;
    writer.flush()?;
    Ok(())
}
