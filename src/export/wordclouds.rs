use std::io::Write;

use serde::Serialize;

use crate::format::strip_single_quotes;
use crate::wordcloud::{sizes, Compression, WeightedWord};
use crate::ReduceResult;

use super::ExportOptions;

#[derive(Debug, Serialize)]
struct CloudWord {
    #[serde(rename = "Word")]
    word: String,
    #[serde(rename = "Size")]
    size: u32,
}

#[derive(Debug, Serialize)]
struct WordClouds {
    #[serde(rename = "Enrichments", skip_serializing_if = "Option::is_none")]
    enrichments: Option<Vec<CloudWord>>,
    #[serde(rename = "Correlations", skip_serializing_if = "Option::is_none")]
    correlations: Option<Vec<CloudWord>>,
}

fn cloud(words: Option<&[WeightedWord]>, compression: Compression) -> Option<Vec<CloudWord>> {
    words.map(|words| {
        sizes(words, compression)
            .into_iter()
            .map(|word| CloudWord {
                word: strip_single_quotes(word.word()),
                size: word.size(),
            })
            .collect()
    })
}

/// Writes both word clouds as a single line of JSON
///
/// A cloud that was not calculated is omitted, a cloud without any
/// positive weights is written as empty array.
pub(crate) fn write<W: Write>(
    writer: &mut W,
    enrichments: Option<&[WeightedWord]>,
    correlations: Option<&[WeightedWord]>,
    options: &ExportOptions,
) -> ReduceResult<()> {
    let clouds = WordClouds {
        enrichments: cloud(enrichments, options.enrichment_compression()),
        correlations: cloud(correlations, options.correlation_compression()),
    };
    serde_json::to_writer(&mut *writer, &clouds)?;
    Ok(())
}
