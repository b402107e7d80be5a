//! Text rendering of search results for agents and terminals.

use std::fmt::Write;

use crate::client::{SearchHit, SearchResult};

/// Rendered when the service returns no hits.
pub const NO_RESULTS_MESSAGE: &str = "No results found in your knowledge vault.";

/// Render hits as a numbered list, preserving service order.
///
/// `Source:` and `Metadata:` lines appear only for hits that carry them.
pub fn format_results(result: &SearchResult) -> String {
    if result.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let noun = if result.len() == 1 { "result" } else { "results" };
    let mut out = format!(
        "Found {} relevant {} in your knowledge vault:\n",
        result.len(),
        noun
    );

    for (i, hit) in result.hits.iter().enumerate() {
        out.push('\n');
        write_hit(&mut out, i + 1, hit);
    }

    out.truncate(out.trim_end().len());
    out
}

fn write_hit(out: &mut String, rank: usize, hit: &SearchHit) {
    // writing to a String cannot fail
    let content = hit.content.trim_end();
    if content.is_empty() {
        let _ = writeln!(out, "{}.", rank);
    } else {
        let _ = writeln!(out, "{}. {}", rank, content);
    }
    if let Some(source) = &hit.source {
        let _ = writeln!(out, "Source: {}", source);
    }
    if let Some(metadata) = &hit.metadata {
        let _ = writeln!(out, "Metadata: {}", metadata);
    }
}
