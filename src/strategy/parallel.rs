//! Parallel batch parsing
//!
//! Uses Rayon to parse many independent documents at once. Each document
//! gets its own parse state; only the config and the element registry are
//! shared.

use crate::config::ParseConfig;
use crate::error::Result;
use crate::parser::MarkupParser;
use crate::sax::{EventCollector, MarkupEvent};
use rayon::prelude::*;

/// Parse every document, returning one event list (or error) per input in
/// input order
pub fn parse_all<D>(documents: &[D], config: &ParseConfig) -> Vec<Result<Vec<MarkupEvent>>>
where
    D: AsRef<[u8]> + Sync,
{
    let parser = MarkupParser::new(config.clone());
    documents
        .par_iter()
        .map(|document| collect(&parser, document.as_ref()))
        .collect()
}

/// Parse every document and map its events, failing on the first error
pub fn map_all<D, F, T>(documents: &[D], config: &ParseConfig, mapper: F) -> Result<Vec<T>>
where
    D: AsRef<[u8]> + Sync,
    F: Fn(Vec<MarkupEvent>) -> T + Sync + Send,
    T: Send,
{
    let parser = MarkupParser::new(config.clone());
    documents
        .par_iter()
        .map(|document| collect(&parser, document.as_ref()).map(&mapper))
        .collect()
}

fn collect(parser: &MarkupParser, document: &[u8]) -> Result<Vec<MarkupEvent>> {
    let mut collector = EventCollector::new();
    parser.parse(document, &mut collector)?;
    Ok(collector.into_events())
}
