//! RustyMarkup - streaming, event-based HTML and XML tokenizer
//!
//! Reports markup as a sequence of callbacks (element starts and ends,
//! attributes, text, comments, CDATA, DOCTYPE, XML declaration, processing
//! instructions) without building a tree. In HTML mode missing start and
//! end tags are supplied as auto-open / auto-close events following each
//! element's semantics.
//!
//! Entry points:
//! - whole buffer: `MarkupParser::parse`, `parse_slice`, `parse_str`
//! - pull mode: `MarkupParser::parse_reader` (bounded, pooled buffer)
//! - batch: `strategy::parse_all` (Rayon, one parse per document)
//!
//! ```
//! use rustymarkup::{EventCollector, MarkupParser, ParseConfig};
//!
//! let mut events = EventCollector::new();
//! MarkupParser::new(ParseConfig::html())
//!     .parse_str("<ul><li>one<li>two</ul>", &mut events)
//!     .unwrap();
//! let summary: Vec<String> = events.events().iter().filter_map(|e| e.summary()).collect();
//! assert!(summary.contains(&"auto-close li".to_string()));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod handler;
pub mod html;
pub mod parser;
pub mod processor;
pub mod reader;
pub mod sax;
pub mod strategy;

pub use config::{ElementBalancing, ParseConfig, ParsingMode, PrologConfig, PrologPresence, UniqueRootElement};
pub use crate::core::parts::{Attribute, DocType, XmlDeclaration};
pub use crate::core::span::{Position, Span};
pub use error::{ErrorKind, ParseError, Result};
pub use handler::MarkupHandler;
pub use parser::MarkupParser;
pub use sax::{EventCollector, MarkupEvent};
