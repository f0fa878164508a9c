//! apidoc: structured documentation for declared types.
//!
//! Raw doc comments (as delivered by a language-specific extractor) are parsed
//! into [`model::Document`]s of paragraphs, headings, lists, code blocks and
//! directives, collected into a [`registry::Registry`], and rendered as JSON
//! or a static HTML viewer.
//!
//! ```
//! use apidoc::model::Element;
//!
//! let doc = apidoc::parser::parse("Paragraph one.\n\n* item 1\n* item 2");
//! assert_eq!(doc.elements[0], Element::Paragraph("Paragraph one.".into()));
//! assert_eq!(doc.elements[1], Element::List(vec!["item 1".into(), "item 2".into()]));
//! ```

pub mod logger;
pub mod model;
pub mod parser;
pub mod registry;
pub mod render;
