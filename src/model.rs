//! Data model for parsed documentation, format-agnostic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parsed form of one raw doc comment.
///
/// Serializes as a bare array of elements, in source order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub elements: Vec<Element>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// One typed unit of a Document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RawElement", try_from = "RawElement")]
pub enum Element {
    /// Consecutive lines joined with a single space.
    Paragraph(String),
    /// Text of a `# heading` line with the markers stripped.
    Heading(String),
    /// One entry per item; continuation lines are newline-joined.
    List(Vec<String>),
    /// Dedented lines joined with `\n`, inner blank lines kept.
    CodeBlock(String),
    /// A `+` line, verbatim.
    Directive(String),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Paragraph(_) => ElementKind::Paragraph,
            Element::Heading(_) => ElementKind::Heading,
            Element::List(_) => ElementKind::List,
            Element::CodeBlock(_) => ElementKind::Code,
            Element::Directive(_) => ElementKind::Directive,
        }
    }
}

/// Wire discriminator of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Paragraph,
    Heading,
    List,
    Code,
    Directive,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Paragraph => "paragraph",
            ElementKind::Heading => "heading",
            ElementKind::List => "list",
            ElementKind::Code => "code",
            ElementKind::Directive => "directive",
        };
        f.write_str(name)
    }
}

/// Serialized shape of an Element: `{"kind": ..., "content": [...]}`.
#[derive(Serialize, Deserialize)]
struct RawElement {
    kind: ElementKind,
    content: Vec<String>,
}

impl From<Element> for RawElement {
    fn from(elem: Element) -> Self {
        let kind = elem.kind();
        let content = match elem {
            Element::List(items) => items,
            Element::Paragraph(text)
            | Element::Heading(text)
            | Element::CodeBlock(text)
            | Element::Directive(text) => vec![text],
        };
        RawElement { kind, content }
    }
}

impl TryFrom<RawElement> for Element {
    type Error = String;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let kind = raw.kind;
        if kind == ElementKind::List {
            return Ok(Element::List(raw.content));
        }
        let len = raw.content.len();
        let [text]: [String; 1] = raw.content.try_into().map_err(|_| {
            format!("{} element must have exactly one content entry, got {}", kind, len)
        })?;
        Ok(match kind {
            ElementKind::Paragraph => Element::Paragraph(text),
            ElementKind::Heading => Element::Heading(text),
            ElementKind::Code => Element::CodeBlock(text),
            ElementKind::Directive => Element::Directive(text),
            ElementKind::List => unreachable!("handled above"),
        })
    }
}

/// A documented struct or enum-like type, as delivered by the extractor.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeInfo {
    pub package: String,
    pub type_name: String,
    pub fields: Vec<FieldInfo>,
    pub enum_values: Vec<EnumInfo>,
    /// Top-level entry point for the viewer (a resource or an RPC message).
    pub is_root: bool,
    pub doc_string: String,
    #[serde(skip_deserializing)]
    pub parsed_doc_string: Document,
}

impl TypeInfo {
    /// `package.TypeName`, or just the type name for package-less types.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}.{}", self.package, self.type_name)
        }
    }
}

/// A struct field.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldInfo {
    pub field_name: String,
    /// Qualified name of the field's base type, or a builtin name.
    pub type_name: String,
    pub package: String,
    /// Wrappers around the base type, outermost first: `Ptr`, `List`, `Map[K]`.
    pub type_decorators: Vec<String>,
    pub doc_string: String,
    #[serde(skip_deserializing)]
    pub parsed_doc_string: Document,
}

/// A named value of an enum-like type.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumInfo {
    pub name: String,
    pub doc_string: String,
    #[serde(skip_deserializing)]
    pub parsed_doc_string: Document,
}
