//! Canonical parameter container.
//!
//! A [`Params`] is an ordered list of name/value string pairs. Insertion order
//! carries no meaning: every rendering sorts by name first (byte-wise, stable),
//! so two sets holding the same pairs always render identically.
//!
//! Two renderings exist:
//!
//! - the query form `a=1&b=2`, values taken literally, used only as signing
//!   input and for the QR-code link;
//! - the XML form `<xml><a>1</a><b>2</b></xml>`, the gateway wire format.

use std::fmt;

use quick_xml::escape::partial_escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::errors::CodecError;

/// Name of the root element of every gateway document.
pub const XML_ROOT: &str = "xml";

/// Name of the parameter carrying the signature.
pub const SIGN_FIELD: &str = "sign";

/// A single name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    pub value: String,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered collection of parameters.
///
/// Duplicate names are kept as inserted; callers must not push the same name
/// twice if they expect a single value on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<Param>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push(Param::new(name, value));
    }

    /// Builder-style [`Params::push`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Value of the first parameter with the given name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.entries.iter()
    }

    /// Returns a copy sorted by name, byte-wise ascending.
    ///
    /// The sort is stable, so parameters sharing a name keep their insertion
    /// order relative to each other.
    pub fn sorted(&self) -> Params {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        Params { entries }
    }

    /// Returns a copy without any parameter of the given name.
    pub fn without(&self, name: &str) -> Params {
        self.entries
            .iter()
            .filter(|p| p.name != name)
            .cloned()
            .collect()
    }

    /// Renders the sorted set as `name1=value1&name2=value2`.
    ///
    /// Values are not percent-encoded. Empty values render as `name=`.
    pub fn to_query_string(&self) -> String {
        self.sorted()
            .iter()
            .map(|p| format!("{}={}", p.name, p.value))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Renders the sorted set as a flat `<xml>` document.
    ///
    /// Values are escaped; names are written as-is and must be plain element
    /// names (ASCII letter or `_`, then letters, digits, `_`, `-` or `.`).
    pub fn to_xml_string(&self) -> String {
        let mut out = String::with_capacity(16 + self.entries.len() * 32);
        out.push('<');
        out.push_str(XML_ROOT);
        out.push('>');
        for p in self.sorted().iter() {
            debug_assert!(
                is_element_name(&p.name),
                "parameter name {:?} is not a valid element name",
                p.name
            );
            out.push('<');
            out.push_str(&p.name);
            out.push('>');
            out.push_str(&partial_escape(p.value.as_str()));
            out.push_str("</");
            out.push_str(&p.name);
            out.push('>');
        }
        out.push_str("</");
        out.push_str(XML_ROOT);
        out.push('>');
        out
    }

    /// Parses a flat `<xml>` document back into a parameter set.
    ///
    /// Children keep document order. Text and CDATA content are unescaped and
    /// concatenated; whitespace between elements is ignored. A root other than
    /// `<xml>` or a nested child element is rejected.
    pub fn from_xml(data: &[u8]) -> Result<Params, CodecError> {
        let text = std::str::from_utf8(data)
            .map_err(|e| CodecError::malformed(format!("invalid UTF-8: {}", e)))?;

        let mut reader = Reader::from_str(text);
        let mut params = Params::new();
        let mut state = ParseState::BeforeRoot;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| CodecError::malformed(e.to_string()))?;

            match event {
                Event::Start(e) => {
                    let name = element_name(e.name().as_ref())?;
                    state = match state {
                        ParseState::BeforeRoot => {
                            expect_root(&name)?;
                            ParseState::InRoot
                        }
                        ParseState::InRoot => ParseState::InField {
                            name,
                            value: String::new(),
                        },
                        ParseState::InField { name: parent, .. } => {
                            return Err(nested_element(&name, &parent));
                        }
                        ParseState::AfterRoot => {
                            return Err(CodecError::unexpected_structure(
                                "more than one root element",
                            ));
                        }
                    };
                }
                Event::Empty(e) => {
                    let name = element_name(e.name().as_ref())?;
                    state = match state {
                        ParseState::BeforeRoot => {
                            expect_root(&name)?;
                            ParseState::AfterRoot
                        }
                        ParseState::InRoot => {
                            params.push(name, String::new());
                            ParseState::InRoot
                        }
                        ParseState::InField { name: parent, .. } => {
                            return Err(nested_element(&name, &parent));
                        }
                        ParseState::AfterRoot => {
                            return Err(CodecError::unexpected_structure(
                                "more than one root element",
                            ));
                        }
                    };
                }
                Event::Text(t) => match &mut state {
                    ParseState::InField { value, .. } => {
                        let unescaped = t
                            .unescape()
                            .map_err(|e| CodecError::malformed(e.to_string()))?;
                        value.push_str(&unescaped);
                    }
                    _ => {
                        if !t.iter().all(u8::is_ascii_whitespace) {
                            return Err(CodecError::unexpected_structure(
                                "text outside of a field element",
                            ));
                        }
                    }
                },
                Event::CData(c) => match &mut state {
                    ParseState::InField { value, .. } => {
                        let raw = c.into_inner();
                        let content = std::str::from_utf8(&raw).map_err(|e| {
                            CodecError::malformed(format!("invalid UTF-8: {}", e))
                        })?;
                        value.push_str(content);
                    }
                    _ => {
                        return Err(CodecError::unexpected_structure(
                            "CDATA outside of a field element",
                        ));
                    }
                },
                Event::End(_) => {
                    state = match state {
                        ParseState::InRoot => ParseState::AfterRoot,
                        ParseState::InField { name, value } => {
                            params.push(name, value);
                            ParseState::InRoot
                        }
                        other => other,
                    };
                }
                Event::Eof => {
                    if matches!(state, ParseState::AfterRoot) {
                        break;
                    }
                    return Err(CodecError::malformed("unexpected end of document"));
                }
                // Declarations, comments, processing instructions.
                _ => {}
            }
        }

        Ok(params)
    }
}

enum ParseState {
    BeforeRoot,
    InRoot,
    InField { name: String, value: String },
    AfterRoot,
}

fn expect_root(name: &str) -> Result<(), CodecError> {
    if name == XML_ROOT {
        return Ok(());
    }
    Err(CodecError::unexpected_structure(format!(
        "root element is <{}>, expected <{}>",
        name, XML_ROOT
    )))
}

fn nested_element(name: &str, parent: &str) -> CodecError {
    CodecError::unexpected_structure(format!("nested element <{}> inside <{}>", name, parent))
}

fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn element_name(raw: &[u8]) -> Result<String, CodecError> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| CodecError::malformed(format!("invalid element name: {}", e)))
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params {
            entries: iter
                .into_iter()
                .map(|(name, value)| Param::new(name, value))
                .collect(),
        }
    }
}

impl FromIterator<Param> for Params {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Params {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Params {
    type Item = Param;
    type IntoIter = std::vec::IntoIter<Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Extend<Param> for Params {
    fn extend<I: IntoIterator<Item = Param>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
