//! Owned element tree for a manifest, built with quick-xml's namespace-aware reader.
//!
//! Whitespace-only text is dropped and CDATA sections become plain text.
//! Comments, processing instructions and the XML declaration are skipped.
//! Text is decoded with the encoding the declaration names. Attributes are
//! checked for well-formedness but not kept.

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use crate::error::RunError;

#[derive(Debug)]
pub(crate) enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
pub(crate) struct Element {
    pub local_name: String,
    /// Resolved namespace URI, `None` when the element is unqualified.
    pub namespace: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    fn open(
        decoder: Decoder,
        ns: &ResolveResult<'_>,
        start: &BytesStart<'_>,
    ) -> Result<Self, RunError> {
        for attr in start.attributes() {
            attr.map_err(|e| RunError::MalformedXml(format!("attribute: {}", e)))?;
        }
        let local_name = decoder
            .decode(start.local_name().as_ref())
            .map_err(|e| RunError::MalformedXml(format!("element name: {}", e)))?
            .into_owned();
        let namespace = match ns {
            ResolveResult::Bound(ns) => Some(
                decoder
                    .decode(ns.as_ref())
                    .map_err(|e| RunError::MalformedXml(format!("namespace: {}", e)))?
                    .into_owned(),
            ),
            ResolveResult::Unbound => None,
            ResolveResult::Unknown(prefix) => {
                return Err(RunError::MalformedXml(format!(
                    "undeclared namespace prefix '{}'",
                    String::from_utf8_lossy(prefix)
                )))
            }
        };
        Ok(Self {
            local_name,
            namespace,
            children: Vec::new(),
        })
    }

    /// Name is compared exactly; the namespace URI ASCII case-insensitively.
    pub fn has_name_ns(&self, name: &str, ns: &str) -> bool {
        self.local_name == name
            && self
                .namespace
                .as_deref()
                .is_some_and(|own| own.eq_ignore_ascii_case(ns))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Concatenation of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

/// Parsed manifest. Dropping it releases the whole tree.
#[derive(Debug)]
pub(crate) struct ManifestDocument {
    root: Option<Element>,
}

impl ManifestDocument {
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    /// Parses `bytes` into a tree; any markup error is [`RunError::MalformedXml`].
    pub fn parse(bytes: &[u8]) -> Result<Self, RunError> {
        let malformed = |e: quick_xml::Error| RunError::MalformedXml(e.to_string());

        let mut reader = NsReader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            // Taken before the read: the resolved namespace borrows the reader.
            let decoder = reader.decoder();
            let (ns, event) = reader.read_resolved_event_into(&mut buf).map_err(malformed)?;
            match event {
                Event::Start(start) => stack.push(Element::open(decoder, &ns, &start)?),
                Event::Empty(start) => {
                    let el = Element::open(decoder, &ns, &start)?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::End(_) => {
                    let el = stack.pop().ok_or_else(|| {
                        RunError::MalformedXml("unmatched closing tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, el)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(malformed)?;
                    if !text.trim().is_empty() {
                        push_text(&mut stack, text.into_owned())?;
                    }
                }
                Event::CData(cdata) => {
                    let text = decoder
                        .decode(&cdata)
                        .map_err(|e| RunError::MalformedXml(format!("cdata: {}", e)))?
                        .into_owned();
                    if !text.is_empty() {
                        push_text(&mut stack, text)?;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(RunError::MalformedXml(format!(
                "unexpected end of document inside <{}>",
                open.local_name
            )));
        }
        Ok(Self { root })
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    el: Element,
) -> Result<(), RunError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(el)),
        None if root.is_some() => {
            return Err(RunError::MalformedXml(
                "more than one root element".to_string(),
            ))
        }
        None => *root = Some(el),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: String) -> Result<(), RunError> {
    match stack.last_mut() {
        Some(parent) => {
            // Adjacent text and CDATA merge into one node.
            if let Some(Node::Text(prev)) = parent.children.last_mut() {
                prev.push_str(&text);
            } else {
                parent.children.push(Node::Text(text));
            }
            Ok(())
        }
        None => Err(RunError::MalformedXml(
            "text outside the root element".to_string(),
        )),
    }
}
