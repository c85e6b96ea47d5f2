use roxmltree::{Document, Node};
use log::{debug, trace};
use crate::case::CaseError;

/// One of the fixed test case sections along with its child elements, which
/// are read by position
pub(crate) struct Section<'a, 'input> {
    tag: &'static str,
    children: Vec<Node<'a, 'input>>,
}

impl<'a, 'input> Section<'a, 'input> {
    /// Locate the first element named `tag` anywhere in `doc` and make sure it has
    /// at least `needed` child elements. Any later element with the same tag is ignored.
    pub fn find(doc: &'a Document<'input>, tag: &'static str, needed: usize) -> Result<Self, CaseError> {
        let mut matches = doc.descendants().filter(|n| n.has_tag_name(tag));
        let node = matches.next().ok_or(CaseError::MissingSection(tag))?;

        let extra = matches.count();
        if extra > 0 {
            debug!("ignoring {} extra <{}> section(s)", extra, tag);
        }

        let children: Vec<_> = node.children()
            .filter(|n| n.is_element())
            .collect();
        trace!("<{}>: {} child element(s)", tag, children.len());

        if children.len() < needed {
            return Err(CaseError::ShortSection { section: tag, found: children.len(), needed });
        }

        Ok(Section { tag, children })
    }

    /// Raw text of the child at `idx`, untouched
    pub fn text(&self, idx: usize, field: &'static str) -> Result<String, CaseError> {
        let child = self.children.get(idx)
            .ok_or(CaseError::ShortSection { section: self.tag, found: self.children.len(), needed: idx + 1 })?;

        field_text(*child)
            .ok_or(CaseError::NoText { section: self.tag, field })
    }

    /// Child text parsed as a float. Surrounding whitespace is allowed, like the
    /// pretty-printed numbers in hand written case files.
    pub fn number(&self, idx: usize, field: &'static str) -> Result<f64, CaseError> {
        let text = self.text(idx, field)?;

        text.trim().parse()
            .map_err(|cause| CaseError::NotNumeric {
                section: self.tag,
                field,
                text: text.clone(),
                cause,
            })
    }

    /// Text of every child from `start` on, in document order
    pub fn rest(&self, start: usize, field: &'static str) -> Result<Vec<String>, CaseError> {
        self.children.iter()
            .skip(start)
            .map(|child| field_text(*child)
                .ok_or(CaseError::NoText { section: self.tag, field })
            )
            .collect()
    }
}

/// All of an element's own text, joined. Comments and processing instructions
/// between the pieces are skipped; `None` when there is no text at all.
fn field_text(node: Node) -> Option<String> {
    let mut pieces = node.children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .peekable();

    pieces.peek()?;
    Some(pieces.collect())
}
