//! PDF geometry provider using lopdf.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::content::{decode_page, RawSpan, ASCENT_RATIO, CHAR_WIDTH_RATIO, DESCENT_RATIO};
use super::GeometryProvider;
use crate::error::{Error, Result};
use crate::layout::HighlightQuads;
use crate::model::{Point, Quad, Rect, Span, TocEntry, Word};

/// PDF magic bytes.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Name trees nested deeper than this are treated as malformed.
const MAX_NAME_TREE_DEPTH: u32 = 32;

/// US Letter, used when a page carries no usable MediaBox.
const DEFAULT_MEDIA_BOX: Rect = Rect {
    x0: 0.0,
    y0: 0.0,
    x1: 612.0,
    y1: 792.0,
};

/// Reads page geometry from a PDF file.
///
/// Text positions come from the content stream's text state and font metrics
/// are approximated from the font size, so boxes are close but not exact.
/// Coordinates are flipped to a top-left origin using the page's MediaBox.
pub struct PdfProvider {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfProvider {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !is_pdf_bytes(data) {
            return Err(Error::UnknownFormat);
        }

        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }

        let pages = doc.get_pages();
        log::debug!("Loaded PDF {} with {} pages", doc.version, pages.len());
        Ok(Self { doc, pages })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&(page + 1))
            .copied()
            .ok_or(Error::PageOutOfRange(page + 1, self.page_count()))
    }

    fn media_box(&self, page_id: ObjectId) -> Rect {
        let media_box = self
            .doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|dict| self.inherited(dict, b"MediaBox"))
            .and_then(|obj| self.resolve(obj).as_array().ok())
            .filter(|array| array.len() >= 4)
            .map(|array| {
                let n: Vec<f64> = array.iter().map(|o| get_number(o).unwrap_or(0.0)).collect();
                Rect::new(n[0].min(n[2]), n[1].min(n[3]), n[0].max(n[2]), n[1].max(n[3]))
            });
        media_box.unwrap_or(DEFAULT_MEDIA_BOX)
    }

    /// Look up a page attribute, walking up the page tree.
    fn inherited<'a>(&'a self, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
        let mut current = dict;
        for _ in 0..32 {
            if let Ok(value) = current.get(key) {
                return Some(value);
            }
            let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
            current = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(r) => self.doc.get_object(*r).unwrap_or(obj),
            _ => obj,
        }
    }

    fn raw_spans(&self, page: u32) -> Result<(Vec<RawSpan>, Rect)> {
        let page_id = self.page_id(page)?;
        let spans = decode_page(&self.doc, page_id)?;
        Ok((spans, self.media_box(page_id)))
    }

    /// Words in content-stream order.
    fn stream_words(&self, page: u32) -> Result<Vec<Word>> {
        let (raw, media_box) = self.raw_spans(page)?;
        Ok(split_words(&raw, &media_box))
    }

    fn outline_items(
        &self,
        item_ref: ObjectId,
        level: u32,
        entries: &mut Vec<TocEntry>,
        visited: &mut HashSet<ObjectId>,
    ) {
        let mut next = Some(item_ref);

        while let Some(id) = next.take() {
            if !visited.insert(id) {
                log::warn!("Outline item {:?} is reachable twice, truncating", id);
                return;
            }
            let Ok(item) = self.doc.get_dictionary(id) else {
                return;
            };

            let title = get_string_from_dict(item, b"Title").unwrap_or_default();
            match self.outline_destination(item) {
                Some(page) => entries.push(TocEntry::new(level, title, page)),
                None => log::debug!("Outline entry {:?} has no resolvable page", title),
            }

            if let Ok(first) = item.get(b"First").and_then(Object::as_reference) {
                self.outline_items(first, level + 1, entries, visited);
            }
            next = item.get(b"Next").and_then(Object::as_reference).ok();
        }
    }

    fn outline_destination(&self, item: &Dictionary) -> Option<u32> {
        if let Ok(dest) = item.get(b"Dest") {
            return self.resolve_destination(dest);
        }

        let action = self.resolve(item.get(b"A").ok()?).as_dict().ok()?;
        self.resolve_destination(action.get(b"D").ok()?)
    }

    /// Resolve an explicit or named destination to a 1-indexed page number.
    fn resolve_destination(&self, dest: &Object) -> Option<u32> {
        match self.resolve(dest) {
            Object::Name(name) | Object::String(name, _) => {
                self.explicit_destination(self.named_destination(name)?)
            }
            other => self.explicit_destination(other),
        }
    }

    /// Page of a destination array, or of the array under a dictionary's `/D`.
    fn explicit_destination(&self, dest: &Object) -> Option<u32> {
        let array = match self.resolve(dest) {
            Object::Dictionary(dict) => self.resolve(dict.get(b"D").ok()?).as_array().ok()?,
            other => other.as_array().ok()?,
        };
        let target = array.first()?.as_reference().ok()?;
        self.pages
            .iter()
            .find(|(_, id)| **id == target)
            .map(|(num, _)| *num)
    }

    /// Look a name up in the `/Names` → `/Dests` tree, then in the catalog's
    /// `/Dests` dictionary.
    fn named_destination(&self, name: &[u8]) -> Option<&Object> {
        let catalog = self.doc.catalog().ok()?;

        let from_tree = catalog
            .get(b"Names")
            .ok()
            .and_then(|names| self.resolve(names).as_dict().ok())
            .and_then(|names| names.get(b"Dests").ok())
            .and_then(|tree| self.resolve(tree).as_dict().ok())
            .and_then(|tree| self.lookup_name_tree(tree, name, 0));
        if from_tree.is_some() {
            return from_tree;
        }

        let dests = self.resolve(catalog.get(b"Dests").ok()?).as_dict().ok()?;
        dests.get(name).ok()
    }

    /// Search a name tree node and its `/Kids` for `name`.
    fn lookup_name_tree<'a>(
        &'a self,
        node: &'a Dictionary,
        name: &[u8],
        depth: u32,
    ) -> Option<&'a Object> {
        if depth > MAX_NAME_TREE_DEPTH {
            log::warn!("Name tree deeper than {} levels, giving up", MAX_NAME_TREE_DEPTH);
            return None;
        }

        if let Some(names) = node.get(b"Names").ok().and_then(|n| self.resolve(n).as_array().ok()) {
            let found = names.chunks_exact(2).find_map(|pair| match self.resolve(&pair[0]) {
                Object::String(key, _) if key.as_slice() == name => Some(&pair[1]),
                _ => None,
            });
            if found.is_some() {
                return found;
            }
        }

        let kids = self.resolve(node.get(b"Kids").ok()?).as_array().ok()?;
        kids.iter()
            .filter_map(|kid| self.resolve(kid).as_dict().ok())
            .find_map(|kid| self.lookup_name_tree(kid, name, depth + 1))
    }
}

impl GeometryProvider for PdfProvider {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Words sorted by bottom edge, then left edge.
    fn words(&self, page: u32) -> Result<Vec<Word>> {
        let mut words = self.stream_words(page)?;
        words.sort_by(|a, b| {
            a.rect
                .y1
                .total_cmp(&b.rect.y1)
                .then(a.rect.x0.total_cmp(&b.rect.x0))
        });
        Ok(words)
    }

    fn spans(&self, page: u32) -> Result<Vec<Span>> {
        let (raw, media_box) = self.raw_spans(page)?;
        Ok(raw
            .iter()
            .map(|s| {
                Span::new(span_rect(s, &media_box), s.text.clone(), s.font.clone(), s.size)
                    .with_position(s.block_no, s.line_no)
            })
            .collect())
    }

    fn highlight_annotations(&self, page: u32) -> Result<Vec<HighlightQuads>> {
        let page_id = self.page_id(page)?;
        let media_box = self.media_box(page_id);
        let page_dict = self.doc.get_dictionary(page_id)?;

        let Ok(annots) = page_dict.get(b"Annots") else {
            return Ok(Vec::new());
        };
        let Ok(annots) = self.resolve(annots).as_array() else {
            log::warn!("Page {} has a malformed /Annots entry", page + 1);
            return Ok(Vec::new());
        };

        let mut highlights = Vec::new();
        for annot in annots {
            let Ok(dict) = self.resolve(annot).as_dict() else {
                continue;
            };
            let is_highlight = dict
                .get(b"Subtype")
                .and_then(Object::as_name)
                .map(|name| name == b"Highlight")
                .unwrap_or(false);
            if !is_highlight {
                continue;
            }

            let quads = dict
                .get(b"QuadPoints")
                .ok()
                .map(|obj| parse_quad_points(self.resolve(obj), &media_box))
                .unwrap_or_default();
            if quads.is_empty() {
                log::warn!("Highlight on page {} has no usable QuadPoints", page + 1);
                continue;
            }
            highlights.push(quads);
        }

        log::debug!("Page {}: {} highlight annotations", page + 1, highlights.len());
        Ok(highlights)
    }

    fn toc(&self) -> Result<Vec<TocEntry>> {
        let mut entries = Vec::new();

        let first = self
            .doc
            .catalog()
            .ok()
            .and_then(|catalog| catalog.get(b"Outlines").ok())
            .and_then(|outlines| self.resolve(outlines).as_dict().ok())
            .and_then(|outlines| outlines.get(b"First").ok())
            .and_then(|first| first.as_reference().ok());

        if let Some(first) = first {
            self.outline_items(first, 1, &mut entries, &mut HashSet::new());
        }
        Ok(entries)
    }

    fn plain_text(&self, page: u32) -> Result<String> {
        let words = self.stream_words(page)?;
        Ok(plain_text_from_words(&words))
    }
}

/// Check the `%PDF-` header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

/// Bounding box of a raw span in top-left coordinates.
fn span_rect(span: &RawSpan, media_box: &Rect) -> Rect {
    Rect::new(
        span.x - media_box.x0,
        media_box.y1 - (span.y + span.size * ASCENT_RATIO),
        span.x - media_box.x0 + span.width(),
        media_box.y1 - (span.y - span.size * DESCENT_RATIO),
    )
}

/// Split spans into whitespace-separated words.
///
/// Word numbers restart on every new (block, line) pair.
fn split_words(spans: &[RawSpan], media_box: &Rect) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current_line = None;
    let mut word_no = 0;

    for span in spans {
        if current_line != Some((span.block_no, span.line_no)) {
            current_line = Some((span.block_no, span.line_no));
            word_no = 0;
        }

        let rect = span_rect(span, media_box);
        let char_width = span.size * CHAR_WIDTH_RATIO;
        let mut start: Option<usize> = None;

        for (i, ch) in span.text.chars().chain(std::iter::once(' ')).enumerate() {
            if ch.is_whitespace() {
                if let Some(begin) = start.take() {
                    let text: String = span.text.chars().skip(begin).take(i - begin).collect();
                    let x0 = rect.x0 + begin as f64 * char_width;
                    let x1 = rect.x0 + i as f64 * char_width;
                    words.push(
                        Word::new(Rect::new(x0, rect.y0, x1, rect.y1), text).with_position(
                            span.block_no,
                            span.line_no,
                            word_no,
                        ),
                    );
                    word_no += 1;
                }
            } else if start.is_none() {
                start = Some(i);
            }
        }
    }

    words
}

/// One line of text per (block, line) pair, words joined by single spaces.
fn plain_text_from_words(words: &[Word]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = None;

    for word in words {
        let key = (word.block_no, word.line_no);
        match lines.last_mut() {
            Some(line) if current == Some(key) => {
                line.push(' ');
                line.push_str(&word.text);
            }
            _ => {
                lines.push(word.text.clone());
                current = Some(key);
            }
        }
    }

    lines.join("\n")
}

/// Parse `/QuadPoints` into quads, eight numbers per quad.
fn parse_quad_points(obj: &Object, media_box: &Rect) -> Vec<Quad> {
    let Ok(array) = obj.as_array() else {
        return Vec::new();
    };
    let numbers: Vec<f64> = array.iter().filter_map(get_number).collect();

    numbers
        .chunks_exact(8)
        .map(|c| {
            let flip = |x: f64, y: f64| Point::new(x - media_box.x0, media_box.y1 - y);
            Quad::new([flip(c[0], c[1]), flip(c[2], c[3]), flip(c[4], c[5]), flip(c[6], c[7])])
        })
        .collect()
}

fn get_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => {
            // UTF-16BE with BOM, the PDF text string encoding for Unicode
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                Some(
                    String::from_utf8(bytes.clone())
                        .unwrap_or_else(|_| bytes.iter().map(|&b| b as char).collect()),
                )
            }
        }
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}
