//! Content stream decoding into positioned text runs.
//!
//! Only the text state is tracked: font selection, the text matrix and line
//! leading. Graphics-state transforms (`cm`) are ignored, so positions are
//! exact only for content drawn in default user space.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Horizontal advance per character as a fraction of the font size.
pub(crate) const CHAR_WIDTH_RATIO: f64 = 0.5;

/// Ascent above the baseline as a fraction of the font size.
pub(crate) const ASCENT_RATIO: f64 = 0.8;

/// Descent below the baseline as a fraction of the font size.
pub(crate) const DESCENT_RATIO: f64 = 0.2;

/// TJ adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f64 = 200.0;

/// A run of text in PDF user space (bottom-left origin).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawSpan {
    pub text: String,
    /// Left edge
    pub x: f64,
    /// Baseline
    pub y: f64,
    /// Effective font size
    pub size: f64,
    pub font: String,
    /// Index of the enclosing BT/ET block
    pub block_no: usize,
    /// Index of the baseline within the block
    pub line_no: usize,
}

impl RawSpan {
    /// Approximate advance width.
    pub fn width(&self) -> f64 {
        self.text.chars().count() as f64 * self.size * CHAR_WIDTH_RATIO
    }
}

/// Decode all text-showing operators on a page.
pub(crate) fn decode_page(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<RawSpan>> {
    let fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;
    let content = page_content(doc, page_id)?;
    if content.is_empty() {
        return Ok(Vec::new());
    }
    let content =
        lopdf::content::Content::decode(&content).map_err(|e| Error::PdfParse(e.to_string()))?;

    let mut state = TextState::new(doc, &fonts);
    for op in &content.operations {
        state.apply(&op.operator, &op.operands);
    }
    Ok(state.spans)
}

/// Concatenated, decompressed content streams of a page.
fn page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc.get_dictionary(page_id)?;

    let contents = match page_dict.get(b"Contents") {
        Ok(contents) => contents,
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(r) => match doc.get_object(*r)? {
            Object::Stream(s) => s
                .decompressed_content()
                .or_else(|_| Ok(s.content.clone())),
            Object::Array(arr) => Ok(concat_streams(doc, arr)),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        },
        Object::Array(arr) => Ok(concat_streams(doc, arr)),
        _ => Err(Error::PdfParse("Invalid content stream".to_string())),
    }
}

fn concat_streams(doc: &LopdfDocument, refs: &[Object]) -> Vec<u8> {
    let mut content = Vec::new();
    for obj in refs {
        if let Object::Reference(r) = obj {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                match s.decompressed_content() {
                    Ok(data) => content.extend_from_slice(&data),
                    Err(_) => content.extend_from_slice(&s.content),
                }
                content.push(b' ');
            }
        }
    }
    content
}

/// Text matrix plus the line matrix it was derived from.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    line_e: f64,
    line_f: f64,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_e: 0.0,
            line_f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: [f64; 6]) {
        let [a, b, c, d, e, f] = m;
        *self = Self {
            a,
            b,
            c,
            d,
            e,
            f,
            line_e: e,
            line_f: f,
        };
    }

    /// Move to the start of the next line, offset from the current line start.
    fn translate(&mut self, tx: f64, ty: f64) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    /// Advance along the current line after showing text.
    fn advance(&mut self, width: f64) {
        self.e += width * self.a;
        self.f += width * self.b;
    }

    fn position(&self) -> (f64, f64) {
        (self.e, self.f)
    }

    fn scale(&self) -> f64 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

struct TextState<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, &'a lopdf::Dictionary>,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f64,
    leading: f64,
    matrix: TextMatrix,
    block_no: usize,
    line_no: usize,
    line_y: Option<f64>,
    spans: Vec<RawSpan>,
}

impl<'a> TextState<'a> {
    fn new(doc: &'a LopdfDocument, fonts: &'a BTreeMap<Vec<u8>, &'a lopdf::Dictionary>) -> Self {
        Self {
            doc,
            fonts,
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: 12.0,
            matrix: TextMatrix::default(),
            block_no: 0,
            line_no: 0,
            line_y: None,
            spans: Vec::new(),
        }
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match operator {
            "BT" => {
                self.matrix = TextMatrix::default();
                if self.line_y.is_some() {
                    self.block_no += 1;
                }
                self.line_no = 0;
                self.line_y = None;
            }
            "Tf" if operands.len() >= 2 => {
                if let Object::Name(key) = &operands[0] {
                    self.font_key = key.clone();
                    self.font_name = self
                        .fonts
                        .get(key)
                        .and_then(|f| f.get(b"BaseFont").ok())
                        .and_then(|o| o.as_name().ok())
                        .map(|n| String::from_utf8_lossy(n).to_string())
                        .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                }
                self.font_size = get_number(&operands[1]).unwrap_or(12.0);
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(get_number) {
                    self.leading = leading;
                }
            }
            "Td" | "TD" if operands.len() >= 2 => {
                let tx = get_number(&operands[0]).unwrap_or(0.0);
                let ty = get_number(&operands[1]).unwrap_or(0.0);
                if operator == "TD" {
                    self.leading = -ty;
                }
                self.matrix.translate(tx, ty);
            }
            "Tm" if operands.len() >= 6 => {
                let mut m = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                for (slot, operand) in m.iter_mut().zip(operands) {
                    if let Some(v) = get_number(operand) {
                        *slot = v;
                    }
                }
                self.matrix.set(m);
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = self.decode_array(items);
                    self.show(text);
                }
            }
            "'" | "\"" => {
                self.next_line();
                let index = if operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(index) {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    fn next_line(&mut self) {
        self.matrix.translate(0.0, -self.leading);
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(&self.font_key)
            .and_then(|f| f.get_font_encoding(self.doc).ok());
        match encoding {
            Some(enc) => LopdfDocument::decode_text(&enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }

    /// Decode a TJ array, turning large negative kerning into word gaps.
    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes)),
                other => {
                    let gap = get_number(other).map(|n| -n).unwrap_or(0.0);
                    if gap > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(char::is_whitespace)
                    {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }

    fn show(&mut self, text: String) {
        let size = self.font_size * self.matrix.scale();
        let (x, y) = self.matrix.position();

        if !text.trim().is_empty() {
            match self.line_y {
                Some(previous) if (previous - y).abs() > f64::EPSILON => self.line_no += 1,
                _ => {}
            }
            self.line_y = Some(y);

            self.spans.push(RawSpan {
                text: text.clone(),
                x,
                y,
                size,
                font: self.font_name.clone(),
                block_no: self.block_no,
                line_no: self.line_no,
            });
        }

        let advance = text.chars().count() as f64 * self.font_size * CHAR_WIDTH_RATIO;
        self.matrix.advance(advance);
    }
}

fn get_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Fallback decoding when a font carries no usable encoding.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42]), "AB");
        assert_eq!(decode_text_simple(&[0x63, 0x61, 0x66, 0xE9]), "caf\u{e9}");
    }

    #[test]
    fn test_text_matrix_lines() {
        let mut matrix = TextMatrix::default();
        matrix.set([1.0, 0.0, 0.0, 1.0, 72.0, 700.0]);
        matrix.advance(30.0);
        assert_eq!(matrix.position(), (102.0, 700.0));

        // Td is relative to the line start, not the advanced position.
        matrix.translate(0.0, -14.0);
        assert_eq!(matrix.position(), (72.0, 686.0));
    }

    #[test]
    fn test_text_matrix_scale() {
        let mut matrix = TextMatrix::default();
        matrix.set([2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        assert_eq!(matrix.scale(), 2.0);
    }

    #[test]
    fn test_raw_span_width() {
        let span = RawSpan {
            text: "abcd".to_string(),
            x: 0.0,
            y: 0.0,
            size: 10.0,
            font: "Helvetica".to_string(),
            block_no: 0,
            line_no: 0,
        };
        assert_eq!(span.width(), 20.0);
    }
}
