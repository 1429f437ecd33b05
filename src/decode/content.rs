//! Content-stream text extraction.
//!
//! Walks the page's operator stream tracking the text matrix, and emits a
//! [`TextFragment`] for every shown string with its position, effective
//! font size, and font name.

use std::collections::HashMap;

use lopdf::content::Content;
use lopdf::Object;

use crate::error::{Error, Result};
use crate::model::TextFragment;

/// Kerning adjustment (in 1/1000 text-space units) beyond which a TJ
/// positioning number is treated as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Font lookup entry: resolved base font name and declared encoding.
#[derive(Debug, Clone)]
pub(crate) struct FontInfo {
    pub name: String,
    pub encoding: Option<String>,
}

/// Extract positioned text fragments from a decoded content stream.
pub(crate) fn extract_fragments(
    page: u32,
    content: &[u8],
    fonts: &HashMap<Vec<u8>, FontInfo>,
) -> Result<Vec<TextFragment>> {
    let content = Content::decode(content)
        .map_err(|e| Error::Decode(format!("content stream decode error: {}", e)))?;

    let mut fragments = Vec::new();
    let mut font_name = String::new();
    let mut font_encoding: Option<String> = None;
    let mut font_size: f32 = 12.0;
    let mut matrix = TextMatrix::default();
    let mut in_text = false;

    for op in content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text = true;
                matrix = TextMatrix::default();
            }
            "ET" => {
                in_text = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(resource) = &op.operands[0] {
                        match fonts.get(resource.as_slice()) {
                            Some(info) => {
                                font_name = info.name.clone();
                                font_encoding = info.encoding.clone();
                            }
                            None => {
                                font_name = String::from_utf8_lossy(resource).into_owned();
                                font_encoding = None;
                            }
                        }
                    }
                    font_size = number(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "Td" => {
                if op.operands.len() >= 2 {
                    let tx = number(&op.operands[0]).unwrap_or(0.0);
                    let ty = number(&op.operands[1]).unwrap_or(0.0);
                    matrix.translate(tx, ty);
                }
            }
            "TD" => {
                if op.operands.len() >= 2 {
                    let tx = number(&op.operands[0]).unwrap_or(0.0);
                    let ty = number(&op.operands[1]).unwrap_or(0.0);
                    matrix.leading = -ty;
                    matrix.translate(tx, ty);
                }
            }
            "TL" => {
                if let Some(leading) = op.operands.first().and_then(number) {
                    matrix.leading = leading;
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    matrix.set(
                        number(&op.operands[0]).unwrap_or(1.0),
                        number(&op.operands[1]).unwrap_or(0.0),
                        number(&op.operands[2]).unwrap_or(0.0),
                        number(&op.operands[3]).unwrap_or(1.0),
                        number(&op.operands[4]).unwrap_or(0.0),
                        number(&op.operands[5]).unwrap_or(0.0),
                    );
                }
            }
            "T*" => {
                matrix.next_line();
            }
            "Tj" | "TJ" => {
                if !in_text {
                    continue;
                }
                let text = if op.operator == "TJ" {
                    decode_tj_array(op.operands.first(), font_encoding.as_deref())
                } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                    decode_string(bytes, font_encoding.as_deref())
                } else {
                    String::new()
                };
                push_fragment(&mut fragments, page, text, &matrix, font_size, &font_name);
            }
            "'" | "\"" => {
                matrix.next_line();
                if !in_text {
                    continue;
                }
                // The quote operators carry the string last: ' as the sole
                // operand, " after the word/char spacing numbers.
                let text_idx = if op.operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                    let text = decode_string(bytes, font_encoding.as_deref());
                    push_fragment(&mut fragments, page, text, &matrix, font_size, &font_name);
                }
            }
            _ => {}
        }
    }

    Ok(fragments)
}

fn push_fragment(
    fragments: &mut Vec<TextFragment>,
    page: u32,
    text: String,
    matrix: &TextMatrix,
    font_size: f32,
    font_name: &str,
) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = matrix.position();
    let effective_size = font_size * matrix.scale();
    fragments.push(TextFragment::new(
        page,
        text,
        x,
        y,
        effective_size,
        font_name.to_string(),
    ));
}

/// Decode a TJ operand array: strings interleaved with kerning adjustments.
/// Large negative adjustments encode word spaces.
fn decode_tj_array(operand: Option<&Object>, encoding: Option<&str>) -> String {
    let Some(Object::Array(items)) = operand else {
        return String::new();
    };

    let mut combined = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => combined.push_str(&decode_string(bytes, encoding)),
            Object::Integer(n) => {
                if (-(*n as f32)) > TJ_SPACE_THRESHOLD {
                    push_space(&mut combined);
                }
            }
            Object::Real(n) => {
                if -n > TJ_SPACE_THRESHOLD {
                    push_space(&mut combined);
                }
            }
            _ => {}
        }
    }
    combined
}

fn push_space(text: &mut String) {
    if !text.is_empty() && !text.ends_with(' ') && !text.ends_with('\u{00A0}') {
        text.push(' ');
    }
}

/// Decode raw string bytes from a text-showing operator.
///
/// Identity-encoded fonts typically carry UTF-16BE code units; everything
/// else falls through the generic heuristic.
fn decode_string(bytes: &[u8], encoding: Option<&str>) -> String {
    if let Some(enc) = encoding {
        if enc.contains("Identity") && bytes.len() >= 2 && bytes.len() % 2 == 0 {
            let units: Vec<u16> = bytes
                .chunks(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            let decoded = String::from_utf16_lossy(&units);
            if !decoded.is_empty() && !decoded.chars().all(|c| c == '\u{FFFD}' || c == '\0') {
                return decoded;
            }
        }
    }
    decode_text_simple(bytes)
}

/// Generic text decoding: UTF-16BE with BOM, then UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&units).unwrap_or_default();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

/// Text matrix tracking position and scale through the operator stream.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
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
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.f -= self.leading * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Extract a number from a PDF object.
fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
