//! PDF document decoder using lopdf.

use std::collections::HashMap;
use std::path::Path;

use lopdf::{Document as LopdfDocument, ObjectId};

use crate::detect;
use crate::error::{Error, Result};
use crate::model::PageFragments;

use super::content::{extract_fragments, FontInfo};

/// Default page geometry (US Letter) when no MediaBox can be resolved.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// PDF decoder: yields positioned text fragments per page.
pub struct PdfDecoder {
    doc: LopdfDocument,
}

impl PdfDecoder {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        detect::verify_path(&path)?;
        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Decode a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect::verify_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Total number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Decode every page into positioned text fragments.
    ///
    /// A page whose content stream cannot be decoded yields an empty
    /// fragment set rather than failing the document; scanned pages with no
    /// embedded text come out empty the same way.
    pub fn decode_pages(&self) -> Result<Vec<PageFragments>> {
        let pages = self.doc.get_pages();
        let mut out = Vec::with_capacity(pages.len());

        for (&page_num, &page_id) in pages.iter() {
            let (width, height) = self.page_dimensions(page_id);
            let mut page = PageFragments::new(page_num, width, height);

            match self.decode_page_text(page_num, page_id) {
                Ok(fragments) => page.fragments = fragments,
                Err(e) => {
                    log::warn!("failed to extract text from page {}: {}", page_num, e);
                }
            }

            out.push(page);
        }

        Ok(out)
    }

    /// Whether any page produced at least one text fragment.
    pub fn has_extractable_text(pages: &[PageFragments]) -> bool {
        pages.iter().any(|p| !p.fragments.is_empty())
    }

    fn decode_page_text(&self, page_num: u32, page_id: ObjectId) -> Result<Vec<crate::model::TextFragment>> {
        let fonts = self.page_fonts(page_id);
        let content = self.doc.get_page_content(page_id)?;
        extract_fragments(page_num, &content, &fonts)
    }

    /// Build the font lookup table for a page: resource name to base font
    /// name and declared encoding.
    fn page_fonts(&self, page_id: ObjectId) -> HashMap<Vec<u8>, FontInfo> {
        let mut fonts = HashMap::new();

        let font_dicts = match self.doc.get_page_fonts(page_id) {
            Ok(f) => f,
            Err(e) => {
                log::debug!("no font resources for page object {:?}: {}", page_id, e);
                return fonts;
            }
        };

        for (name, dict) in &font_dicts {
            let base_font = dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).into_owned())
                .unwrap_or_else(|| String::from_utf8_lossy(name).into_owned());

            let encoding = dict.get(b"Encoding").ok().and_then(|o| match o {
                lopdf::Object::Name(n) => Some(String::from_utf8_lossy(n).into_owned()),
                _ => None,
            });

            fonts.insert(
                name.clone(),
                FontInfo {
                    name: base_font,
                    encoding,
                },
            );
        }

        fonts
    }

    /// Page dimensions from the MediaBox, walking up the page tree when the
    /// page inherits it from a parent node.
    fn page_dimensions(&self, page_id: ObjectId) -> (f32, f32) {
        let Ok(page_dict) = self
            .doc
            .get_object(page_id)
            .and_then(|obj| obj.as_dict())
        else {
            return DEFAULT_PAGE_SIZE;
        };

        match self.find_media_box(page_dict) {
            Some(nums) if nums.len() >= 4 => {
                let width = nums[2] - nums[0];
                let height = nums[3] - nums[1];
                if width > 0.0 && height > 0.0 {
                    (width, height)
                } else {
                    DEFAULT_PAGE_SIZE
                }
            }
            _ => DEFAULT_PAGE_SIZE,
        }
    }

    fn find_media_box(&self, dict: &lopdf::Dictionary) -> Option<Vec<f32>> {
        if let Ok(obj) = dict.get(b"MediaBox") {
            if let Some(nums) = self.resolve_numbers(obj) {
                return Some(nums);
            }
        }

        let parent_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
        let parent = self.doc.get_object(parent_id).ok()?.as_dict().ok()?;
        self.find_media_box(parent)
    }

    fn resolve_numbers(&self, obj: &lopdf::Object) -> Option<Vec<f32>> {
        let arr = match obj {
            lopdf::Object::Array(arr) => arr.clone(),
            lopdf::Object::Reference(id) => self
                .doc
                .get_object(*id)
                .ok()
                .and_then(|o| o.as_array().ok())
                .cloned()?,
            _ => return None,
        };

        arr.iter()
            .map(|o| match o {
                lopdf::Object::Integer(i) => Some(*i as f32),
                lopdf::Object::Real(f) => Some(*f),
                _ => None,
            })
            .collect()
    }
}
