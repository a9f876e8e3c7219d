//! PDF text extraction using lopdf.

use lopdf::encryption::{self, DecryptionError};
use lopdf::{Document, Object};
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    page_count: u32,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            page_count: 0,
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document.as_ref().ok_or(PdfError::NotLoaded)
    }
}

/// lopdf's `Document::decrypt` needs the `/CF` crypt filters that only V4
/// handlers carry, so V1/V2 (RC4) documents are decrypted object by object.
fn decrypt_with_empty_password(doc: &mut Document) -> Result<()> {
    let has_crypt_filters = doc
        .get_encrypted()
        .map(|dict| dict.has(b"CF"))
        .unwrap_or(false);

    if has_crypt_filters {
        doc.decrypt("")
            .map_err(|e| PdfError::DecryptionFailed(e.to_string()))
    } else {
        decrypt_rc4(doc, "").map_err(|e| PdfError::DecryptionFailed(e.to_string()))
    }
}

fn decrypt_rc4(doc: &mut Document, password: &str) -> std::result::Result<(), DecryptionError> {
    let key = encryption::get_encryption_key(doc, password, true)?;
    let encrypt_id = doc
        .trailer
        .get(b"Encrypt")
        .and_then(Object::as_reference)
        .ok();

    for (&id, obj) in doc.objects.iter_mut() {
        if Some(id) == encrypt_id {
            continue;
        }
        let plain = match encryption::decrypt_object(&key, id, &*obj, false) {
            Ok(plain) => plain,
            Err(DecryptionError::NotDecryptable) => continue,
            Err(e) => return Err(e),
        };
        match obj {
            Object::Stream(stream) => stream.set_content(plain),
            Object::String(content, _) => *content = plain,
            _ => {}
        }
    }

    doc.trailer.remove(b"Encrypt");
    trace!("Decrypted {} objects with RC4", doc.objects.len());
    Ok(())
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            decrypt_with_empty_password(&mut doc)?;
            debug!("Decrypted PDF with empty password");
        }

        self.page_count = doc.get_pages().len() as u32;
        debug!("Loaded PDF with {} pages", self.page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if page == 0 || page > self.page_count {
            return Err(PdfError::InvalidPage(page));
        }

        let text = doc
            .extract_text(&[page])
            .map_err(|e| PdfError::PageExtraction {
                page,
                message: e.to_string(),
            })?;
        trace!("Page {}: {} chars", page, text.len());
        Ok(text)
    }
}
