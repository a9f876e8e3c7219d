//! PDF fixtures built in memory with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::encryption::{decrypt_object, get_encryption_key};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

/// Password padding string of the standard security handler.
const PAD_BYTES: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01, 0x08,
    0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53, 0x69, 0x7A,
];

fn text_operations(text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 24.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

fn document(pages: Vec<Vec<Operation>>) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}

fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut state: Vec<u8> = (0..=255).collect();
    let mut j = 0u8;
    for i in 0..256 {
        j = j.wrapping_add(state[i]).wrapping_add(key[i % key.len()]);
        state.swap(i, j as usize);
    }

    let (mut i, mut j) = (0u8, 0u8);
    data.iter()
        .map(|byte| {
            i = i.wrapping_add(1);
            j = j.wrapping_add(state[i as usize]);
            state.swap(i as usize, j as usize);
            let k = state[state[i as usize].wrapping_add(state[j as usize]) as usize];
            byte ^ k
        })
        .collect()
}

/// A PDF with one text run per page.
pub fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    save(document(texts.iter().map(|text| text_operations(text)).collect()))
}

/// A single-page PDF whose content stream draws no text.
pub fn blank_pdf() -> Vec<u8> {
    save(document(vec![vec![
        Operation::new("q", vec![]),
        Operation::new("Q", vec![]),
    ]]))
}

/// A single-page PDF encrypted with 40-bit RC4 (V1, R2) under `user_password`.
///
/// An empty `user_password` gives a document anyone can open, which is what
/// most "protected" PDFs in the wild are.
pub fn encrypted_pdf(text: &str, user_password: &str) -> Vec<u8> {
    let mut doc = document(vec![text_operations(text)]);
    doc.trailer.set(
        "ID",
        vec![
            Object::String(b"pdfmirror-file-id".to_vec(), StringFormat::Hexadecimal),
            Object::String(b"pdfmirror-file-id".to_vec(), StringFormat::Hexadecimal),
        ],
    );
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "Length" => 40,
        "O" => Object::String(vec![0x4f; 32], StringFormat::Hexadecimal),
        "P" => -4,
    });
    doc.trailer.set("Encrypt", encrypt_id);

    let key = get_encryption_key(&doc, user_password, false).unwrap();
    doc.get_object_mut(encrypt_id)
        .and_then(Object::as_dict_mut)
        .unwrap()
        .set("U", Object::String(rc4(&key, &PAD_BYTES), StringFormat::Hexadecimal));

    // RC4 is symmetric, so the decryptor also encrypts.
    for (&id, obj) in doc.objects.iter_mut() {
        let Ok(cipher) = decrypt_object(&key, id, &*obj, false) else {
            continue;
        };
        if let Object::Stream(stream) = obj {
            stream.set_content(cipher);
        }
    }

    save(doc)
}
