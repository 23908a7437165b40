#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

pub fn cmd() -> Command {
    Command::cargo_bin("pdf_renderer").unwrap()
}

/// Build a PDF with one empty page per `(width, height, rotate)` entry.
pub fn pdf_with_pages(pages: &[(i64, i64, i64)]) -> Vec<u8> {
    let mut doc = document_with_pages(pages);
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn document_with_pages(pages: &[(i64, i64, i64)]) -> lopdf::Document {
    use lopdf::{Object, Stream, dictionary};

    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = pages
        .iter()
        .map(|&(width, height, rotate)| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ],
                "Rotate" => rotate,
                "Contents" => Object::Reference(content_id),
                "Resources" => dictionary! {},
            });
            Object::Reference(page_id)
        })
        .collect();

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Fixture"),
        "Author" => Object::string_literal("pdf-renderer tests"),
    });
    doc.trailer.set("Info", Object::Reference(info_id));
    doc
}

pub fn write_pdf(bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

/// Run the binary and parse its single stdout line.
pub fn run_json(args: &[&str]) -> serde_json::Value {
    let output = cmd().args(args).output().unwrap();
    assert!(output.status.success(), "exit status {:?}", output.status);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1, "expected one line, got {stdout:?}");
    serde_json::from_str(stdout.trim_end()).unwrap()
}

/// Fail loudly when an engine-backed test runs without PDFium bound.
pub fn require_pdfium() {
    let fixture = write_pdf(&pdf_with_pages(&[(612, 792, 0)]));
    let value = run_json(&["info", fixture.path().to_str().unwrap()]);
    if let Some(error) = value["error"].as_str() {
        assert!(
            !error.starts_with("Failed to bind PDFium library"),
            "PDFium is not available (set PDFIUM_LIB_PATH): {error}"
        );
    }
}

const PASSWORD_PADDING: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01,
    0x08, 0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53,
    0x69, 0x7A,
];

fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut state: Vec<u8> = (0..=255).collect();
    let mut j = 0usize;
    for i in 0..256 {
        j = (j + state[i] as usize + key[i % key.len()] as usize) % 256;
        state.swap(i, j);
    }

    let (mut i, mut j) = (0usize, 0usize);
    data.iter()
        .map(|byte| {
            i = (i + 1) % 256;
            j = (j + state[i] as usize) % 256;
            state.swap(i, j);
            byte ^ state[(state[i] as usize + state[j] as usize) % 256]
        })
        .collect()
}

/// Single 612x792 page behind the 40-bit RC4 standard security handler
/// (revision 2) with empty user and owner passwords.
///
/// The page has no strings and an empty content stream, so only the
/// /Encrypt dictionary itself needs computing.
pub fn encrypted_pdf() -> Vec<u8> {
    use lopdf::{Object, StringFormat, dictionary};

    let permissions: i32 = -4;
    let file_id = b"pdf-renderer-fix".to_vec();

    // Owner entry: RC4 under md5(padded owner password), owner falls back to user
    let owner_key = md5::compute(PASSWORD_PADDING);
    let owner_entry = rc4(&owner_key.0[..5], &PASSWORD_PADDING);

    let mut context = md5::Context::new();
    context.consume(PASSWORD_PADDING);
    context.consume(&owner_entry);
    context.consume(permissions.to_le_bytes());
    context.consume(&file_id);
    let file_key = context.compute();
    let user_entry = rc4(&file_key.0[..5], &PASSWORD_PADDING);

    let mut doc = document_with_pages(&[(612, 792, 0)]);
    // Info strings would have to be encrypted too
    doc.trailer.remove(b"Info");
    doc.trailer.set(
        "Encrypt",
        dictionary! {
            "Filter" => "Standard",
            "V" => Object::Integer(1),
            "R" => Object::Integer(2),
            "O" => Object::String(owner_entry, StringFormat::Hexadecimal),
            "U" => Object::String(user_entry, StringFormat::Hexadecimal),
            "P" => Object::Integer(i64::from(permissions)),
        },
    );
    doc.trailer.set(
        "ID",
        vec![
            Object::String(file_id.clone(), StringFormat::Hexadecimal),
            Object::String(file_id, StringFormat::Hexadecimal),
        ],
    );

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
