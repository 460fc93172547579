//! Plain-text to PDF rendering
//!
//! Text is set in the base-14 Courier font with WinAnsi encoding, so only
//! Latin-1 characters can be drawn. Anything else is removed beforehand by
//! [`sanitize_latin1`].

use crate::error::Result;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const MM: f32 = 72.0 / 25.4;

// A4 in points
const PAGE_WIDTH: f32 = 210.0 * MM;
const PAGE_HEIGHT: f32 = 297.0 * MM;

const MARGIN: f32 = 10.0 * MM;
const BOTTOM_MARGIN: f32 = 20.0 * MM;
const LINE_HEIGHT: f32 = 10.0 * MM;
const FONT_SIZE: f32 = 12.0;
// Courier advance width is 600/1000 em for every glyph
const CHAR_WIDTH: f32 = FONT_SIZE * 0.6;

/// Drop every character outside Latin-1 (above U+00FF)
pub fn sanitize_latin1(text: &str) -> String {
    text.chars().filter(|&c| u32::from(c) <= 0xFF).collect()
}

fn chars_per_line() -> usize {
    ((PAGE_WIDTH - 2.0 * MARGIN) / CHAR_WIDTH).floor() as usize
}

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT - MARGIN - BOTTOM_MARGIN) / LINE_HEIGHT).floor() as usize
}

/// Word-wrap one input line; an empty line yields one empty output line
///
/// Spacing inside a line is kept as is. A line breaks at the last space that
/// fits, and that space is consumed by the break. Words longer than `width`
/// are hard-broken.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = line.chars().collect();
    let mut out = Vec::new();
    let mut start = 0;

    while chars.len() - start > width {
        let window = &chars[start..=start + width];
        match window.iter().rposition(|&c| c == ' ') {
            Some(split) if split > 0 => {
                out.push(window[..split].iter().collect());
                start += split + 1;
            }
            _ => {
                out.push(window[..width].iter().collect());
                start += width;
            }
        }
    }

    out.push(chars[start..].iter().collect());
    out
}

/// Split sanitized text into pages of wrapped lines
///
/// Always yields at least one page.
fn layout(text: &str) -> Vec<Vec<String>> {
    let width = chars_per_line();
    let per_page = lines_per_page().max(1);

    let lines: Vec<String> = text
        .split('\n')
        .flat_map(|line| wrap_line(line, width))
        .collect();

    let mut pages: Vec<Vec<String>> = lines.chunks(per_page).map(<[String]>::to_vec).collect();
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    pages
}

fn winansi_bytes(line: &str) -> Vec<u8> {
    line.chars()
        .filter_map(|c| u8::try_from(u32::from(c)).ok())
        .collect()
}

fn page_content(lines: &[String]) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
    ];

    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        // Baseline sits mid-cell, nudged down by 0.3 em
        let top = MARGIN + i as f32 * LINE_HEIGHT;
        let baseline = PAGE_HEIGHT - (top + LINE_HEIGHT / 2.0 + 0.3 * FONT_SIZE);
        operations.push(Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                MARGIN.into(),
                baseline.into(),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(winansi_bytes(line))],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

fn build_document(pages: &[Vec<String>]) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

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

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let content = page_content(lines);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

/// Render `text` into a paginated PDF at `path`
///
/// Non-Latin-1 characters are removed, lines are wrapped to the page width
/// and pages break before the bottom margin. Returns the written path.
pub fn render_to_document(text: &str, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let clean = sanitize_latin1(text);
    let pages = layout(&clean);
    debug!("Laid out {} page(s)", pages.len());

    let mut doc = build_document(&pages)?;
    let mut writer = BufWriter::new(File::create(path)?);
    doc.save_to(&mut writer)?;
    writer.flush()?;

    info!("Wrote report to {}", path.display());
    Ok(path.to_path_buf())
}
