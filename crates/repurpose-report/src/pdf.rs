//! PDF rendering of a [`RepurposingReport`] with lopdf.
//!
//! Layout is computed first as plain positioned text lines, then encoded as
//! one content stream per A4 page using the standard Helvetica fonts.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use repurpose_common::config::ReportConfig;
use repurpose_common::error::{RepurposeError, Result};
use tracing::debug;

use crate::engine::RepurposingReport;
use crate::sanitize::{sanitize, to_latin1};

// A4 in points
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 42;

const TITLE_SIZE: i64 = 16;
const HEADING_SIZE: i64 = 12;
const BODY_SIZE: i64 = 11;

const TITLE_LEADING: i64 = 28;
const HEADING_LEADING: i64 = 22;
const BODY_LEADING: i64 = 20;
const PARAGRAPH_GAP: i64 = 11;

const TRUNCATION_MARKER: &str = "\n...[truncated for PDF]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

impl Face {
    fn resource_name(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold    => "F2",
        }
    }
}

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub face: Face,
    pub size: i64,
    pub x: i64,
    pub y: i64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub max_section_chars: usize,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for PdfOptions {
    fn from(cfg: &ReportConfig) -> Self {
        Self { max_section_chars: cfg.max_section_chars }
    }
}

/// Rough Helvetica advance width; good enough for wrapping and centring.
fn estimated_width(text: &str, size: i64) -> i64 {
    (text.chars().count() as i64 * size * 11) / 20
}

fn chars_per_line(size: i64) -> usize {
    let usable = PAGE_WIDTH - 2 * MARGIN;
    ((usable * 20) / (size * 11)).max(1) as usize
}

/// Greedy word wrap; words longer than a line are split.
pub fn wrap_line(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Cap a section body at `max_chars` characters.
pub fn truncate_section(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

struct PageWriter {
    pages: Vec<Vec<TextLine>>,
    y: i64,
}

impl PageWriter {
    fn new() -> Self {
        Self { pages: vec![Vec::new()], y: PAGE_HEIGHT - MARGIN }
    }

    fn ensure_space(&mut self, leading: i64) {
        if self.y - leading < MARGIN {
            self.pages.push(Vec::new());
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn line(&mut self, face: Face, size: i64, leading: i64, x: i64, text: String) {
        self.ensure_space(leading);
        self.y -= leading;
        let y = self.y;
        if let Some(page) = self.pages.last_mut() {
            page.push(TextLine { face, size, x, y, text });
        }
    }

    fn gap(&mut self, height: i64) {
        self.y -= height;
    }

    fn section(&mut self, title: &str, content: &str, max_chars: usize) {
        self.line(Face::Bold, HEADING_SIZE, HEADING_LEADING, MARGIN, sanitize(title));

        let safe = truncate_section(&sanitize(content), max_chars);
        let width = chars_per_line(BODY_SIZE);
        for raw in safe.split('\n') {
            let line = raw.trim();
            if line.is_empty() {
                self.gap(PARAGRAPH_GAP);
                continue;
            }
            for wrapped in wrap_line(line, width) {
                self.line(Face::Regular, BODY_SIZE, BODY_LEADING, MARGIN, wrapped);
            }
        }
        self.gap(PARAGRAPH_GAP);
    }
}

/// Lay out the report as pages of positioned lines.
pub fn layout_report(report: &RepurposingReport, generated_on: &str, opts: &PdfOptions) -> Vec<Vec<TextLine>> {
    let mut w = PageWriter::new();

    let title = sanitize(&format!("Drug Repurposing Report - {}", report.drug));
    let title_x = ((PAGE_WIDTH - estimated_width(&title, TITLE_SIZE)) / 2).max(MARGIN);
    w.line(Face::Bold, TITLE_SIZE, TITLE_LEADING, title_x, title);
    w.gap(PARAGRAPH_GAP);

    w.line(Face::Regular, BODY_SIZE, BODY_LEADING, MARGIN, sanitize(&format!("Generated on: {}", generated_on)));
    w.gap(PARAGRAPH_GAP);

    let sections = [
        ("Repurposing Score",                 &report.score),
        ("1) Clinical Rationale & Trials",    &report.clinical_summary),
        ("2) Patent & Regulatory Landscape",  &report.patent_summary),
        ("3) Market Opportunity Assessment",  &report.market_summary),
        ("4) Final Recommendation",           &report.final_recommendation),
    ];
    for (title, content) in sections {
        w.section(title, content, opts.max_section_chars);
    }

    w.pages
}

fn encode_page(lines: &[TextLine]) -> Result<Vec<u8>> {
    let mut operations = Vec::with_capacity(lines.len() * 5);
    for l in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![
            Object::Name(l.face.resource_name().as_bytes().to_vec()),
            Object::Integer(l.size),
        ]));
        operations.push(Operation::new("Td", vec![Object::Integer(l.x), Object::Integer(l.y)]));
        operations.push(Operation::new("Tj", vec![Object::string_literal(to_latin1(&l.text))]));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
        .encode()
        .map_err(|e| RepurposeError::Pdf(e.to_string()))
}

fn type1_font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Render the report as PDF bytes, stamped with the current local time.
pub fn build_pdf_from_report(report: &RepurposingReport, opts: &PdfOptions) -> Result<Vec<u8>> {
    let generated_on = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    render_pdf(&layout_report(report, &generated_on, opts))
}

/// Encode laid-out pages into a PDF document.
pub fn render_pdf(pages: &[Vec<TextLine>]) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(type1_font("Helvetica"));
    let bold_id = doc.add_object(type1_font("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, encode_page(lines)?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(pages_id, Object::Dictionary(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    }));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf).map_err(|e| RepurposeError::Pdf(e.to_string()))?;
    debug!(pages = count, bytes = buf.len(), "PDF rendered");
    Ok(buf)
}
