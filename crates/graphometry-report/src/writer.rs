// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conclusion writer: lay a `ReportData` record out as a PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Layout here is a single top-to-bottom flow with
// automatic page breaks.

use std::path::Path;

use chrono::{Local, NaiveDate};
use graphometry_core::error::{GraphometryError, Result};
use graphometry_core::types::PaperSize;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::data::ReportData;

const MARGIN_MM: f32 = 20.0;
const TITLE_SIZE_PT: f32 = 16.0;
const HEADING_SIZE_PT: f32 = 13.0;
const BODY_SIZE_PT: f32 = 11.0;
/// Baseline-to-baseline distance as a multiple of the font size.
const LEADING: f32 = 1.3;
/// Illustrations are placed at this resolution, then shrunk to fit.
const IMAGE_DPI: f32 = 150.0;
/// Tallest an illustration may be, as a share of the usable page height.
const IMAGE_MAX_HEIGHT_SHARE: f32 = 0.5;

/// Renders expert conclusions to PDF.
pub struct ReportWriter {
    paper_size: PaperSize,
    title: String,
    /// Date printed under the title; today when unset.
    date: Option<NaiveDate>,
}

impl ReportWriter {
    /// Create a writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: "Expert Conclusion".to_string(),
            date: None,
        }
    }

    /// Create a writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    // -- Rendering ------------------------------------------------------------

    /// Lay out the whole conclusion and serialise it.
    ///
    /// Order: title and date, sections 1-4, tables, illustrations, conclusion.
    /// Illustrations that cannot be read are skipped with a warning.
    #[instrument(skip_all, fields(paper = ?self.paper_size))]
    pub fn render(&self, data: &ReportData) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions();
        let mut layout = Layout::new(page_w, page_h)?;
        let mut doc = PdfDocument::new(&self.title);

        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        layout.line(&self.title, BuiltinFont::HelveticaBold, TITLE_SIZE_PT);
        layout.line(
            &format!("Date: {}", date.format("%d.%m.%Y")),
            BuiltinFont::Helvetica,
            BODY_SIZE_PT,
        );

        for (heading, body) in data.text_sections() {
            layout.heading(heading);
            layout.paragraph(body, BuiltinFont::Helvetica);
        }

        for table in data.tables.iter().filter(|t| !t.is_empty()) {
            layout.skip(BODY_SIZE_PT);
            layout.table(table);
        }

        if !data.images.is_empty() {
            layout.heading("5. Illustrations");
            for path in &data.images {
                match load_illustration(path) {
                    Ok(raw) => {
                        let transform = layout.reserve_image(raw.width, raw.height);
                        let id = doc.add_image(&raw);
                        layout.push(Op::UseXobject { id, transform });
                    }
                    Err(reason) => {
                        warn!(path = %path.display(), %reason, "Illustration skipped");
                    }
                }
            }
        }

        if let Some(conclusion) = data.conclusion_text() {
            layout.heading("6. Conclusion");
            layout.paragraph(conclusion, BuiltinFont::HelveticaBold);
        }

        let pages = layout.finish();
        let page_count = pages.len();
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        debug!(
            pages = page_count,
            warnings = warnings.len(),
            bytes = output.len(),
            "Conclusion rendered"
        );
        Ok(output)
    }

    // -- File output convenience ----------------------------------------------

    /// Render and write the conclusion to `path`.
    pub fn write_to_file(&self, data: &ReportData, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render(data)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote conclusion PDF to {}", path.as_ref().display());
        Ok(())
    }
}

/// Decode an illustration into printpdf's RGB8 raw form.
fn load_illustration(path: &Path) -> std::result::Result<RawImage, String> {
    let dynamic_image = ::image::open(path).map_err(|err| err.to_string())?;
    let (width, height) = (dynamic_image.width() as usize, dynamic_image.height() as usize);
    Ok(RawImage {
        pixels: RawImageData::U8(dynamic_image.to_rgb8().into_raw()),
        width,
        height,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    })
}

// -- Flow layout --------------------------------------------------------------

/// Top-to-bottom flow of lines and images over as many pages as needed.
struct Layout {
    page_w: Mm,
    page_h: Mm,
    margin_pt: f32,
    usable_w_pt: f32,
    usable_h_pt: f32,
    /// Distance of the next free line from the bottom edge.
    cursor_pt: f32,
    ops: Vec<Op>,
    pages: Vec<PdfPage>,
}

impl Layout {
    fn new(page_w: Mm, page_h: Mm) -> Result<Self> {
        let margin_pt = Mm(MARGIN_MM).into_pt().0;
        let usable_w_pt = page_w.into_pt().0 - 2.0 * margin_pt;
        let usable_h_pt = page_h.into_pt().0 - 2.0 * margin_pt;
        // A page must hold at least a title line and a few characters of text.
        if usable_w_pt < 10.0 * BODY_SIZE_PT || usable_h_pt < 2.0 * TITLE_SIZE_PT * LEADING {
            return Err(GraphometryError::Report(format!(
                "paper {:.0}x{:.0} mm leaves no room inside {MARGIN_MM} mm margins",
                page_w.0, page_h.0
            )));
        }
        Ok(Self {
            page_w,
            page_h,
            margin_pt,
            usable_w_pt,
            usable_h_pt,
            cursor_pt: margin_pt + usable_h_pt,
            ops: Vec::new(),
            pages: Vec::new(),
        })
    }

    /// Start a new page if fewer than `height_pt` points remain.
    fn ensure(&mut self, height_pt: f32) {
        if self.cursor_pt - height_pt < self.margin_pt && !self.ops.is_empty() {
            self.break_page();
        }
    }

    fn break_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(PdfPage::new(self.page_w, self.page_h, ops));
        self.cursor_pt = self.margin_pt + self.usable_h_pt;
    }

    fn skip(&mut self, height_pt: f32) {
        self.cursor_pt -= height_pt;
    }

    fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Characters that fit in `width_pt` at `size_pt`, by average Helvetica
    /// glyph width (about half the font size).
    fn chars_fitting(width_pt: f32, size_pt: f32) -> usize {
        ((width_pt / (0.5 * size_pt)) as usize).max(1)
    }

    fn text_at(&mut self, x_pt: f32, baseline_pt: f32, text: &str, font: BuiltinFont, size: f32) {
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point {
                x: Pt(x_pt),
                y: Pt(baseline_pt),
            },
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(size),
            font: font.clone(),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font,
        });
        self.ops.push(Op::EndTextSection);
    }

    /// One unwrapped line at the left margin.
    fn line(&mut self, text: &str, font: BuiltinFont, size: f32) {
        let leading = size * LEADING;
        self.ensure(leading);
        let baseline = self.cursor_pt - size;
        self.text_at(self.margin_pt, baseline, text, font, size);
        self.cursor_pt -= leading;
    }

    fn heading(&mut self, text: &str) {
        self.skip(BODY_SIZE_PT * 0.5);
        // Keep a heading on the same page as the first line under it.
        self.ensure(HEADING_SIZE_PT * LEADING + BODY_SIZE_PT * LEADING);
        self.line(text, BuiltinFont::HelveticaBold, HEADING_SIZE_PT);
    }

    fn paragraph(&mut self, text: &str, font: BuiltinFont) {
        let width = Self::chars_fitting(self.usable_w_pt, BODY_SIZE_PT);
        for line in wrap_text(text, width) {
            self.line(&line, font.clone(), BODY_SIZE_PT);
        }
    }

    /// Equal-width columns, header row in bold. Cells too long for their
    /// column are cut short.
    fn table(&mut self, rows: &[Vec<String>]) {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let column_w = self.usable_w_pt / columns as f32;
        let cell_chars = Self::chars_fitting(column_w, BODY_SIZE_PT).saturating_sub(1).max(1);
        let leading = BODY_SIZE_PT * LEADING;

        for (idx, row) in rows.iter().enumerate() {
            let font = if idx == 0 {
                BuiltinFont::HelveticaBold
            } else {
                BuiltinFont::Helvetica
            };
            self.ensure(leading);
            let baseline = self.cursor_pt - BODY_SIZE_PT;
            for (col, cell) in row.iter().enumerate() {
                let text: String = cell.chars().take(cell_chars).collect();
                let x = self.margin_pt + col as f32 * column_w;
                self.text_at(x, baseline, &text, font.clone(), BODY_SIZE_PT);
            }
            self.cursor_pt -= leading;
        }
    }

    /// Claim room for an image below the cursor and return its placement.
    ///
    /// The image is shrunk to the usable width and to a share of the usable
    /// height, never enlarged.
    fn reserve_image(&mut self, width_px: usize, height_px: usize) -> XObjectTransform {
        let img_w_pt = width_px.max(1) as f32 / IMAGE_DPI * 72.0;
        let img_h_pt = height_px.max(1) as f32 / IMAGE_DPI * 72.0;
        let max_h_pt = self.usable_h_pt * IMAGE_MAX_HEIGHT_SHARE;
        let scale = (self.usable_w_pt / img_w_pt)
            .min(max_h_pt / img_h_pt)
            .min(1.0);
        let rendered_h_pt = img_h_pt * scale;

        self.ensure(rendered_h_pt);
        let bottom = self.cursor_pt - rendered_h_pt;
        self.cursor_pt = bottom - BODY_SIZE_PT * LEADING;

        XObjectTransform {
            translate_x: Some(Pt(self.margin_pt)),
            translate_y: Some(Pt(bottom)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(IMAGE_DPI),
            rotate: None,
        }
    }

    fn finish(mut self) -> Vec<PdfPage> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

// -- Text wrapping helper -----------------------------------------------------

/// Wrap a multi-line string so that no line exceeds `max_width` characters.
///
/// Splits on existing newlines first, then performs simple word-wrap within each
/// paragraph. Words longer than `max_width` are force-broken. Widths count
/// characters, not bytes.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_len = 0usize;

        for word in words {
            let word_len = word.chars().count();
            if word_len > max_width {
                // Flush any accumulated line.
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                // Force-break the oversized word.
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_width).peekable();
                while let Some(chunk) = chunks.next() {
                    let piece: String = chunk.iter().collect();
                    if chunks.peek().is_some() {
                        result.push(piece);
                    } else {
                        current_len = chunk.len();
                        current_line = piece;
                    }
                }
            } else if current_line.is_empty() {
                current_line.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_len += 1 + word_len;
            } else {
                result.push(std::mem::take(&mut current_line));
                current_line.push_str(word);
                current_len = word_len;
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    result
}
