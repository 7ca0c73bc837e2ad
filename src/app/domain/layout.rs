use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Paper formats supported by the layout engine.
/// Each format has fixed physical dimensions in portrait orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageFormat {
    A4,
    A5,
    Letter,
}

impl PageFormat {
    /// Physical dimensions in portrait orientation, in millimeters.
    pub fn dimensions(&self) -> PaperSize {
        match self {
            Self::A4 => PaperSize { width_mm: 210.0, height_mm: 297.0 },
            Self::A5 => PaperSize { width_mm: 148.0, height_mm: 210.0 },
            Self::Letter => PaperSize { width_mm: 215.9, height_mm: 279.4 },
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::A5 => "A5",
            Self::Letter => "Letter",
        }
    }

    /// Get all available formats
    pub fn all() -> &'static [PageFormat] {
        &[Self::A4, Self::A5, Self::Letter]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Concrete physical page size derived from format + orientation.
/// Always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Fonts offered by the typography controls. `css_value` is the
/// font-family stack embedded in exported documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    Inter,
    Montserrat,
    Roboto,
    PlayfairDisplay,
    Merriweather,
    Lora,
    SystemMono,
}

impl FontFamily {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::Montserrat => "Montserrat",
            Self::Roboto => "Roboto",
            Self::PlayfairDisplay => "Playfair Display",
            Self::Merriweather => "Merriweather",
            Self::Lora => "Lora",
            Self::SystemMono => "System Mono",
        }
    }

    pub fn css_value(&self) -> &'static str {
        match self {
            Self::Inter => "'Inter', sans-serif",
            Self::Montserrat => "'Montserrat', sans-serif",
            Self::Roboto => "'Roboto', sans-serif",
            Self::PlayfairDisplay => "'Playfair Display', serif",
            Self::Merriweather => "'Merriweather', serif",
            Self::Lora => "'Lora', serif",
            Self::SystemMono => "monospace",
        }
    }

    /// Get all available fonts
    pub fn all() -> &'static [FontFamily] {
        &[
            Self::Inter,
            Self::Montserrat,
            Self::Roboto,
            Self::PlayfairDisplay,
            Self::Merriweather,
            Self::Lora,
            Self::SystemMono,
        ]
    }
}

/// Page margins in whole millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Margins {
    pub fn uniform(mm: u32) -> Self {
        Self { top: mm, bottom: mm, left: mm, right: mm }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// Anchor for the printed page-number label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl NumberPosition {
    pub fn all() -> &'static [NumberPosition] {
        &[
            Self::TopLeft,
            Self::TopCenter,
            Self::TopRight,
            Self::BottomLeft,
            Self::BottomCenter,
            Self::BottomRight,
        ]
    }
}

/// Print-time page numbering. Labels run from `start_page` upward, one per
/// physical page, and stop once a label would pass `end_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNumbering {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_start_page")]
    pub start_page: u32,

    #[serde(default)]
    pub end_page: Option<u32>,

    #[serde(default = "default_number_position")]
    pub position: NumberPosition,
}

fn default_start_page() -> u32 {
    1
}

fn default_number_position() -> NumberPosition {
    NumberPosition::BottomCenter
}

impl Default for PageNumbering {
    fn default() -> Self {
        Self {
            enabled: false,
            start_page: default_start_page(),
            end_page: None,
            position: default_number_position(),
        }
    }
}

impl PageNumbering {
    /// Label for the physical page at `page_index` (0-based), or `None`
    /// when numbering is disabled or the label would pass `end_page`.
    pub fn label_for_page(&self, page_index: u32) -> Option<u32> {
        if !self.enabled {
            return None;
        }
        let number = self.start_page + page_index;
        if let Some(end) = self.end_page {
            if number > end {
                return None;
            }
        }
        Some(number)
    }
}

/// Selector for the three configurable font sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSizeKind {
    Body,
    H1,
    H2,
}

/// Tolerant numeric parsing used by every raw-input setter: input that
/// fails to parse becomes the type's zero value instead of an error.
pub fn parse_or_zero<T: FromStr + Default>(raw: &str) -> T {
    raw.trim().parse().unwrap_or_default()
}

/// The complete set of page and typography parameters for a document.
///
/// Every setter consumes the current value and returns a new, fully
/// populated one with exactly that field replaced, so no intermediate
/// state is ever partially specified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSettings {
    #[serde(default = "default_format")]
    pub format: PageFormat,

    #[serde(default = "default_orientation")]
    pub orientation: Orientation,

    #[serde(default = "default_margins")]
    pub margins: Margins,

    #[serde(default = "default_line_height")]
    pub line_height: f64,

    /// Space below each paragraph, in pixels.
    #[serde(default = "default_paragraph_spacing")]
    pub paragraph_spacing: u32,

    #[serde(default = "default_font_family")]
    pub font_family: FontFamily,

    #[serde(default)]
    pub paragraph_border_width: u32,

    #[serde(default = "default_paragraph_border_color")]
    pub paragraph_border_color: String,

    #[serde(default)]
    pub paragraph_padding: u32,

    /// First-line indent in millimeters.
    #[serde(default)]
    pub first_line_indent: f64,

    #[serde(default = "default_font_size_body")]
    pub font_size_body: u32,

    #[serde(default = "default_font_size_h1")]
    pub font_size_h1: u32,

    #[serde(default = "default_font_size_h2")]
    pub font_size_h2: u32,

    #[serde(default)]
    pub page_numbering: PageNumbering,
}

fn default_format() -> PageFormat {
    PageFormat::A4
}

fn default_orientation() -> Orientation {
    Orientation::Portrait
}

fn default_margins() -> Margins {
    Margins::uniform(20)
}

fn default_line_height() -> f64 {
    1.15
}

fn default_paragraph_spacing() -> u32 {
    10
}

fn default_font_family() -> FontFamily {
    FontFamily::Inter
}

fn default_paragraph_border_color() -> String {
    "#e5e7eb".to_string()
}

fn default_font_size_body() -> u32 {
    11
}

fn default_font_size_h1() -> u32 {
    20
}

fn default_font_size_h2() -> u32 {
    16
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
            orientation: default_orientation(),
            margins: default_margins(),
            line_height: default_line_height(),
            paragraph_spacing: default_paragraph_spacing(),
            font_family: default_font_family(),
            paragraph_border_width: 0,
            paragraph_border_color: default_paragraph_border_color(),
            paragraph_padding: 0,
            first_line_indent: 0.0,
            font_size_body: default_font_size_body(),
            font_size_h1: default_font_size_h1(),
            font_size_h2: default_font_size_h2(),
            page_numbering: PageNumbering::default(),
        }
    }
}

impl PageSettings {
    /// Physical page size for the current format and orientation.
    /// Landscape swaps the portrait dimensions of the same format.
    pub fn paper_size(&self) -> PaperSize {
        let dims = self.format.dimensions();
        match self.orientation {
            Orientation::Portrait => dims,
            Orientation::Landscape => PaperSize {
                width_mm: dims.height_mm,
                height_mm: dims.width_mm,
            },
        }
    }

    /// Page-number labels for a document occupying `page_count` physical
    /// pages, in page order.
    pub fn page_labels(&self, page_count: u32) -> Vec<Option<u32>> {
        (0..page_count)
            .map(|i| self.page_numbering.label_for_page(i))
            .collect()
    }

    // --- Field setters ---

    pub fn with_format(mut self, format: PageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_margin(mut self, side: MarginSide, mm: u32) -> Self {
        match side {
            MarginSide::Top => self.margins.top = mm,
            MarginSide::Bottom => self.margins.bottom = mm,
            MarginSide::Left => self.margins.left = mm,
            MarginSide::Right => self.margins.right = mm,
        }
        self
    }

    pub fn with_margin_input(self, side: MarginSide, raw: &str) -> Self {
        self.with_margin(side, parse_or_zero(raw))
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_line_height_input(self, raw: &str) -> Self {
        self.with_line_height(parse_or_zero(raw))
    }

    pub fn with_paragraph_spacing(mut self, px: u32) -> Self {
        self.paragraph_spacing = px;
        self
    }

    pub fn with_paragraph_spacing_input(self, raw: &str) -> Self {
        self.with_paragraph_spacing(parse_or_zero(raw))
    }

    pub fn with_font_family(mut self, font: FontFamily) -> Self {
        self.font_family = font;
        self
    }

    pub fn with_first_line_indent(mut self, mm: f64) -> Self {
        self.first_line_indent = mm;
        self
    }

    pub fn with_first_line_indent_input(self, raw: &str) -> Self {
        self.with_first_line_indent(parse_or_zero(raw))
    }

    pub fn with_font_size(mut self, kind: FontSizeKind, pt: u32) -> Self {
        match kind {
            FontSizeKind::Body => self.font_size_body = pt,
            FontSizeKind::H1 => self.font_size_h1 = pt,
            FontSizeKind::H2 => self.font_size_h2 = pt,
        }
        self
    }

    pub fn with_font_size_input(self, kind: FontSizeKind, raw: &str) -> Self {
        self.with_font_size(kind, parse_or_zero(raw))
    }

    pub fn with_numbering_enabled(mut self, enabled: bool) -> Self {
        self.page_numbering.enabled = enabled;
        self
    }

    /// Start page is clamped to at least 1; a configured end below the new
    /// start is raised so the range never goes inconsistent.
    pub fn with_numbering_start(mut self, start_page: u32) -> Self {
        let start = start_page.max(1);
        self.page_numbering.start_page = start;
        if let Some(end) = self.page_numbering.end_page {
            self.page_numbering.end_page = Some(end.max(start));
        }
        self
    }

    /// An end below the current start is clamped up to the start.
    pub fn with_numbering_end(mut self, end_page: Option<u32>) -> Self {
        self.page_numbering.end_page =
            end_page.map(|end| end.max(self.page_numbering.start_page));
        self
    }

    pub fn with_numbering_position(mut self, position: NumberPosition) -> Self {
        self.page_numbering.position = position;
        self
    }
}
