//! Fixed slide geometry.
//!
//! Positions and sizes are given in inches on a 16:9 slide (10in x 5.625in)
//! and converted to EMUs when the XML is written.

/// EMUs per inch
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Slide width in inches
pub const SLIDE_WIDTH_IN: f64 = 10.0;

/// Slide height in inches
pub const SLIDE_HEIGHT_IN: f64 = 5.625;

/// Convert inches to EMUs
pub fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Placement and font of one text box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub font_pt: u32,
    pub bold: bool,
    pub centered: bool,
}

/// Title slide heading
pub const TITLE_HEADING: TextBox = TextBox {
    x: 1.0,
    y: 1.0,
    w: 8.0,
    h: 2.0,
    font_pt: 44,
    bold: true,
    centered: true,
};

/// Title slide subtitle
pub const TITLE_SUBTITLE: TextBox = TextBox {
    x: 1.0,
    y: 3.0,
    w: 8.0,
    h: 1.0,
    font_pt: 24,
    bold: false,
    centered: true,
};

/// Body slide heading
pub const BODY_HEADING: TextBox = TextBox {
    x: 1.0,
    y: 0.5,
    w: 8.0,
    h: 1.0,
    font_pt: 32,
    bold: false,
    centered: false,
};

/// Body slide text
pub const BODY_TEXT: TextBox = TextBox {
    x: 1.0,
    y: 1.5,
    w: 8.0,
    h: 4.0,
    font_pt: 18,
    bold: false,
    centered: false,
};

/// Role of a slide, which picks its layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideRole {
    Title,
    Body,
}

impl SlideRole {
    /// Text boxes for the slide's heading and body, in that order
    pub fn boxes(self) -> (TextBox, TextBox) {
        match self {
            SlideRole::Title => (TITLE_HEADING, TITLE_SUBTITLE),
            SlideRole::Body => (BODY_HEADING, BODY_TEXT),
        }
    }
}

/// One slide to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSpec {
    pub role: SlideRole,
    pub heading: String,
    pub body: String,
}

impl SlideSpec {
    pub fn title(heading: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            role: SlideRole::Title,
            heading: heading.into(),
            body: subtitle.into(),
        }
    }

    pub fn body(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            role: SlideRole::Body,
            heading: heading.into(),
            body: body.into(),
        }
    }
}
