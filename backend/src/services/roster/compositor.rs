//! # Roster image compositor
//!
//! Draws today's registrants onto the roster template, 23 per page.
//!
//! ## Layout
//!
//! The template has a date box and a ruled table. The date is written once,
//! in bold, on the template itself, and every page starts from a clone of
//! the stamped template. Each table row gets three texts on the same
//! baseline: the running sequence number (continuous across pages), the
//! display name and the debt status.
//!
//! Pages are independent, so they are rendered in parallel with `rayon`;
//! the returned vector keeps page order.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use chrono::NaiveDate;
use common::model::roster::RegistrationEntry;
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use log::{debug, warn};
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use rayon::prelude::*;

use crate::error::{OrderError, OrderResult};
use crate::services::sheets::grid::DATE_FORMAT;

/// Registrants per rendered page.
pub const PAGE_SIZE: usize = 23;
pub const FONT_SIZE: f32 = 40.0;

const FALLBACK_FAMILY: &str = "LiberationSans";
const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

const DATE_X: i32 = 895;
const DATE_Y: i32 = 317;
const FIRST_ROW_Y: i32 = 535;
const ROW_STEP: i32 = 59;
const SEQUENCE_X: i32 = 252;
/// Two-digit sequence numbers start further left to stay centred.
const SEQUENCE_X_WIDE: i32 = 240;
const NAME_X: i32 = 390;
const STATUS_X: i32 = 1140;

/// Regular and bold faces of the roster font.
pub struct Fonts {
    regular: FontVec,
    bold: FontVec,
}

impl Fonts {
    /// Parses both faces from TrueType/OpenType bytes.
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>) -> OrderResult<Self> {
        Ok(Self {
            regular: parse_font(regular)?,
            bold: parse_font(bold)?,
        })
    }
}

fn parse_font(bytes: Vec<u8>) -> OrderResult<FontVec> {
    FontVec::try_from_vec(bytes).map_err(|e| OrderError::Font(e.to_string()))
}

/// Where the roster font lives: `{dir}/{family}-Regular.ttf` and
/// `{dir}/{family}-Bold.ttf`.
#[derive(Debug, Clone)]
pub struct FontSource {
    pub dir: PathBuf,
    pub family: String,
}

impl FontSource {
    pub fn new(dir: impl Into<PathBuf>, family: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            family: family.into(),
        }
    }

    /// Loads the configured family, falling back to LiberationSans.
    pub fn load(&self) -> OrderResult<Fonts> {
        match load_family(&self.dir, &self.family) {
            Ok(fonts) => Ok(fonts),
            Err(e) => {
                warn!("Font family {} unavailable ({}), trying {}", self.family, e, FALLBACK_FAMILY);
                load_family(&self.dir, FALLBACK_FAMILY)
            }
        }
    }
}

fn load_family(dir: &Path, family: &str) -> OrderResult<Fonts> {
    let read = |style: &str| {
        let path = dir.join(format!("{family}-{style}.ttf"));
        fs::read(&path).map_err(|e| OrderError::Font(format!("{}: {}", path.display(), e)))
    };
    Fonts::from_bytes(read("Regular")?, read("Bold")?)
}

/// A slice of the roster drawn on one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// 1-based page number.
    pub number: usize,
    /// Sequence number of the first entry, 1-based and continuous across pages.
    pub first_sequence: usize,
    pub entries: &'a [RegistrationEntry],
}

/// An encoded page waiting to be published.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub image_bytes: Vec<u8>,
    pub sequence_label: String,
}

/// A piece of text positioned on the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Splits `entries` into pages of at most [`PAGE_SIZE`], keeping order.
///
/// Sequence numbers continue across pages: the second page starts at 24.
pub fn paginate(entries: &[RegistrationEntry]) -> Vec<Page<'_>> {
    entries
        .chunks(PAGE_SIZE)
        .enumerate()
        .map(|(index, chunk)| Page {
            number: index + 1,
            first_sequence: index * PAGE_SIZE + 1,
            entries: chunk,
        })
        .collect()
}

/// Positions of every text drawn for `page`.
pub fn layout(page: &Page<'_>) -> Vec<TextItem> {
    let mut items = Vec::with_capacity(page.entries.len() * 3);
    let mut y = FIRST_ROW_Y;
    for (offset, entry) in page.entries.iter().enumerate() {
        let sequence = page.first_sequence + offset;
        let sequence_x = if sequence < 10 { SEQUENCE_X } else { SEQUENCE_X_WIDE };
        items.push(TextItem {
            text: sequence.to_string(),
            x: sequence_x,
            y,
        });
        items.push(TextItem {
            text: entry.display_name.clone(),
            x: NAME_X,
            y,
        });
        if !entry.status_label.is_empty() {
            items.push(TextItem {
                text: entry.status_label.clone(),
                x: STATUS_X,
                y,
            });
        }
        y += ROW_STEP;
    }
    items
}

/// Writes `date` in bold into the template's date box.
pub fn stamp_date(base: &mut RgbaImage, date: NaiveDate, fonts: &Fonts) {
    let text = date.format(DATE_FORMAT).to_string();
    draw_text_mut(base, TEXT_COLOR, DATE_X, DATE_Y, PxScale::from(FONT_SIZE), &fonts.bold, &text);
}

/// Draws one page on a clone of `base` and encodes it as PNG.
///
/// # Arguments
/// * `base` - The template, already stamped with the date.
/// * `page` - Entries of this page and their starting sequence number.
/// * `fonts` - The roster font; rows use the regular face.
///
/// # Returns
/// The encoded page labelled `Page {n}`, or an error if PNG encoding fails.
pub fn render_page(base: &RgbaImage, page: &Page<'_>, fonts: &Fonts) -> OrderResult<RenderedPage> {
    let mut image = base.clone();
    let scale = PxScale::from(FONT_SIZE);
    for item in layout(page) {
        draw_text_mut(&mut image, TEXT_COLOR, item.x, item.y, scale, &fonts.regular, &item.text);
    }
    let image_bytes = encode_png(&image)?;
    debug!("Rendered page {} ({} bytes)", page.number, image_bytes.len());
    Ok(RenderedPage {
        image_bytes,
        sequence_label: format!("Page {}", page.number),
    })
}

/// Renders every page of `entries` on clones of the stamped `base`.
pub fn render_pages(
    base: &RgbaImage,
    entries: &[RegistrationEntry],
    fonts: &Fonts,
) -> OrderResult<Vec<RenderedPage>> {
    paginate(entries)
        .par_iter()
        .map(|page| render_page(base, page, fonts))
        .collect()
}

/// Encodes `image` as an 8-bit RGBA PNG.
pub fn encode_png(image: &RgbaImage) -> OrderResult<Vec<u8>> {
    let (w, h) = image.dimensions();
    let mut bytes = Vec::new();
    {
        let mut encoder = PngEncoder::new(&mut bytes, w, h);
        encoder.set_color(PngColorType::Rgba);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.as_raw())?;
    }
    Ok(bytes)
}
