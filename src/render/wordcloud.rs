//! Word cloud layout
//!
//! Tokens are sized by frequency and placed largest-first along an
//! Archimedean spiral from the canvas centre. A token that cannot be
//! placed shrinks until it fits or falls below the minimum font size, in
//! which case it is dropped.

use plotters::prelude::*;
use plotters::style::RGBColor;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

use crate::analysis::TokenCount;
use crate::core::constants::word_cloud;
use crate::core::error::{DashboardError, Result};
use crate::render::theme;

/// Approximate glyph advance as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;
/// Factor applied to the font size after a failed placement.
const SHRINK_FACTOR: f64 = 0.85;

/// A token positioned on the canvas, top-left anchored.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub color: RGBColor,
}

impl PlacedWord {
    fn bounds(&self) -> Rect {
        Rect::for_text(&self.text, self.x, self.y, self.font_size)
    }
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    fn for_text(text: &str, x: f64, y: f64, font_size: f64) -> Self {
        let (w, h) = text_extent(text, font_size);
        Self { x, y, w, h }
    }

    fn intersects(&self, other: &Rect) -> bool {
        let pad = word_cloud::PADDING;
        self.x < other.x + other.w + pad
            && other.x < self.x + self.w + pad
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    fn inside(&self, width: f64, height: f64) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x + self.w <= width && self.y + self.h <= height
    }
}

fn text_extent(text: &str, font_size: f64) -> (f64, f64) {
    let chars = text.chars().count().max(1) as f64;
    (chars * font_size * GLYPH_WIDTH_RATIO, font_size)
}

/// Lay out the most frequent tokens on a `width` x `height` canvas.
///
/// `tokens` must already be ordered most frequent first, as produced by
/// the frequency table. Blank tokens are skipped.
pub fn layout_words(tokens: &[TokenCount], width: u32, height: u32) -> Vec<PlacedWord> {
    let (width, height) = (width as f64, height as f64);
    let mut placed: Vec<PlacedWord> = Vec::new();

    let mut candidates = tokens
        .iter()
        .filter(|t| t.count > 0 && !t.token.trim().is_empty())
        .take(word_cloud::MAX_WORDS)
        .peekable();
    let Some(first) = candidates.peek() else {
        return placed;
    };

    let mut font_size = word_cloud::MAX_FONT_SIZE;
    let mut last_count = first.count as f64;

    for token in candidates {
        let count = token.count as f64;
        font_size = scaled_font_size(font_size, count, last_count);
        last_count = count;

        let mut size = font_size;
        while size >= word_cloud::MIN_FONT_SIZE {
            if let Some((x, y)) = find_position(&token.token, size, width, height, &placed) {
                placed.push(PlacedWord {
                    text: token.token.clone(),
                    x,
                    y,
                    font_size: size,
                    color: token_color(&token.token),
                });
                break;
            }
            size *= SHRINK_FACTOR;
        }
        // Later tokens start no larger than the last size that was tried.
        font_size = font_size.min(size.max(word_cloud::MIN_FONT_SIZE));
    }

    placed
}

/// Blend frequency ratio and rank: each token is sized relative to the
/// previous one, so equal counts keep equal sizes.
fn scaled_font_size(previous: f64, count: f64, previous_count: f64) -> f64 {
    let rs = word_cloud::RELATIVE_SCALING;
    let ratio = if previous_count > 0.0 { count / previous_count } else { 1.0 };
    (previous * (rs * ratio + (1.0 - rs))).max(word_cloud::MIN_FONT_SIZE)
}

fn find_position(
    text: &str,
    font_size: f64,
    width: f64,
    height: f64,
    placed: &[PlacedWord],
) -> Option<(f64, f64)> {
    let (w, h) = text_extent(text, font_size);
    if w > width || h > height {
        return None;
    }

    let (cx, cy) = (width / 2.0, height / 2.0);
    let max_radius = cx.hypot(cy);
    let mut theta: f64 = 0.0;

    loop {
        let radius = word_cloud::SPIRAL_STEP * theta;
        if radius > max_radius {
            return None;
        }

        // Stretch horizontally to follow the canvas aspect ratio.
        let x = cx + radius * theta.cos() * (width / height) - w / 2.0;
        let y = cy + radius * theta.sin() - h / 2.0;
        let candidate = Rect { x, y, w, h };

        if candidate.inside(width, height)
            && placed.iter().all(|p| !p.bounds().intersects(&candidate))
        {
            return Some((x, y));
        }

        theta += word_cloud::SPIRAL_ANGLE_STEP;
    }
}

/// Deterministic shade from the `Greens` ramp, avoiding the darkest end
/// which disappears on the black background.
fn token_color(token: &str) -> RGBColor {
    let mut hasher = FxHasher::default();
    token.hash(&mut hasher);
    let t = (hasher.finish() % 1000) as f64 / 1000.0;
    theme::greens(0.1 + t * 0.6)
}

/// Render the frequency table as a word cloud SVG on a black canvas.
pub fn render_word_cloud(tokens: &[TokenCount]) -> Result<String> {
    let words = layout_words(tokens, word_cloud::WIDTH, word_cloud::HEIGHT);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (word_cloud::WIDTH, word_cloud::HEIGHT))
            .into_drawing_area();
        root.fill(&theme::FIGURE_BACKGROUND)
            .map_err(|e| DashboardError::Chart(e.to_string()))?;

        for word in &words {
            let style = (theme::FONT_FAMILY, word.font_size)
                .into_font()
                .color(&word.color);
            root.draw(&Text::new(
                word.text.as_str(),
                (word.x.round() as i32, word.y.round() as i32),
                style,
            ))
            .map_err(|e| DashboardError::Chart(e.to_string()))?;
        }

        root.present()
            .map_err(|e| DashboardError::Chart(e.to_string()))?;
    }

    log::debug!("Word cloud placed {} of {} tokens", words.len(), tokens.len());
    Ok(svg)
}
