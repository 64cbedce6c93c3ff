//! Dark figure palette
//!
//! Every figure shares the same look: black figure background, green
//! marks and white axis text. Word clouds draw from the `Greens` ramp.

use plotters::style::RGBColor;

/// Figure background around the plot area
pub const FIGURE_BACKGROUND: RGBColor = RGBColor(0, 0, 0);
/// Plot area background
pub const PLOT_BACKGROUND: RGBColor = RGBColor(255, 255, 255);
/// Bars, lines, points and histogram bins
pub const MARK: RGBColor = RGBColor(0, 128, 0);
/// Captions, axis descriptions, tick labels and axis lines
pub const TEXT: RGBColor = RGBColor(255, 255, 255);

/// Font family used for every label
pub const FONT_FAMILY: &str = "sans-serif";
pub const CAPTION_SIZE: u32 = 20;
pub const AXIS_DESC_SIZE: u32 = 15;
pub const TICK_LABEL_SIZE: u32 = 12;

/// Stops of the `Greens` color ramp, light to dark.
const GREENS: [(f64, RGBColor); 5] = [
    (0.0, RGBColor(247, 252, 245)),
    (0.25, RGBColor(199, 233, 192)),
    (0.5, RGBColor(116, 196, 118)),
    (0.75, RGBColor(35, 139, 69)),
    (1.0, RGBColor(0, 68, 27)),
];

/// Interpolate the `Greens` ramp at `t` in `[0, 1]`.
pub fn greens(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

    for pair in GREENS.windows(2) {
        let (lo_t, lo) = pair[0];
        let (hi_t, hi) = pair[1];
        if t <= hi_t {
            let f = (t - lo_t) / (hi_t - lo_t);
            return RGBColor(lerp(lo.0, hi.0, f), lerp(lo.1, hi.1, f), lerp(lo.2, hi.2, f));
        }
    }

    GREENS[GREENS.len() - 1].1
}

fn lerp(a: u8, b: u8, f: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * f).round() as u8
}
