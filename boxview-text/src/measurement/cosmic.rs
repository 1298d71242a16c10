use cosmic_text::{fontdb, Attrs, Buffer, Family, FontSystem, Metrics};

use super::{TextBounds, TextMeasurementConfig};
use crate::types::FontStyle;

/// Build a font system that only knows the faces loaded into it explicitly.
/// System fonts are not scanned.
pub fn build_font_system() -> FontSystem {
    FontSystem::new_with_locale_and_db("en-US".to_string(), fontdb::Database::new())
}

pub fn measure_text_buffer(buffer: &Buffer, font_size: f32) -> TextBounds {
    let runs = buffer.layout_runs().collect::<Vec<_>>();

    if runs.is_empty() {
        return TextBounds::empty(font_size);
    }

    // Get metrics across all runs
    let mut max_ascent = 0.0;
    let mut max_descent = 0.0;
    let mut max_line_height = 0.0;

    for run in &runs {
        let ascent = run.line_y - run.line_top;
        let descent = run.line_height - ascent;

        max_ascent = f32::max(max_ascent, ascent);
        max_descent = f32::max(max_descent, descent);
        max_line_height = f32::max(max_line_height, run.line_height);
    }

    // Width runs from the text origin to the far edge of the last advance
    let mut max_x = f32::MIN;
    for run in runs {
        for glyph in run.glyphs {
            max_x = max_x.max(glyph.x + glyph.w);
        }
    }

    let width = if max_x == f32::MIN { 0.0 } else { max_x.max(0.0) };
    let height = max_ascent + max_descent;

    TextBounds {
        width,
        height,
        ascent: max_ascent,
        descent: max_descent,
        line_height: max_line_height,
    }
}

pub fn make_cosmic_text_buffer(
    config: &TextMeasurementConfig,
    font_system: &mut FontSystem,
) -> Buffer {
    let font = config.font;
    let attrs = Attrs::new()
        .family(Family::Name(&font.family))
        .weight(cosmic_text::Weight(font.weight))
        .style(to_cosmic_style(font.style));

    let metrics = Metrics::new(font.size, font.size);
    let mut buffer = Buffer::new(font_system, metrics);

    buffer.set_text(
        font_system,
        config.text,
        attrs,
        cosmic_text::Shaping::Advanced,
    );
    // Unbounded so a text write is always a single line
    buffer.set_size(font_system, None, None);
    buffer.shape_until_scroll(font_system, false);

    buffer
}

pub fn to_cosmic_style(style: FontStyle) -> cosmic_text::Style {
    match style {
        FontStyle::Normal => cosmic_text::Style::Normal,
        FontStyle::Italic => cosmic_text::Style::Italic,
        FontStyle::Oblique => cosmic_text::Style::Oblique,
    }
}

pub fn from_cosmic_style(style: cosmic_text::Style) -> FontStyle {
    match style {
        cosmic_text::Style::Normal => FontStyle::Normal,
        cosmic_text::Style::Italic => FontStyle::Italic,
        cosmic_text::Style::Oblique => FontStyle::Oblique,
    }
}
