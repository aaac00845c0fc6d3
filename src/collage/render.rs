//! Collage rendering.
//!
//! Two outputs are supported: plain text for the terminal and an SVG card
//! for export. Both lay out each line's fragments left to right and close the
//! line with a punctuation glyph, `，` for every line except the last, which
//! gets `。`.

use super::{char_len, CollagePoem, Fragment, Line, PoemVariant};
use crate::constants::{COLLAGE_FOOTER, FINAL_LINE_GLYPH, LINE_BREAK_GLYPH};
use std::fmt::Write as _;

const CARD_WIDTH: f32 = 600.0;
const CARD_HEIGHT: f32 = 800.0;
const CARD_BORDER: f32 = 24.0;
const GLYPH_WIDTH: f32 = 18.0;
const BOX_PADDING: f32 = 10.0;
const BOX_GAP: f32 = 10.0;
const LINE_HEIGHT: f32 = 44.0;

/// Lines of `variant` that are actually displayed.
///
/// Four- and eight-line variants are truncated to their nominal size, the
/// image-only variant shows no text and a manual layout shows every line.
pub fn visible_lines(poem: &CollagePoem, variant: PoemVariant) -> &[Line] {
    let lines = poem.layout(variant).map(|l| l.lines()).unwrap_or(&[]);
    match variant.max_lines() {
        Some(max) => &lines[..lines.len().min(max)],
        None => lines,
    }
}

fn line_glyph(index: usize, total: usize) -> &'static str {
    if index + 1 == total {
        FINAL_LINE_GLYPH
    } else {
        LINE_BREAK_GLYPH
    }
}

/// Renders the collage as terminal text.
pub fn render_text(poem: &CollagePoem, variant: PoemVariant) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  ·  {}  [{}]", poem.date, poem.title, variant);
    out.push('\n');

    let lines = visible_lines(poem, variant);
    for (index, line) in lines.iter().enumerate() {
        let texts: Vec<&str> = line.texts().collect();
        let _ = writeln!(
            out,
            "  {}{}",
            texts.join(" "),
            line_glyph(index, lines.len())
        );
    }

    if variant.shows_image() {
        if !lines.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "  [image] {}", describe_image(&poem.image));
    }

    out.push('\n');
    let _ = writeln!(out, "{}", COLLAGE_FOOTER);
    out
}

/// Data URIs are too long to print; show their media type only.
fn describe_image(image: &str) -> String {
    match image.strip_prefix("data:") {
        Some(rest) => {
            let media = rest.split(';').next().unwrap_or("image");
            format!("<inline {}>", media)
        }
        None => image.to_string(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn box_width(text: &str) -> f32 {
    char_len(text) as f32 * GLYPH_WIDTH + 2.0 * BOX_PADDING
}

fn write_fragment(svg: &mut String, fragment: &Fragment, x: f32, y: f32, font: &str) {
    let width = box_width(&fragment.text);
    let height = GLYPH_WIDTH + 2.0 * BOX_PADDING;
    let cx = x + width / 2.0;
    let cy = y + height / 2.0;
    let _ = writeln!(
        svg,
        r#"  <g transform="rotate({:.2} {:.1} {:.1})">"#,
        fragment.style.rotation, cx, cy
    );
    let _ = writeln!(
        svg,
        r#"    <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="rgba(0,0,0,0.04)"/>"#,
        x,
        y,
        width,
        height,
        escape_xml(&fragment.style.background_color)
    );
    let _ = writeln!(
        svg,
        r#"    <text x="{:.1}" y="{:.1}" fill="{}" font-family="{}" font-weight="700" font-size="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
        cx,
        cy,
        escape_xml(&fragment.style.text_color),
        escape_xml(font),
        GLYPH_WIDTH,
        escape_xml(&fragment.text)
    );
    let _ = writeln!(svg, "  </g>");
}

/// Renders the collage as a 3:4 SVG card.
pub fn render_svg(poem: &CollagePoem, variant: PoemVariant) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = CARD_WIDTH,
        h = CARD_HEIGHT
    );
    let _ = writeln!(
        svg,
        r##"  <rect width="{}" height="{}" fill="#ffffff"/>"##,
        CARD_WIDTH, CARD_HEIGHT
    );
    let _ = writeln!(
        svg,
        r##"  <rect x="{b}" y="{b}" width="{}" height="{}" fill="#f8f5f0"/>"##,
        CARD_WIDTH - 2.0 * CARD_BORDER,
        CARD_HEIGHT - 2.0 * CARD_BORDER,
        b = CARD_BORDER
    );
    let _ = writeln!(
        svg,
        r##"  <text x="{:.1}" y="{:.1}" font-size="14" font-weight="900" fill="#000000">{}</text>"##,
        CARD_BORDER + 12.0,
        CARD_BORDER + 24.0,
        poem.date.format("%d")
    );

    let lines = visible_lines(poem, variant);
    let text_area = if variant == PoemVariant::FourLines {
        CARD_HEIGHT / 2.0
    } else {
        CARD_HEIGHT
    };
    let block_height = lines.len() as f32 * LINE_HEIGHT;
    let mut y = ((text_area - block_height) / 2.0).max(CARD_BORDER + 40.0);

    for (index, line) in lines.iter().enumerate() {
        let glyph = line_glyph(index, lines.len());
        let line_width: f32 = line
            .fragments()
            .iter()
            .map(|f| box_width(&f.text) + BOX_GAP)
            .sum::<f32>()
            + box_width(glyph);
        let mut x = ((CARD_WIDTH - line_width) / 2.0).max(CARD_BORDER);

        for fragment in line.fragments() {
            write_fragment(&mut svg, fragment, x, y, &poem.font_family);
            x += box_width(&fragment.text) + BOX_GAP;
        }
        let _ = writeln!(
            svg,
            r##"  <text x="{:.1}" y="{:.1}" fill="#9ca3af" font-size="{}" dominant-baseline="central">{}</text>"##,
            x + BOX_PADDING,
            y + GLYPH_WIDTH / 2.0 + BOX_PADDING,
            GLYPH_WIDTH,
            glyph
        );
        y += LINE_HEIGHT;
    }

    if variant.shows_image() {
        let top = if variant == PoemVariant::ImageOnly {
            CARD_BORDER + 40.0
        } else {
            CARD_HEIGHT / 2.0
        };
        let _ = writeln!(
            svg,
            r#"  <image href="{}" x="{b:.1}" y="{:.1}" width="{:.1}" height="{:.1}" preserveAspectRatio="xMidYMid slice"/>"#,
            escape_xml(&poem.image),
            top,
            CARD_WIDTH - 2.0 * (CARD_BORDER + 20.0),
            CARD_HEIGHT - top - CARD_BORDER - 60.0,
            b = CARD_BORDER + 20.0
        );
    }

    let _ = writeln!(
        svg,
        r##"  <text x="{:.1}" y="{:.1}" font-size="10" fill="#000000" fill-opacity="0.3">{} · {}</text>"##,
        CARD_BORDER + 12.0,
        CARD_HEIGHT - CARD_BORDER - 16.0,
        escape_xml(&poem.title),
        poem.date
    );
    let _ = writeln!(
        svg,
        r##"  <text x="{:.1}" y="{:.1}" font-size="10" fill="#000000" fill-opacity="0.3" text-anchor="end">{}</text>"##,
        CARD_WIDTH - CARD_BORDER - 12.0,
        CARD_HEIGHT - CARD_BORDER - 16.0,
        COLLAGE_FOOTER
    );
    svg.push_str("</svg>\n");
    svg
}
