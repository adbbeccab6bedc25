//! CSS color strings from the theme table mapped to terminal colors.

use ratatui::style::Color;

const NAMED: [(&str, (u8, u8, u8)); 14] = [
    ("navy", (0, 0, 128)),
    ("midnightblue", (25, 25, 112)),
    ("indianred", (205, 92, 92)),
    ("darkslategray", (47, 79, 79)),
    ("green", (0, 128, 0)),
    ("sienna", (160, 82, 45)),
    ("royalblue", (65, 105, 225)),
    ("teal", (0, 128, 128)),
    ("goldenrod", (218, 165, 32)),
    ("darkslateblue", (72, 61, 139)),
    ("olivedrab", (107, 142, 35)),
    ("white", (255, 255, 255)),
    ("black", (0, 0, 0)),
    ("gray", (128, 128, 128)),
];

/// Parses `#rrggbb`, `#rgb`, `rgb(..)`/`rgba(..)` (alpha ignored) and the
/// named colors the themes use.
pub fn parse_css_color(value: &str) -> Option<Color> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = value.strip_prefix("rgba(").or_else(|| value.strip_prefix("rgb(")) {
        let args = args.strip_suffix(')')?;
        let mut parts = args.split(',').map(str::trim);
        let r = parts.next()?.parse().ok()?;
        let g = parts.next()?.parse().ok()?;
        let b = parts.next()?.parse().ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    NAMED.iter().find(|(name, _)| *name == value).map(|(_, (r, g, b))| Color::Rgb(*r, *g, *b))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(Color::Rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}
