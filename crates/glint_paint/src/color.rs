//! Colors
//!
//! Effects take colors as CSS strings. [`Color::parse`] accepts the forms a
//! canvas `strokeStyle` commonly sees: hex, `rgb()`, `rgba()` and the basic
//! named colors.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map_opt},
    error::ParseError as NomParseError,
    number::complete::float,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const CYAN: Color = Color {
        r: 0.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse a CSS color: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` or a basic color keyword
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let parsed = all_consuming(alt((
            hex_color::<nom::error::Error<&str>>,
            rgba_color,
            rgb_color,
        )))(text);

        match parsed {
            Ok((_, color)) => Some(color),
            Err(_) => named_color(text),
        }
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

/// Whitespace around a parser
fn ws<'a, O, E: NomParseError<&'a str>>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O, E>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O, E> {
    delimited(multispace0, inner, multispace0)
}

/// `#RGB`, `#RRGGBB` or `#RRGGBBAA`
fn hex_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Color, E> {
    map_opt(
        preceded(char('#'), take_while1(|c: char| c.is_ascii_hexdigit())),
        |digits: &str| {
            let value = u32::from_str_radix(digits, 16).ok()?;
            let byte = |shift: u32| (value >> shift) as u8;
            let nibble = |shift: u32| ((value >> shift) & 0xF) as u8 * 0x11;
            match digits.len() {
                3 => Some(Color::from_rgba8(nibble(8), nibble(4), nibble(0), 255)),
                6 => Some(Color::from_rgba8(byte(16), byte(8), byte(0), 255)),
                8 => Some(Color::from_rgba8(byte(24), byte(16), byte(8), byte(0))),
                _ => None,
            }
        },
    )(input)
}

/// Channel in 0-255, clamped
fn channel<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, f32, E> {
    let (input, value) = ws(float)(input)?;
    Ok((input, value.clamp(0.0, 255.0) / 255.0))
}

/// `rgba(r, g, b, a)` with channels in 0-255 and alpha in 0-1
fn rgba_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Color, E> {
    let (input, _) = tag_no_case("rgba")(input)?;
    let (input, (r, g, b, a)) = delimited(
        ws(char('(')),
        tuple((
            terminated(channel, char(',')),
            terminated(channel, char(',')),
            terminated(channel, char(',')),
            ws(float),
        )),
        char(')'),
    )(input)?;

    Ok((
        input,
        Color {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        },
    ))
}

/// `rgb(r, g, b)` with channels in 0-255
fn rgb_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Color, E> {
    let (input, _) = tag_no_case("rgb")(input)?;
    let (input, (r, g, b)) = delimited(
        ws(char('(')),
        tuple((
            terminated(channel, char(',')),
            terminated(channel, char(',')),
            channel,
        )),
        char(')'),
    )(input)?;

    Ok((input, Color { r, g, b, a: 1.0 }))
}

/// Basic CSS color keywords
fn named_color(name: &str) -> Option<Color> {
    let [r, g, b, a] = match name.to_ascii_lowercase().as_str() {
        "black" => [0, 0, 0, 255],
        "white" => [255, 255, 255, 255],
        "red" => [255, 0, 0, 255],
        "green" => [0, 128, 0, 255],
        "lime" => [0, 255, 0, 255],
        "blue" => [0, 0, 255, 255],
        "yellow" => [255, 255, 0, 255],
        "cyan" | "aqua" => [0, 255, 255, 255],
        "magenta" | "fuchsia" => [255, 0, 255, 255],
        "gray" | "grey" => [128, 128, 128, 255],
        "orange" => [255, 165, 0, 255],
        "purple" => [128, 0, 128, 255],
        "pink" => [255, 192, 203, 255],
        "gold" => [255, 215, 0, 255],
        "transparent" => [0, 0, 0, 0],
        _ => return None,
    };
    Some(Color::from_rgba8(r, g, b, a))
}
