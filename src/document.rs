//! Instruction Document - The Renderer Contract
//!
//! Every numeric field is typed by `N`. Raw documents (`RawDocument`) hold
//! whatever the author wrote; normalized documents hold `i64` only.

use serde::{Deserialize, Serialize};

use crate::palette::Color;
use crate::DEFAULT_FORMAT;

/// A document straight from markup or JSON, before normalization
pub type RawDocument = InstructionDocument<Numeric>;

/// A numeric field value as written by the author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
    /// `null`, booleans, arrays and objects; never a valid number
    Other(serde_json::Value),
}

impl Numeric {
    /// Integer if the token starts with one, the verbatim text otherwise
    pub fn from_token(token: &str) -> Self {
        match parse_int(token) {
            Some(value) => Numeric::Int(value),
            None => Numeric::Text(token.to_string()),
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Int(value)
    }
}

/// Base-10 integer prefix of `text`: leading whitespace and an optional sign
/// are accepted, anything after the digits is ignored. `None` when there are
/// no digits or the value overflows.
pub fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point<N = i64> {
    pub x: N,
    pub y: N,
}

impl<N> Point<N> {
    pub fn new(x: N, y: N) -> Self {
        Self { x, y }
    }

    pub fn map<M>(self, mut f: impl FnMut(N) -> M) -> Point<M> {
        Point { x: f(self.x), y: f(self.y) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size<N = i64> {
    pub width: N,
    pub height: N,
}

impl<N> Size<N> {
    pub fn new(width: N, height: N) -> Self {
        Self { width, height }
    }

    pub fn map<M>(self, mut f: impl FnMut(N) -> M) -> Size<M> {
        Size {
            width: f(self.width),
            height: f(self.height),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropInstruction<N = i64> {
    pub from: Point<N>,
    pub size: Size<N>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle<N = i64> {
    pub from: Point<N>,
    pub radius: N,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle<N = i64> {
    pub from: Point<N>,
    pub size: Size<N>,
    pub color: Color,
}

/// Shared payload of `line`, `arrow` and `gap`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment<N = i64> {
    pub from: Point<N>,
    pub to: Point<N>,
    pub color: Color,
}

/// One paintable entry. Serialized externally tagged: `{"circle": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawInstruction<N = i64> {
    Circle(Circle<N>),
    Rectangle(Rectangle<N>),
    Line(Segment<N>),
    Arrow(Segment<N>),
    /// Draws nothing; the renderer reserves its layout
    Gap(Segment<N>),
}

impl<N> DrawInstruction<N> {
    /// Wire tag, also the markup command name
    pub fn tag(&self) -> &'static str {
        match self {
            DrawInstruction::Circle(_) => "circle",
            DrawInstruction::Rectangle(_) => "rectangle",
            DrawInstruction::Line(_) => "line",
            DrawInstruction::Arrow(_) => "arrow",
            DrawInstruction::Gap(_) => "gap",
        }
    }

    pub fn color(&self) -> &Color {
        match self {
            DrawInstruction::Circle(c) => &c.color,
            DrawInstruction::Rectangle(r) => &r.color,
            DrawInstruction::Line(s) | DrawInstruction::Arrow(s) | DrawInstruction::Gap(s) => {
                &s.color
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "N: Deserialize<'de>"))]
pub struct Instructions<N = i64> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropInstruction<N>>,
    /// Paint order: later entries paint over earlier ones
    #[serde(default)]
    pub draw: Vec<DrawInstruction<N>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<N>,
}

impl<N> Default for Instructions<N> {
    fn default() -> Self {
        Self {
            crop: None,
            draw: vec![],
            stroke_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionDocument<N = i64> {
    /// Source image size
    pub dimensions: Size<N>,
    /// `dimensions`, or the crop size when a crop exists
    pub final_dimensions: Size<N>,
    pub instructions: Instructions<N>,
    pub source_file: String,
    pub destination_file: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_int_prefix_semantics() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  -7"), Some(-7));
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("12px"), Some(12));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn test_numeric_from_token() {
        assert_eq!(Numeric::from_token("10"), Numeric::Int(10));
        assert_eq!(Numeric::from_token("ten"), Numeric::Text("ten".into()));
    }

    #[test]
    fn test_numeric_accepts_any_json_scalar() {
        let point: Point<Numeric> = serde_json::from_value(json!({"x": 1, "y": "2"})).unwrap();
        assert_eq!(point.x, Numeric::Int(1));
        assert_eq!(point.y, Numeric::Text("2".into()));

        let size: Size<Numeric> =
            serde_json::from_value(json!({"width": 1.5, "height": 2})).unwrap();
        assert_eq!(size.width, Numeric::Float(1.5));
    }

    #[test]
    fn test_draw_instruction_is_externally_tagged() {
        let draw: DrawInstruction = DrawInstruction::Arrow(Segment {
            from: Point::new(0, 0),
            to: Point::new(5, 5),
            color: Color::from("red"),
        });
        let value = serde_json::to_value(&draw).unwrap();
        assert_eq!(
            value,
            json!({"arrow": {"from": {"x": 0, "y": 0}, "to": {"x": 5, "y": 5}, "color": "red"}})
        );
        assert_eq!(draw.tag(), "arrow");
    }

    #[test]
    fn test_document_wire_defaults() {
        let doc: RawDocument = serde_json::from_value(json!({
            "dimensions": {"width": 100, "height": 80},
            "finalDimensions": {"width": 100, "height": 80},
            "instructions": {},
            "sourceFile": "in.jpg",
            "destinationFile": "out.jpg"
        }))
        .unwrap();

        assert_eq!(doc.format, "jpeg");
        assert!(doc.instructions.draw.is_empty());
        assert!(doc.instructions.crop.is_none());

        let value = serde_json::to_value(&doc).unwrap();
        assert!(value["instructions"].get("crop").is_none());
        assert!(value["instructions"].get("strokeWidth").is_none());
    }
}
