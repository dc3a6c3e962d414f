//! Type Normalizer - Raw Document to Integer Document
//!
//! Walks the closed document shape and coerces `x`, `y`, `width`, `height`,
//! `radius` and `strokeWidth` to integers. Errors name the dotted path of the
//! enclosing object, e.g. `root.instructions.draw.0.circle.from`.

use log::debug;
use thiserror::Error;

use crate::document::{
    parse_int, Circle, CropInstruction, DrawInstruction, InstructionDocument, Instructions,
    Numeric, Point, RawDocument, Rectangle, Segment, Size,
};

/// Context label used when the caller gives none
pub const ROOT_CONTEXT: &str = "root";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizationError {
    #[error("In '{context}': property '{property}' is not a number.")]
    NotANumber {
        context: String,
        property: &'static str,
        value: String,
    },

    #[error("In '{context}': property '{property}' is not an integer.")]
    NotAnInteger {
        context: String,
        property: &'static str,
        value: f64,
    },
}

impl NormalizationError {
    /// Dotted path of the object holding the bad field
    pub fn context(&self) -> &str {
        match self {
            NormalizationError::NotANumber { context, .. }
            | NormalizationError::NotAnInteger { context, .. } => context,
        }
    }

    pub fn property(&self) -> &'static str {
        match self {
            NormalizationError::NotANumber { property, .. }
            | NormalizationError::NotAnInteger { property, .. } => property,
        }
    }
}

pub fn normalize(document: RawDocument) -> Result<InstructionDocument, NormalizationError> {
    normalize_in(document, ROOT_CONTEXT)
}

/// Normalize with `context` as the root label of every error path
pub fn normalize_in(
    document: RawDocument,
    context: &str,
) -> Result<InstructionDocument, NormalizationError> {
    debug!(
        "Normalizing document with {} draw instruction(s)",
        document.instructions.draw.len()
    );

    // Instructions first: a crop size copied into finalDimensions is reported
    // where it was written.
    let instructions = instructions(document.instructions, &child(context, "instructions"))?;

    Ok(InstructionDocument {
        dimensions: size(document.dimensions, &child(context, "dimensions"))?,
        final_dimensions: size(
            document.final_dimensions,
            &child(context, "finalDimensions"),
        )?,
        instructions,
        source_file: document.source_file,
        destination_file: document.destination_file,
        format: document.format,
    })
}

fn child(context: &str, field: &str) -> String {
    format!("{}.{}", context, field)
}

fn instructions(
    raw: Instructions<Numeric>,
    context: &str,
) -> Result<Instructions, NormalizationError> {
    let crop = raw
        .crop
        .map(|c| crop(c, &child(context, "crop")))
        .transpose()?;

    let draw_context = child(context, "draw");
    let draw = raw
        .draw
        .into_iter()
        .enumerate()
        .map(|(index, d)| draw(d, &child(&draw_context, &index.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let stroke_width = raw
        .stroke_width
        .map(|value| integer(value, context, "strokeWidth"))
        .transpose()?;

    Ok(Instructions {
        crop,
        draw,
        stroke_width,
    })
}

fn crop(
    raw: CropInstruction<Numeric>,
    context: &str,
) -> Result<CropInstruction, NormalizationError> {
    Ok(CropInstruction {
        from: point(raw.from, &child(context, "from"))?,
        size: size(raw.size, &child(context, "size"))?,
    })
}

fn draw(
    raw: DrawInstruction<Numeric>,
    context: &str,
) -> Result<DrawInstruction, NormalizationError> {
    let context = child(context, raw.tag());

    Ok(match raw {
        DrawInstruction::Circle(c) => DrawInstruction::Circle(Circle {
            from: point(c.from, &child(&context, "from"))?,
            radius: integer(c.radius, &context, "radius")?,
            color: c.color,
        }),
        DrawInstruction::Rectangle(r) => DrawInstruction::Rectangle(Rectangle {
            from: point(r.from, &child(&context, "from"))?,
            size: size(r.size, &child(&context, "size"))?,
            color: r.color,
        }),
        DrawInstruction::Line(s) => DrawInstruction::Line(segment(s, &context)?),
        DrawInstruction::Arrow(s) => DrawInstruction::Arrow(segment(s, &context)?),
        DrawInstruction::Gap(s) => DrawInstruction::Gap(segment(s, &context)?),
    })
}

fn segment(raw: Segment<Numeric>, context: &str) -> Result<Segment, NormalizationError> {
    Ok(Segment {
        from: point(raw.from, &child(context, "from"))?,
        to: point(raw.to, &child(context, "to"))?,
        color: raw.color,
    })
}

fn point(raw: Point<Numeric>, context: &str) -> Result<Point, NormalizationError> {
    Ok(Point {
        x: integer(raw.x, context, "x")?,
        y: integer(raw.y, context, "y")?,
    })
}

fn size(raw: Size<Numeric>, context: &str) -> Result<Size, NormalizationError> {
    Ok(Size {
        width: integer(raw.width, context, "width")?,
        height: integer(raw.height, context, "height")?,
    })
}

fn integer(
    value: Numeric,
    context: &str,
    property: &'static str,
) -> Result<i64, NormalizationError> {
    match value {
        Numeric::Int(v) => Ok(v),
        Numeric::Float(v)
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 =>
        {
            Ok(v as i64)
        }
        Numeric::Float(v) => Err(NormalizationError::NotAnInteger {
            context: context.to_string(),
            property,
            value: v,
        }),
        Numeric::Text(text) => parse_int(&text).ok_or_else(|| NormalizationError::NotANumber {
            context: context.to_string(),
            property,
            value: text,
        }),
        Numeric::Other(other) => Err(NormalizationError::NotANumber {
            context: context.to_string(),
            property,
            value: other.to_string(),
        }),
    }
}
