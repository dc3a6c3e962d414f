//! Instruction Document Builder
//!
//! Pure assembly. Nothing here validates; the normalizer does.

use crate::document::{Instructions, Numeric, RawDocument, Size};
use crate::markup::ParsedMarkup;
use crate::DEFAULT_FORMAT;

#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    dimensions: Size,
    source_file: String,
    destination_file: String,
    format: Option<String>,
    stroke_width: Option<Numeric>,
}

impl DocumentBuilder {
    /// Start from the source image's pixel size
    pub fn new(dimensions: Size) -> Self {
        Self {
            dimensions,
            source_file: String::new(),
            destination_file: String::new(),
            format: None,
            stroke_width: None,
        }
    }

    pub fn source_file(mut self, path: impl Into<String>) -> Self {
        self.source_file = path.into();
        self
    }

    pub fn destination_file(mut self, path: impl Into<String>) -> Self {
        self.destination_file = path.into();
        self
    }

    /// Output format; `None` keeps the default
    pub fn format(mut self, format: Option<String>) -> Self {
        self.format = format;
        self
    }

    /// Global stroke width, as written by the caller
    pub fn stroke_width(mut self, stroke: Option<&str>) -> Self {
        self.stroke_width = stroke.map(Numeric::from_token);
        self
    }

    pub fn build(self, parsed: ParsedMarkup) -> RawDocument {
        let dimensions = self.dimensions.map(Numeric::from);
        let final_dimensions = match &parsed.crop {
            Some(crop) => crop.size.clone(),
            None => dimensions.clone(),
        };

        RawDocument {
            dimensions,
            final_dimensions,
            instructions: Instructions {
                crop: parsed.crop,
                draw: parsed.draw,
                stroke_width: self.stroke_width,
            },
            source_file: self.source_file,
            destination_file: self.destination_file,
            format: self.format.unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
        }
    }
}
