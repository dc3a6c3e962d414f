//! Compile Requests - Entry Point Selection
//!
//! Exactly one entry: markup (with both paths) or a JSON document.

use thiserror::Error;

use crate::document::RawDocument;
use crate::pipeline::PipelineError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Invalid usage: processing JSON and markup at once")]
    MarkupAndDocument,

    #[error("Invalid usage: 'stroke' cannot be combined with JSON")]
    StrokeWithDocument,

    #[error("Invalid usage: input or output path missing")]
    MissingPaths,

    #[error("Invalid usage: either markup or JSON is required")]
    NoInput,
}

/// Unchecked caller inputs, e.g. straight from the command line
#[derive(Debug, Clone, Default)]
pub struct RequestInputs {
    pub markup: Option<String>,
    pub json: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,
    pub stroke: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkupRequest {
    pub markup: String,
    pub source_file: String,
    pub destination_file: String,
    pub format: Option<String>,
    /// Kept as text; a bad value fails normalization, not parsing
    pub stroke_width: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompileRequest {
    Markup(MarkupRequest),
    Document(Box<RawDocument>),
}

impl RequestInputs {
    /// Check usage rules first, then decode the JSON document if one was given.
    pub fn into_request(self) -> Result<CompileRequest, PipelineError> {
        match (self.markup, self.json) {
            (Some(_), Some(_)) => Err(UsageError::MarkupAndDocument.into()),
            (None, Some(json)) => {
                if self.stroke.is_some() {
                    return Err(UsageError::StrokeWithDocument.into());
                }
                let document: RawDocument = serde_json::from_str(&json)?;
                Ok(CompileRequest::Document(Box::new(document)))
            }
            (Some(markup), None) => {
                let (Some(source_file), Some(destination_file)) = (self.input, self.output)
                else {
                    return Err(UsageError::MissingPaths.into());
                };
                Ok(CompileRequest::Markup(MarkupRequest {
                    markup,
                    source_file,
                    destination_file,
                    format: self.format,
                    stroke_width: self.stroke,
                }))
            }
            (None, None) => Err(UsageError::NoInput.into()),
        }
    }
}
