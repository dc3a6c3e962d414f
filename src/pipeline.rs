//! Compilation Pipeline - Single Entry Point
//!
//! CRITICAL: every document goes through `normalize` before a renderer sees it.

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::builder::DocumentBuilder;
use crate::document::{InstructionDocument, RawDocument};
use crate::markup::{parse_markup, ParseError};
use crate::normalize::{normalize, NormalizationError};
use crate::probe::{DimensionProbe, ImageProbe, ProbeError};
use crate::render::{DryRunRenderer, RenderError, RenderReceipt, Renderer};
use crate::request::{CompileRequest, MarkupRequest, UsageError};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Normalization failed: {0}")]
    Normalization(#[from] NormalizationError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A rendered job: the document the renderer received and its receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledJob {
    pub engine_version: String,
    pub document: InstructionDocument,
    pub receipt: RenderReceipt,
}

/// The compilation pipeline: probe → parse → build → normalize → render
pub struct CompilationPipeline<P = ImageProbe, R = DryRunRenderer> {
    probe: P,
    renderer: R,
}

impl<P: DimensionProbe, R: Renderer> CompilationPipeline<P, R> {
    pub fn new(probe: P, renderer: R) -> Self {
        Self { probe, renderer }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Produce a normalized document without rendering it
    pub fn compile(&self, request: CompileRequest) -> Result<InstructionDocument, PipelineError> {
        let raw = match request {
            CompileRequest::Markup(markup) => self.build_from_markup(markup)?,
            CompileRequest::Document(document) => {
                debug!("Using supplied document for '{}'", document.source_file);
                *document
            }
        };

        Ok(normalize(raw)?)
    }

    /// Compile, then render
    ///
    /// Probe, parse and normalization failures abort before the renderer is called.
    pub fn run(&mut self, request: CompileRequest) -> Result<CompiledJob, PipelineError> {
        let document = self.compile(request)?;
        let receipt = self.renderer.render(&document)?;
        Ok(CompiledJob {
            engine_version: ENGINE_VERSION.to_string(),
            document,
            receipt,
        })
    }

    fn build_from_markup(&self, request: MarkupRequest) -> Result<RawDocument, PipelineError> {
        let dimensions = self.probe.dimensions(Path::new(&request.source_file))?;
        debug!(
            "Source '{}' is {}x{}",
            request.source_file, dimensions.width, dimensions.height
        );

        let parsed = parse_markup(&request.markup)?;
        debug!(
            "Parsed {} draw instruction(s), crop: {}, ignored: {}",
            parsed.draw.len(),
            parsed.crop.is_some(),
            parsed.ignored.len()
        );

        Ok(DocumentBuilder::new(dimensions)
            .source_file(request.source_file)
            .destination_file(request.destination_file)
            .format(request.format)
            .stroke_width(request.stroke_width.as_deref())
            .build(parsed))
    }
}

impl Default for CompilationPipeline {
    fn default() -> Self {
        Self::new(ImageProbe, DryRunRenderer::new())
    }
}
