//! Rendering Engine Seam
//!
//! Renderers receive normalized documents only. The returned receipt is the
//! completion signal.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::document::{InstructionDocument, Size};
use crate::hashing::document_hash;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Canvas is empty: {width}x{height}")]
    EmptyCanvas { width: i64, height: i64 },

    #[error("Render failed: {0}")]
    Failed(String),

    #[error("Cannot hash document: {0}")]
    Hash(#[from] serde_json::Error),
}

/// One draw instruction as the renderer will paint it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintStep {
    pub shape: String,
    /// Palette value for symbolic names
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderReceipt {
    pub id: String,
    pub completed_at: DateTime<Utc>,
    pub document_hash: String,
    pub canvas: Size,
    pub destination_file: String,
    pub format: String,
    pub steps: Vec<PaintStep>,
}

impl RenderReceipt {
    pub fn for_document(document: &InstructionDocument) -> Result<Self, RenderError> {
        let steps = document
            .instructions
            .draw
            .iter()
            .map(|draw| PaintStep {
                shape: draw.tag().to_string(),
                color: draw.color().resolved().to_string(),
            })
            .collect();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            completed_at: Utc::now(),
            document_hash: document_hash(document)?,
            canvas: document.final_dimensions,
            destination_file: document.destination_file.clone(),
            format: document.format.clone(),
            steps,
        })
    }
}

pub trait Renderer {
    fn render(&mut self, document: &InstructionDocument) -> Result<RenderReceipt, RenderError>;
}

/// Produces receipts without touching pixels. Keeps every document it was given.
#[derive(Debug, Default)]
pub struct DryRunRenderer {
    rendered: Vec<InstructionDocument>,
}

impl DryRunRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> &[InstructionDocument] {
        &self.rendered
    }
}

impl Renderer for DryRunRenderer {
    fn render(&mut self, document: &InstructionDocument) -> Result<RenderReceipt, RenderError> {
        let canvas = document.final_dimensions;
        if canvas.width <= 0 || canvas.height <= 0 {
            return Err(RenderError::EmptyCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }

        let receipt = RenderReceipt::for_document(document)?;
        self.rendered.push(document.clone());

        info!(
            "Rendered {} step(s) onto {}x{} canvas for '{}'",
            receipt.steps.len(),
            canvas.width,
            canvas.height,
            document.destination_file
        );
        Ok(receipt)
    }
}
