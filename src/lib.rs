//! ImageMarkup Core - Image Edit Markup Compiler
//!
//! # Pipeline Rules
//! 1. Grammar Is Lenient: the parser never judges numbers
//! 2. Normalization Is Strict: every numeric field is an integer or the job fails
//! 3. Draw Order Is Paint Order
//! 4. Last Crop Wins
//! 5. Renderers Only See Normalized Documents

pub mod palette;
pub mod document;
pub mod markup;
pub mod builder;
pub mod normalize;
pub mod probe;
pub mod render;
pub mod hashing;
pub mod request;
pub mod pipeline;

pub use palette::Color;
pub use document::{
    CropInstruction, DrawInstruction, InstructionDocument, Instructions, Numeric, Point,
    RawDocument, Size,
};
pub use markup::{parse_markup, to_markup, ParseError, ParsedMarkup};
pub use builder::DocumentBuilder;
pub use normalize::{normalize, normalize_in, NormalizationError};
pub use probe::{DimensionProbe, FixedDimensions, ImageProbe, ProbeError};
pub use render::{DryRunRenderer, RenderError, RenderReceipt, Renderer};
pub use hashing::{canonical_json, document_hash};
pub use request::{CompileRequest, MarkupRequest, RequestInputs, UsageError};
pub use pipeline::{CompilationPipeline, CompiledJob, PipelineError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_FORMAT: &str = "jpeg";
