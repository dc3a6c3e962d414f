//! ImageMarkup CLI
//!
//! Markup entry: --input, --output, --markup [--format] [--stroke]
//! Document entry: --json
//! Outputs JSON to stdout. Usage errors exit with 2, other failures with 1.

use clap::{CommandFactory, Parser};
use std::process::ExitCode;

use imagemarkup_core::{to_markup, CompilationPipeline, PipelineError, RequestInputs};

#[derive(Parser)]
#[command(name = "imagemarkup-cli")]
#[command(about = "ImageMarkup CLI - Image Edit Markup Compiler")]
struct Cli {
    /// Source image path
    #[arg(short, long)]
    input: Option<String>,

    /// Destination image path
    #[arg(short, long)]
    output: Option<String>,

    /// Markup, e.g. 'crop,0x0,200x100;circle,50x50,20,red'
    #[arg(short, long)]
    markup: Option<String>,

    /// Instruction document as JSON
    #[arg(short, long)]
    json: Option<String>,

    /// Output format (default: jpeg)
    #[arg(short, long)]
    format: Option<String>,

    /// Global stroke width
    #[arg(short, long)]
    stroke: Option<String>,

    /// Print the compiled document as markup to stderr
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn inputs(self) -> RequestInputs {
        RequestInputs {
            markup: self.markup,
            json: self.json,
            input: self.input,
            output: self.output,
            format: self.format,
            stroke: self.stroke,
        }
    }
}

fn failure(error: &PipelineError) -> String {
    serde_json::json!({
        "success": false,
        "error": error.to_string(),
    })
    .to_string()
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let debug = cli.debug;

    let request = match cli.inputs().into_request() {
        Ok(r) => r,
        Err(e @ PipelineError::Usage(_)) => {
            eprintln!("{}", e);
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::from(2);
        }
        Err(e) => {
            println!("{}", failure(&e));
            return ExitCode::FAILURE;
        }
    };

    let mut pipeline = CompilationPipeline::default();

    match pipeline.run(request) {
        Ok(job) => {
            if debug {
                eprintln!("{}", to_markup(&job.document));
            }
            let output = serde_json::json!({
                "success": true,
                "engineVersion": job.engine_version,
                "document": job.document,
                "receipt": job.receipt,
            });
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", failure(&e));
            ExitCode::FAILURE
        }
    }
}
