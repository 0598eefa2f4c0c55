//! Segment command implementation

use anyhow::{Context, Result};
use clap::Args;
use glossa_api::{Input, Segmenter};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use crate::config::CliConfig;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{FormatKind, FormatOptions, OutputFormatter};
use crate::progress::ProgressReporter;

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Input files or patterns (supports glob)
    #[arg(
        short,
        long,
        value_name = "FILE/PATTERN",
        required_unless_present = "text",
        conflicts_with = "text"
    )]
    pub input: Vec<String>,

    /// Segment this text instead of files
    #[arg(short, long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Segment kind: character, word, line or sentence
    #[arg(short, long, value_name = "KIND")]
    pub kind: Option<String>,

    /// Locale tag, e.g. en_GB or ja-JP
    #[arg(short, long, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatKind>,

    /// Show UTF-16 offsets in text and markdown output
    #[arg(long)]
    pub offsets: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);

        log::info!("Starting segmentation");
        log::debug!("Arguments: {:?}", self);

        let cli_config = CliConfig::load_or_default(self.config.as_deref())?;
        let config =
            cli_config.segmentation_config(self.locale.as_deref(), self.kind.as_deref())?;
        let format = match self.format {
            Some(format) => format,
            None => cli_config.output_format()?,
        };
        let options = FormatOptions {
            offsets: self.offsets,
            pretty_json: cli_config.output.pretty_json,
        };

        let segmenter = Segmenter::with_config(config);
        let mut formatter = self.formatter(format, options)?;

        match &self.text {
            Some(text) => {
                self.segment_one(&segmenter, Input::from_text(text.as_str()), formatter.as_mut())?;
            }
            None => self.segment_files(&segmenter, formatter.as_mut())?,
        }

        formatter.finish()
    }

    fn formatter(&self, format: FormatKind, options: FormatOptions) -> Result<Box<dyn OutputFormatter>> {
        Ok(match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                format.formatter(BufWriter::new(file), options)
            }
            None => format.formatter(io::stdout(), options),
        })
    }

    fn segment_files(&self, segmenter: &Segmenter, formatter: &mut dyn OutputFormatter) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        log::info!(
            "Segmenting {} file(s), {} bytes",
            files.len(),
            FileReader::total_size(&files)?
        );

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        for path in &files {
            let text = FileReader::read_text(path)?;
            let count = self
                .segment_one(segmenter, Input::from_text(text), formatter)
                .with_context(|| format!("Failed to segment {}", path.display()))?;
            progress.file_completed(&display_name(path), count);
        }

        progress.finish();
        Ok(())
    }

    fn segment_one(
        &self,
        segmenter: &Segmenter,
        input: Input,
        formatter: &mut dyn OutputFormatter,
    ) -> Result<usize> {
        let output = segmenter.segment(input)?;
        log::debug!(
            "{} segments in {} ms",
            output.metadata.segment_count,
            output.metadata.processing_time_ms
        );
        for segment in &output.segments {
            formatter.format_segment(segment)?;
        }
        Ok(output.segments.len())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
