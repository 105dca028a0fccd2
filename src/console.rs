//! Handling the PARAXIS CLI
//!
//! This module handles the command line parsing. Lenses are given with repeated `--lens` options.
//! If no lens is given on the command line, the user is asked for lenses interactively.
use crate::{
    analyzer::AnalyzerConfig,
    error::{ParaxisError, ParaxisResult},
    thin_lens::ThinLens,
};
use clap::Parser;
use rprompt::prompt_reply_from_bufread;
use std::io::{stdin, stdout, BufRead, BufReader, BufWriter, ErrorKind, Write};
use uom::si::{f64::Length, length::millimeter};

/// Maximum number of consecutive invalid inputs in interactive mode.
const MAX_INVALID_INPUTS: usize = 3;

/// Output format of the analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// human readable text
    Text,
    /// pretty printed JSON
    Json,
}

/// Command line arguments for the PARAXIS application.
#[derive(Debug)]
pub struct Args {
    /// lenses of the optical system
    pub lenses: Vec<ThinLens>,
    /// format of the printed results
    pub output: OutputFormat,
    /// print an SVG diagram of the system after the text results
    pub svg: bool,
    /// configuration of the analysis
    pub config: AnalyzerConfig,
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct PartialArgs {
    /// thin lens given as `focal_length,position` in millimeters. May be given several times.
    #[arg(short, long = "lens", value_name = "F,X", allow_hyphen_values = true)]
    lenses: Vec<String>,

    /// print the results as JSON instead of plain text
    #[arg(short, long)]
    json: bool,

    /// print an SVG diagram of the system after the text results (not combinable with `--json`)
    #[arg(short, long, conflicts_with = "json")]
    svg: bool,

    /// magnitude (SI units) below which a non-zero divisor triggers a warning
    #[arg(short, long)]
    warn_threshold: Option<f64>,
}

/// Evaluates a lens description of the form `focal_length,position` (both in millimeters).
/// # Attributes
/// * `lens_input`: String description of the lens
/// # Returns
/// * [`Option<ThinLens>`] if the input is valid
/// * None if the string cannot be parsed
fn eval_lens_input(lens_input: &str) -> Option<ThinLens> {
    let (focal_length, position) = lens_input.split_once(',')?;
    let focal_length = focal_length.trim().parse::<f64>().ok()?;
    let position = position.trim().parse::<f64>().ok()?;
    if !focal_length.is_finite() || !position.is_finite() {
        return None;
    }
    Some(ThinLens::new(
        Length::new::<millimeter>(focal_length),
        Length::new::<millimeter>(position),
    ))
}

/// Asks the user for lenses until an empty line (or the end of the input) is entered.
/// # Errors
/// Errors if
///   - [`MAX_INVALID_INPUTS`] invalid inputs are given in a row.
///   - reading from or writing to the console fails.
fn prompt_lenses(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> ParaxisResult<Vec<ThinLens>> {
    let mut lenses = Vec::new();
    let mut err_count = 0;
    let mut prompt_str =
        "Please insert a lens as `focal_length,position` in mm (empty line to finish):\n".to_owned();
    loop {
        let input = match prompt_reply_from_bufread(reader, writer, &prompt_str) {
            Ok(input) => input,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => String::new(),
            Err(e) => return Err(ParaxisError::Console(format!("cannot read input: {e}"))),
        };
        if input.trim().is_empty() {
            return Ok(lenses);
        }
        if let Some(lens) = eval_lens_input(&input) {
            err_count = 0;
            lenses.push(lens);
            prompt_str = "Next lens (empty line to finish):\n".to_owned();
        } else {
            err_count += 1;
            if err_count >= MAX_INVALID_INPUTS {
                return Err(ParaxisError::Console(
                    "Too many wrong inputs! Program exits! Please type \"paraxis -h\" for help!"
                        .into(),
                ));
            }
            prompt_str = format!(
                "Invalid lens: {input}\n\nPlease insert a lens as `focal_length,position` in mm:\n"
            );
        }
    }
}

impl Args {
    fn from_partial_args(
        part_args: PartialArgs,
        reader: &mut impl BufRead,
        writer: &mut impl Write,
    ) -> ParaxisResult<Self> {
        let mut lenses = part_args
            .lenses
            .iter()
            .map(|input| {
                eval_lens_input(input)
                    .ok_or_else(|| ParaxisError::Console(format!("invalid lens: {input}")))
            })
            .collect::<ParaxisResult<Vec<ThinLens>>>()?;
        if lenses.is_empty() {
            lenses = prompt_lenses(reader, writer)?;
        }
        if lenses.is_empty() {
            return Err(ParaxisError::Console("at least one lens is required".into()));
        }
        let mut config = AnalyzerConfig::default();
        if let Some(threshold) = part_args.warn_threshold {
            config
                .set_near_zero_threshold(threshold)
                .map_err(|e| ParaxisError::Console(e.to_string()))?;
        }
        let output = if part_args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };
        Ok(Self {
            lenses,
            output,
            svg: part_args.svg,
            config,
        })
    }
}

impl TryFrom<PartialArgs> for Args {
    type Error = ParaxisError;

    fn try_from(part_args: PartialArgs) -> ParaxisResult<Self> {
        let mut reader = BufReader::new(stdin().lock());
        let mut writer = BufWriter::new(stdout().lock());
        Self::from_partial_args(part_args, &mut reader, &mut writer)
    }
}
