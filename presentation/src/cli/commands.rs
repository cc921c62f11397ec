//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a finished consultation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full transcript followed by all three assessments
    Full,
    /// Only the consensus assessment
    Consensus,
    /// Session summary as JSON
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Consensus => Self::Consensus,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for clinical-council
#[derive(Parser, Debug)]
#[command(name = "clinical-council")]
#[command(author, version, about = "Clinical council - Three physician agents reach a diagnostic consensus")]
#[command(long_about = r#"
Clinical council runs a patient case past three physician agents in sequence:

1. Primary care assessment
2. Specialist consultation, informed by the primary assessment
3. Senior attending consensus over both prior assessments

Optionally, a templated case discussion is appended to the transcript.

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. COUNCIL_* env vars       e.g. COUNCIL_DIAGNOSIS__TEMPERATURE=0.2
3. ./council.toml           Project-level config
4. ~/.config/clinical-council/config.toml   Global config

Example:
  clinical-council --case chest_pain.json --specialty Cardiology
  clinical-council --case case.json --discuss 2 --output json
  cat case.json | clinical-council --case - --demo
"#)]
pub struct Cli {
    /// Patient case as a JSON object (`-` reads stdin)
    #[arg(long, value_name = "PATH", required_unless_present = "show_config")]
    pub case: Option<PathBuf>,

    /// Specialist consulted for this case
    #[arg(short, long, value_name = "SPECIALTY")]
    pub specialty: Option<String>,

    /// Append a case discussion; rounds default to the configured value
    #[arg(long, value_name = "ROUNDS", num_args = 0..=1, default_missing_value = "0")]
    pub discuss: Option<u32>,

    /// Output format (overrides `[output] format`)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Use the offline demo responder instead of the configured service
    #[arg(long)]
    pub demo: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Discussion rounds to run, if any; `--discuss` alone uses `default_rounds`.
    pub fn discussion_rounds(&self, default_rounds: u32) -> Option<u32> {
        self.discuss
            .map(|rounds| if rounds == 0 { default_rounds } else { rounds })
    }
}
