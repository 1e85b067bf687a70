use crate::pipeline::DEFAULT_MAX_FILES;
use crate::source::{Source, UsageError};
use crate::util::logging::{parse_level, LoggingConfig};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing::Level;

/// Generate a README for a local folder or a GitHub repository
#[derive(Parser, Debug, Clone)]
#[command(
    name = "readmegen",
    about = "Generate a README for a local folder or a GitHub repository",
    version,
    long_about = "readmegen scans a project, asks a local model to summarize its files and \
                  purpose, detects the tech stack and license, and renders a README.\n\n\
                  Examples:\n  \
                  readmegen --path ./my-project\n  \
                  readmegen --repo octo/widgets@v2 --out WIDGETS.md\n  \
                  readmegen --path . --max-files 10 --model llama3:8b"
)]
#[command(group(ArgGroup::new("source").required(true).args(["path", "repo"])))]
pub struct CliArgs {
    #[arg(long, value_name = "DIR", help = "Local project folder to scan")]
    pub path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "OWNER/NAME[@REF]",
        help = "GitHub repository to fetch, optionally at a ref"
    )]
    pub repo: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        default_value = "README.md",
        help = "Output README path"
    )]
    pub out: PathBuf,

    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_FILES,
        help = "Max files to summarize"
    )]
    pub max_files: usize,

    #[arg(long, value_name = "FILE", help = "Handlebars template to render instead of the built-in one")]
    pub template: Option<PathBuf>,

    #[arg(long, value_name = "NAME", help = "Model name (overrides READMEGEN_MODEL)")]
    pub model: Option<String>,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

impl CliArgs {
    pub fn source(&self) -> Result<Source, UsageError> {
        Source::from_options(self.path.clone(), self.repo.as_deref())
    }

    /// `--log-level` wins over `-v`/`-q`, which win over the environment
    pub fn log_level_override(&self) -> Option<Level> {
        if let Some(level) = &self.log_level {
            Some(parse_level(level))
        } else if self.verbose {
            Some(Level::DEBUG)
        } else if self.quiet {
            Some(Level::ERROR)
        } else {
            None
        }
    }

    pub fn logging_config(&self, env_level: &str) -> LoggingConfig {
        let level = self
            .log_level_override()
            .unwrap_or_else(|| parse_level(env_level));
        LoggingConfig::with_level(level)
    }
}
