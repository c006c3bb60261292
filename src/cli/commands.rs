use crate::catalog::CatalogFormat;
use crate::util::logging::parse_level;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

/// Discover, classify and sequence the artifacts of a directory tree
#[derive(Parser, Debug)]
#[command(
    name = "phaseplan",
    about = "Discover, classify and sequence the artifacts of a directory tree",
    version,
    long_about = "phaseplan walks a directory tree, classifies every file and directory with \
                  ordered heuristic rules, scores it by size, and proposes an execution order \
                  as capacity-bounded phases. A full run writes a catalog, a plain-text report \
                  and fail-fast POSIX scripts for every phase.\n\n\
                  Without a subcommand, `run` is executed on the current directory."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        value_parser = parse_level,
        help = "Set logging level (trace, debug, info, warn, error)"
    )]
    pub log_level: Option<Level>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// The subcommand to execute; a bare invocation means `run`
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        about = "Run the full pipeline and write catalog, report and scripts",
        long_about = "Scans the tree, builds the catalog, sequences phases and writes \
                      catalog.json (or catalog.yaml), report.txt, phase_NN.sh and \
                      run_all_phases.sh into the output directory.\n\n\
                      Examples:\n  \
                      phaseplan run\n  \
                      phaseplan run ~/lab --output-dir /tmp/plan\n  \
                      phaseplan run --catalog-format yaml --no-scripts"
    )]
    Run(RunArgs),

    #[command(
        about = "Print the catalog without writing anything",
        long_about = "Scans, classifies and scores the tree and prints the catalog.\n\n\
                      Examples:\n  \
                      phaseplan catalog\n  \
                      phaseplan catalog ~/lab --format json"
    )]
    Catalog(CatalogArgs),

    #[command(
        about = "Print the report and phase breakdown without writing anything",
        long_about = "Builds the catalog, sequences phases and prints the report.\n\n\
                      Examples:\n  \
                      phaseplan plan\n  \
                      phaseplan plan ~/lab --format yaml --top 5"
    )]
    Plan(PlanArgs),

    #[command(about = "List classification rules and phase definitions")]
    Rules(RulesArgs),
}

/// Options shared by every command that walks a tree
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    #[arg(
        value_name = "PATH",
        help = "Root directory to scan (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(long, help = "Honor .gitignore files while scanning")]
    pub gitignore: bool,

    #[arg(long, value_name = "N", help = "Maximum directory depth to scan")]
    pub max_depth: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Output directory (defaults to <PATH>/phaseplan-out)"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(long, value_enum, help = "Catalog file format")]
    pub catalog_format: Option<CatalogFormatArg>,

    #[arg(long, value_name = "N", help = "Number of specialized entries in the report")]
    pub top: Option<usize>,

    #[arg(long, help = "Write catalog and report only")]
    pub no_scripts: bool,

    #[arg(long, value_name = "COMMAND", help = "Interpreter for .py entries")]
    pub python: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "N", help = "Number of specialized entries in the report")]
    pub top: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormatArg {
    Json,
    Yaml,
}

impl From<CatalogFormatArg> for CatalogFormat {
    fn from(arg: CatalogFormatArg) -> Self {
        match arg {
            CatalogFormatArg::Json => CatalogFormat::Json,
            CatalogFormatArg::Yaml => CatalogFormat::Yaml,
        }
    }
}
