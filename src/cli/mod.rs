pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{
    CatalogArgs, CatalogFormatArg, CliArgs, Commands, OutputFormatArg, PlanArgs, RulesArgs,
    RunArgs, ScanArgs,
};
pub use output::{OutputFormat, OutputFormatter};
