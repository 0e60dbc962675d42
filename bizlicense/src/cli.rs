// bizlicense/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use bizlicense_core::domain::DuplicatePolicy;
use bizlicense_core::infrastructure::config::ReportProvider;

#[derive(Parser)]
#[command(name = "bizlicense")]
#[command(about = "Matches a business profile against the licensing requirement catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔎 Lists the requirements that apply to a business
    Match {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// 📝 Writes the licensing report for a business
    Report {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "markdown")]
        format: ReportFormat,

        /// Write the report to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Report generator, overrides the configuration (template | llm)
        #[arg(long)]
        provider: Option<ReportProvider>,
    },

    /// 📚 Loads the catalog and prints its summary
    Catalog {
        #[command(flatten)]
        project: ProjectArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project directory (where bizlicense.yaml lives)
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Explicit configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog file or directory, overrides the configuration
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// What to do with repeated requirement ids (first-wins | last-wins | reject)
    #[arg(long)]
    pub duplicate_policy: Option<DuplicatePolicy>,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Business profile as a JSON or YAML file
    #[arg(long, conflicts_with_all = ["area_m2", "seats", "gas", "serves_meat", "deliveries"])]
    pub profile: Option<PathBuf>,

    /// Floor area in square metres
    #[arg(long, allow_hyphen_values = true, required_unless_present = "profile")]
    pub area_m2: Option<f64>,

    /// Number of seats
    #[arg(long, allow_hyphen_values = true, default_value = "0")]
    pub seats: f64,

    /// Gas installation on the premises
    #[arg(long)]
    pub gas: bool,

    /// Meat is served (implies food service)
    #[arg(long)]
    pub serves_meat: bool,

    /// Deliveries are offered
    #[arg(long)]
    pub deliveries: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}
