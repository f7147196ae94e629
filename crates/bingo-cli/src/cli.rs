//! CLI argument definitions for the bingo planner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bingo_index::COMBINED_KEY;

#[derive(Parser)]
#[command(
    name = "bingo",
    version,
    about = "Bingo planner - browse drop-rate tables and curate bingo tiles",
    long_about = "Browse boss, mob, and raid drop tables by category, era, or drop type,\n\
                  ranked by efficiency (drop rate per hour of effort).\n\n\
                  Curate the order of bingo tiles; every change is saved immediately."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the dataset JSON files.
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Settings file to read instead of the default location.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List dataset slots.
    Datasets,

    /// List categories of a dataset, plain categories first, then eras.
    Categories(DatasetArgs),

    /// List drop types of a dataset.
    Types(DatasetArgs),

    /// Show the drop table for one category or drop type.
    View(ViewArgs),

    /// Inspect and reorder bingo tiles.
    #[command(subcommand)]
    Tiles(TilesCommand),
}

#[derive(Args)]
pub struct DatasetArgs {
    /// Dataset slot key (see `bingo datasets`).
    #[arg(long = "dataset", short = 'd', default_value = COMBINED_KEY)]
    pub dataset: String,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Category or era label to show.
    #[arg(long = "category", short = 'c', conflicts_with = "drop_type")]
    pub category: Option<String>,

    /// Drop type to show.
    #[arg(long = "type", short = 't', id = "drop_type")]
    pub drop_type: Option<String>,
}

#[derive(Args)]
pub struct TileSourceArgs {
    /// Canonical tile file, relative to the data directory unless absolute.
    #[arg(long = "tiles", value_name = "PATH")]
    pub tile_source: Option<PathBuf>,

    /// Snapshot file holding the saved order.
    #[arg(long = "snapshot", value_name = "PATH")]
    pub snapshot_path: Option<PathBuf>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Case-insensitive search over name, description, and id.
    #[arg(long = "query", short = 's', default_value = "")]
    pub query: String,

    /// Tile type to show, or ALL.
    #[arg(long = "type", short = 't', default_value = "ALL")]
    pub tile_type: String,
}

#[derive(Subcommand)]
pub enum TilesCommand {
    /// List tiles in order, optionally filtered.
    List {
        #[command(flatten)]
        source: TileSourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Move the tile at FROM onto the position of the tile at TO.
    ///
    /// Indices count rows of the filtered list shown by `tiles list` with
    /// the same filters.
    Move {
        #[command(flatten)]
        source: TileSourceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        from: usize,
        to: usize,
    },

    /// Swap the tile at INDEX with its neighbour.
    Step {
        #[command(flatten)]
        source: TileSourceArgs,
        index: usize,
        #[arg(value_enum)]
        direction: DirectionArg,
    },

    /// Restore the canonical tile order.
    Reset {
        #[command(flatten)]
        source: TileSourceArgs,

        /// Delete the snapshot instead of overwriting it.
        #[arg(long = "forget")]
        forget: bool,
    },

    /// Write the current order as JSON.
    Export {
        #[command(flatten)]
        source: TileSourceArgs,

        /// Output file (default: stdout).
        #[arg(long = "out", short = 'o', value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Replace the order with a JSON array of tiles.
    Import {
        #[command(flatten)]
        source: TileSourceArgs,

        /// Input file, or `-` for stdin.
        #[arg(value_name = "PATH")]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
