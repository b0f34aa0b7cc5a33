//! CLI argument definitions for `thematic`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use thematic_core::{ResourceKind, ViewType};

#[derive(Parser)]
#[command(
    name = "thematic",
    version,
    about = "Resolve theme resources across inherited themes",
    long_about = "Resolve theme resources across inherited themes.\n\n\
                  Themes live in ordered roots (for example app overrides before vendor\n\
                  bundles) and may extend a parent theme. Lookups fall back from a theme\n\
                  to its parents, so a child only carries the files it overrides."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: $THEMATIC_SETTINGS, then ./thematic.toml).
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

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
    /// Resolve an identifier to a file or directory.
    Resolve(ResolveArgs),

    /// Resolve an identifier to the template file that renders it.
    View(ResolveArgs),

    /// List the flattened resources of a theme.
    List(ListArgs),

    /// Copy the flattened file tree of a theme into a directory.
    Dump(DumpArgs),

    /// Show the configuration a theme sees after inheritance.
    Config(ConfigArgs),

    /// List the themes found under the configured roots.
    Themes(ThemesArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Identifier such as `card`, `base.card`, `base.elements.card` or
    /// `thematic::base.elements.card`.
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: String,

    /// View type assumed when the identifier has no type segment.
    #[arg(long = "type", value_enum, default_value = "elements")]
    pub view_type: ViewTypeArg,

    /// Theme used for bare identifiers.
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,

    /// View file being rendered; its theme is used for bare identifiers.
    #[arg(long = "from-view", value_name = "PATH")]
    pub from_view: Option<PathBuf>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(value_name = "THEME")]
    pub theme: String,

    /// Restrict the listing to a subdirectory (repeatable), e.g. `elements`.
    #[arg(long = "subset", value_name = "DIR")]
    pub subsets: Vec<String>,

    /// Only list files or only directories.
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Ignore parent themes.
    #[arg(long = "no-ancestry")]
    pub no_ancestry: bool,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DumpArgs {
    #[arg(value_name = "THEME")]
    pub theme: String,

    /// Destination directory.
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// Only copy files with these extensions (comma separated).
    #[arg(long = "ext", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Ignore parent themes.
    #[arg(long = "no-ancestry")]
    pub no_ancestry: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[arg(value_name = "THEME")]
    pub theme: String,

    /// Show only the theme's own configuration, without inherited keys.
    #[arg(long)]
    pub own: bool,

    /// Print JSON instead of TOML.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ThemesArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewTypeArg {
    Elements,
    Layouts,
    Templates,
}

impl From<ViewTypeArg> for ViewType {
    fn from(arg: ViewTypeArg) -> Self {
        match arg {
            ViewTypeArg::Elements => ViewType::Elements,
            ViewTypeArg::Layouts => ViewType::Layouts,
            ViewTypeArg::Templates => ViewType::Templates,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    File,
    Directory,
}

impl From<KindArg> for ResourceKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::File => ResourceKind::File,
            KindArg::Directory => ResourceKind::Directory,
        }
    }
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
