use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use ui5_info::config::{Ui5InfoConfig, config_path};
use ui5_info::version::types::FioriElementsVersion;
use ui5_info::{FilterOptions, Ui5Info, get_default_theme, logging};

#[derive(Parser)]
#[command(name = "ui5-info")]
#[command(version, about = "UI5 version and theme information")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/ui5-info/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available UI5 versions
    Versions(VersionsArgs),
    /// Print the version `Latest` currently stands for
    Latest,
    /// List the themes supported by a version
    Themes {
        /// UI5 version; latest when omitted
        version: Option<String>,
    },
    /// Print the default theme of a version
    DefaultTheme {
        /// UI5 version; latest when omitted
        version: Option<String>,
    },
}

#[derive(Args)]
struct VersionsArgs {
    /// Drop versions below this one
    #[arg(long)]
    min_version: Option<String>,
    /// Merge versions from this snapshot host
    #[arg(long)]
    snapshot_host: Option<String>,
    /// Query npm instead of the official host
    #[arg(long)]
    npm: bool,
    #[arg(long)]
    include_maintained: bool,
    #[arg(long)]
    include_default: bool,
    /// Drop sentinels such as `Latest`
    #[arg(long)]
    only_version_numbers: bool,
    #[arg(long)]
    only_latest_patch: bool,
    /// Pin this version at the top
    #[arg(long)]
    selected: Option<String>,
    /// Raise the floor for Fiori elements OData V4 apps
    #[arg(long)]
    fiori_elements_v4: bool,
}

// Each invocation starts with an empty cache, so the CLI never asks for it.
impl From<VersionsArgs> for FilterOptions {
    fn from(args: VersionsArgs) -> Self {
        FilterOptions {
            use_cache: false,
            min_supported_ui5_version: args.min_version,
            snapshot_versions_host: args.snapshot_host,
            only_npm_version: args.npm,
            include_maintained: args.include_maintained,
            include_default: args.include_default,
            only_version_numbers: args.only_version_numbers,
            only_latest_patch_version: args.only_latest_patch,
            ui5_selected_version: args.selected,
            fiori_elements_version: args.fiori_elements_v4.then_some(FioriElementsVersion::V4),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_file = cli.config.unwrap_or_else(config_path);
    let config = Ui5InfoConfig::load(&config_file)?;
    let info = Ui5Info::new(&config)?;

    match cli.command {
        Command::Versions(args) => print_json(&info.get_versions(&args.into()).await),
        Command::Latest => {
            println!("{}", info.get_latest_version(false).await);
            Ok(())
        }
        Command::Themes { version } => {
            print_json(&info.get_themes_for_version(version.as_deref()).await)
        }
        Command::DefaultTheme { version } => {
            println!("{}", get_default_theme(version.as_deref()));
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref())?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
