mod generate;
mod prompt;
mod setup;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;

use gvc::config::{ConfigFile, Project};

use crate::generate::Generate;

#[derive(Parser)]
#[command(version)]
#[command(verbatim_doc_comment)]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
#[command(arg_required_else_help = true)]
#[command(about = "Generate Vue components from templates.")]
struct Cli {
    #[command(flatten)]
    generate: Generate,

    #[arg(
        short = 'h',
        long = "help",
        help = "Print this help message.",
        action = ArgAction::Help,
    )]
    help: Option<bool>,

    #[arg(
        short = 'V',
        long = "version",
        help = "Print version information.",
        action = ArgAction::Version,
    )]
    version: Option<bool>,
}

pub(crate) struct App {
    cli: Cli,
    project: Project,
    config: ConfigFile,
}

impl App {
    fn init() -> Result<Self> {
        let cli = Cli::parse();
        let root = std::env::current_dir().context("failed to locate current directory")?;
        let project = Project::open(root).context(
            "please make sure that you're running gvc from the root level of your project",
        )?;
        let document = setup::sync_config(&project)?;
        let config = ConfigFile::from_value(&document).context(format!(
            "invalid config file: {}",
            project.config_path().display()
        ))?;
        Ok(Self {
            cli,
            project,
            config,
        })
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match App::init().and_then(|app| app.generate()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format!("ERROR: {err:#}").red().bold());
            ExitCode::FAILURE
        }
    }
}
