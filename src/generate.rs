use std::path::Path;

use anyhow::{Context as _, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Args;
use colored::Colorize;
use indexmap::IndexMap;

use gvc::component::{Options, Outcome, Plan, Report};
use gvc::template::FileKind;

use crate::App;

#[derive(Clone, Args)]
pub(crate) struct Generate {
    #[arg(
        help = "Name of the component to be generated.",
        value_parser = NonEmptyStringValueParser::new(),
    )]
    name: String,
    #[arg(
        long = "type",
        value_name = "TYPE",
        help = "Component type to use, as configured under 'component' in the config file."
    )]
    component_type: Option<String>,
    #[arg(
        short = 'p',
        long = "path",
        help = "Directory the component is generated in. [default: from config]"
    )]
    path: Option<String>,
    #[arg(
        short = 'f',
        long = "flat",
        help = "Generate files directly in the path instead of a new directory for the component."
    )]
    flat: bool,
    #[arg(
        long = "customDirectory",
        value_name = "PATTERN",
        help = "Directory name pattern containing a template name token, e.g. 'template-name'."
    )]
    custom_directory: Option<String>,
    #[arg(
        long = "withTest",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Generate a corresponding test file. [default: from config]"
    )]
    with_test: Option<String>,
    #[arg(
        long = "withStory",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Generate a corresponding story file. [default: from config]"
    )]
    with_story: Option<String>,
    #[arg(
        long = "dry-run",
        help = "Show what would be generated without changing any files."
    )]
    dry_run: bool,
}

impl Generate {
    fn options(&self) -> Options {
        let switches = [
            (FileKind::Test, &self.with_test),
            (FileKind::Story, &self.with_story),
        ]
        .into_iter()
        .filter_map(|(kind, value)| Some((kind.flag().to_string(), value.clone()?)))
        .collect::<IndexMap<String, String>>();
        Options {
            component_type: self.component_type.clone(),
            path: self.path.clone(),
            flat: self.flat.then_some(true),
            custom_directory: self.custom_directory.clone(),
            switches,
        }
    }
}

impl App {
    pub(crate) fn generate(&self) -> Result<()> {
        let args = &self.cli.generate;
        let root = self.project.root();

        let plan = Plan::new(root, &args.name, &self.config, &args.options())
            .context(format!("failed to generate component: {}", args.name))?;

        for report in plan.apply(args.dry_run) {
            print_report(root, &report);
        }

        if args.dry_run {
            println!();
            println!(
                "{}",
                "NOTE: The \"dry-run\" flag means no changes were made.".yellow()
            );
        }

        Ok(())
    }
}

fn print_report(root: &Path, report: &Report) {
    let file = &report.file;
    let path = file.path.strip_prefix(root).unwrap_or(&file.path).display();
    match &report.outcome {
        Outcome::Created | Outcome::WouldCreate => println!(
            "{}",
            format!("{} was successfully created at {path}", file.file_name).green()
        ),
        Outcome::Exists => eprintln!(
            "{}",
            format!("{} already exists in this path \"{path}\".", file.file_name).red()
        ),
        Outcome::Failed(err) => {
            eprintln!(
                "{}",
                format!("{} failed and was not created.", file.file_name).red()
            );
            eprintln!("{err}");
            log::error!("writing {} failed: {err:?}", file.path.display());
        }
    }
}
