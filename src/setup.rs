use anyhow::{Context as _, Result};
use colored::Colorize;
use serde_json::Value;

use gvc::config::{Project, Status, CONFIG_FILE_NAME};
use gvc::question::COMPONENT_QUESTIONS;

use crate::prompt::Terminal;

const RULE: &str = "--------------------------------------------------------------------------------";

fn banner(lines: &[String]) {
    println!();
    println!("{}", RULE.cyan());
    for line in lines {
        println!("{}", line.cyan());
    }
    println!("{}", RULE.cyan());
    println!();
}

fn before_prompt(status: Status) {
    match status {
        Status::Created => banner(&[
            String::from("It looks like this is the first time that you're running gvc within this project."),
            String::new(),
            format!(
                "Answer a few questions to customize gvc for your project needs (this will create a \"{CONFIG_FILE_NAME}\" config file on the root level of this project)."
            ),
        ]),
        Status::Updated => banner(&[
            String::from("gvc has been updated and has a few new features from the last time you ran it within this project."),
            String::new(),
            format!("Please answer a few questions to update the \"{CONFIG_FILE_NAME}\" config file."),
        ]),
        Status::Unchanged => {}
    }
}

/// Loads the project config, prompting for whatever it lacks.
pub(crate) fn sync_config(project: &Project) -> Result<Value> {
    let existed = project.config_path().exists();
    let (document, status) = project
        .sync_config(COMPONENT_QUESTIONS, &mut Terminal, before_prompt)
        .with_context(|| match existed {
            true => format!("could not update the \"{CONFIG_FILE_NAME}\" config file"),
            false => format!("could not create a \"{CONFIG_FILE_NAME}\" config file"),
        })?;

    let done = match status {
        Status::Unchanged => return Ok(document),
        Status::Created => format!(
            "The \"{CONFIG_FILE_NAME}\" config file has been successfully created on the root level of your project."
        ),
        Status::Updated => {
            format!("The \"{CONFIG_FILE_NAME}\" config file has successfully been updated for this project.")
        }
    };
    println!();
    println!("{}", done.cyan());
    println!();
    println!("{}", "You can always go back and update it as needed.".cyan());
    println!();
    println!("{}", "Happy Hacking!".cyan());
    println!();
    Ok(document)
}
