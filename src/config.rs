use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, error};
use serde::Deserialize;
use serde_json::Value;

use crate::question::{self, Prompter, Question};
use crate::utils::{self, Error, Result};

pub const CONFIG_FILE_NAME: &str = "generate-vue-cli.json";
pub const PROJECT_MARKER: &str = "package.json";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTemplates {
    pub component: Option<PathBuf>,
    pub test: Option<PathBuf>,
    pub story: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentType {
    pub path: Option<String>,
    pub flat: Option<bool>,
    #[serde(default, deserialize_with = "utils::string_only")]
    pub custom_directory: Option<String>,
    pub custom_templates: Option<CustomTemplates>,
    /// `with*` switches and anything else the user keeps alongside.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ComponentType {
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.extra.get(name).map(utils::is_truthy)
    }
}

/// Typed view of `generate-vue-cli.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default, deserialize_with = "utils::string_only")]
    pub custom_directory: Option<String>,
    pub component: IndexMap<String, ComponentType>,
}

impl ConfigFile {
    pub fn from_value(document: &Value) -> Result<Self> {
        let config = Self::deserialize(document).map_err(Error::InvalidConfig)?;
        if !config.component.contains_key("default") {
            return Err(Error::MissingDefaultComponent);
        }
        Ok(config)
    }

    pub fn default_type(&self) -> &ComponentType {
        &self.component["default"]
    }

    /// Resolves `--type`, falling back to `default` when none is given.
    pub fn component_type(&self, name: Option<&str>) -> Result<&ComponentType> {
        match name {
            None => Ok(self.default_type()),
            Some(name) => self
                .component
                .get(name)
                .ok_or_else(|| Error::UnknownComponentType(name.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Unchanged,
    Created,
    Updated,
}

/// A project root holding the persisted config.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Fails unless `root` looks like a project root.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let marker = root.join(PROJECT_MARKER);
        fs::File::open(&marker).map_err(|source| Error::NotProjectRoot {
            path: marker,
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn read_config(&self) -> Result<Option<Value>> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).map_err(|source| {
            error!("could not read {}: {source}", path.display());
            Error::ReadConfig {
                path: path.clone(),
                source,
            }
        })?;
        let document = serde_json::from_str(&contents).map_err(|source| {
            error!("could not parse {}: {source}", path.display());
            Error::ParseConfig { path, source }
        })?;
        Ok(Some(document))
    }

    pub fn write_config(&self, document: &Value) -> Result<()> {
        let path = self.config_path();
        let mut contents = serde_json::to_string_pretty(document).map_err(Error::InvalidConfig)?;
        contents.push('\n');
        utils::write_all(&path, contents).map_err(|source| {
            error!("could not write {}: {source}", path.display());
            Error::WriteConfig { path, source }
        })
    }

    /// Loads the config, asking only for what is missing, and persists any
    /// answers. `before_prompt` runs once, right before the first question.
    pub fn sync_config<F>(
        &self,
        questions: &[Question],
        prompter: &mut dyn Prompter,
        before_prompt: F,
    ) -> Result<(Value, Status)>
    where
        F: FnOnce(Status),
    {
        let Some(mut document) = self.read_config()? else {
            debug!("no config at {}, creating one", self.config_path().display());
            before_prompt(Status::Created);
            let empty = Value::Object(Default::default());
            let answers = question::ask_all(
                prompter,
                questions.iter().filter(|question| question.applies_to(&empty)),
            )?;
            self.write_config(&answers)?;
            return Ok((answers, Status::Created));
        };

        let missing = question::missing(questions, &document);
        if missing.is_empty() {
            return Ok((document, Status::Unchanged));
        }
        debug!(
            "config is missing {:?}",
            missing.iter().map(|question| question.key).collect::<Vec<_>>()
        );
        before_prompt(Status::Updated);
        let answers = question::ask_all(prompter, missing)?;
        question::merge(&mut document, answers);
        self.write_config(&document)?;
        Ok((document, Status::Updated))
    }
}
