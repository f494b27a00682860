use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use crate::case::Converters;
use crate::config::{ComponentType, ConfigFile};
use crate::question::DEFAULT_COMPONENT_PATH;
use crate::template::{self, FileKind, Layout, Templates};
use crate::utils::{self, Result};

/// Command-line overrides for one generation run.
#[derive(Debug, Default, Clone)]
pub struct Options {
    pub component_type: Option<String>,
    pub path: Option<String>,
    pub flat: Option<bool>,
    pub custom_directory: Option<String>,
    /// Raw `with*` switch values, keyed by switch name.
    pub switches: IndexMap<String, String>,
}

impl Options {
    fn enables(&self, kind: FileKind, selected: &ComponentType, default: &ComponentType) -> bool {
        if kind == FileKind::Component {
            return true;
        }
        let flag = kind.flag();
        match self.switches.get(flag) {
            Some(value) => value == "true",
            None => selected
                .flag(flag)
                .or_else(|| default.flag(flag))
                .unwrap_or(false),
        }
    }
}

/// A file ready to be written.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub kind: FileKind,
    pub file_name: String,
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug)]
pub enum Outcome {
    Created,
    WouldCreate,
    Exists,
    Failed(io::Error),
}

#[derive(Debug)]
pub struct Report {
    pub file: PlannedFile,
    pub outcome: Outcome,
}

/// Everything one run will write. Building it reads templates and settles
/// every fatal error before the filesystem is touched.
#[derive(Debug)]
pub struct Plan {
    pub files: Vec<PlannedFile>,
}

impl Plan {
    pub fn new(root: &Path, name: &str, config: &ConfigFile, options: &Options) -> Result<Self> {
        let converters = Converters::new(name);
        let default = config.default_type();
        let selected = config.component_type(options.component_type.as_deref())?;

        let kinds = FileKind::ALL
            .into_iter()
            .filter(|&kind| options.enables(kind, selected, default))
            .collect::<Vec<FileKind>>();
        let templates = Templates::load(root, &kinds, selected.custom_templates.as_ref())?;

        let path = options
            .path
            .as_deref()
            .or(selected.path.as_deref())
            .or(default.path.as_deref())
            .unwrap_or(DEFAULT_COMPONENT_PATH);
        let flat = options
            .flat
            .or(selected.flat)
            .or(default.flat)
            .unwrap_or(false);
        let custom_directory = template::custom_directory([
            config.custom_directory.as_deref(),
            default.custom_directory.as_deref(),
            selected.custom_directory.as_deref(),
            options.custom_directory.as_deref(),
        ]);
        let layout = Layout {
            base: root.join(path),
            flat,
            custom_directory: custom_directory.map(str::to_string),
        };
        let directory = layout.directory(&converters)?;
        debug!("generating {kinds:?} into {}", directory.display());

        let files = kinds
            .into_iter()
            .filter_map(|kind| templates.get(kind).map(|template| (kind, template)))
            .map(|(kind, template)| {
                let file_name = template.file_name(&converters);
                PlannedFile {
                    kind,
                    path: directory.join(&file_name),
                    file_name,
                    contents: template.render(&converters),
                }
            })
            .collect();
        Ok(Self { files })
    }

    /// Writes each file in order, skipping any whose destination exists or
    /// was claimed by an earlier file of this plan. With `dry_run` nothing is
    /// written, but the outcomes match those of a real run.
    pub fn apply(self, dry_run: bool) -> Vec<Report> {
        let mut claimed = HashSet::new();
        self.files
            .into_iter()
            .map(|file| {
                let outcome = if file.path.exists() || !claimed.insert(file.path.clone()) {
                    Outcome::Exists
                } else if dry_run {
                    Outcome::WouldCreate
                } else {
                    match utils::write_all(&file.path, &file.contents) {
                        Ok(()) => Outcome::Created,
                        Err(err) => Outcome::Failed(err),
                    }
                };
                Report { file, outcome }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::utils::Error;

    fn config(document: serde_json::Value) -> ConfigFile {
        ConfigFile::from_value(&document).unwrap()
    }

    fn kinds(plan: &Plan) -> Vec<FileKind> {
        plan.files.iter().map(|file| file.kind).collect()
    }

    #[test]
    fn config_switches_pick_file_kinds() {
        let config = config(json!({"component": {"default": {
            "path": "src/components", "withTest": true, "withStory": false
        }}}));
        let plan = Plan::new(Path::new("/p"), "UserCard", &config, &Options::default()).unwrap();
        assert_eq!(kinds(&plan), [FileKind::Component, FileKind::Test]);
        assert_eq!(
            plan.files[0].path,
            Path::new("/p/src/components/UserCard/UserCard.vue")
        );
        assert_eq!(
            plan.files[1].path,
            Path::new("/p/src/components/UserCard/UserCard.test.tsx")
        );
    }

    #[test]
    fn cli_switches_override_config() {
        let config = config(json!({"component": {"default": {
            "withTest": true, "withStory": false
        }}}));
        let options = Options {
            switches: IndexMap::from([
                (String::from("withTest"), String::from("false")),
                (String::from("withStory"), String::from("true")),
            ]),
            ..Default::default()
        };
        let plan = Plan::new(Path::new("/p"), "UserCard", &config, &options).unwrap();
        assert_eq!(kinds(&plan), [FileKind::Component, FileKind::Story]);
        assert_eq!(
            plan.files[1].path,
            Path::new("/p/src/components/UserCard/UserCard.stories.tsx")
        );
    }

    #[test]
    fn component_type_falls_back_to_default() {
        let config = config(json!({"component": {
            "default": {"path": "src/components", "withStory": true},
            "page": {"path": "src/pages", "flat": true}
        }}));
        let options = Options {
            component_type: Some(String::from("page")),
            ..Default::default()
        };
        let plan = Plan::new(Path::new("/p"), "Home", &config, &options).unwrap();
        assert_eq!(kinds(&plan), [FileKind::Component, FileKind::Story]);
        assert_eq!(plan.files[0].path, Path::new("/p/src/pages/Home.vue"));
    }

    #[test]
    fn unknown_component_type_is_fatal() {
        let config = config(json!({"component": {"default": {}}}));
        let options = Options {
            component_type: Some(String::from("layout")),
            ..Default::default()
        };
        assert!(matches!(
            Plan::new(Path::new("/p"), "Home", &config, &options),
            Err(Error::UnknownComponentType(_))
        ));
    }

    #[test]
    fn cli_path_and_flat_win() {
        let config = config(json!({"component": {"default": {"path": "src/components"}}}));
        let options = Options {
            path: Some(String::from("lib")),
            flat: Some(true),
            ..Default::default()
        };
        let plan = Plan::new(Path::new("/p"), "Home", &config, &options).unwrap();
        assert_eq!(plan.files[0].path, Path::new("/p/lib/Home.vue"));
    }

    #[test]
    fn custom_directory_precedence() {
        let config = config(json!({
            "customDirectory": "global-TemplateName",
            "component": {
                "default": {"customDirectory": "default-template-name"},
                "page": {"customDirectory": "page_template_name"}
            }
        }));
        let plan = Plan::new(Path::new("/p"), "UserCard", &config, &Options::default()).unwrap();
        assert_eq!(
            plan.files[0].path,
            Path::new("/p/src/components/default-user-card/UserCard.vue")
        );

        let page = Options {
            component_type: Some(String::from("page")),
            ..Default::default()
        };
        let plan = Plan::new(Path::new("/p"), "UserCard", &config, &page).unwrap();
        assert_eq!(
            plan.files[0].path,
            Path::new("/p/src/components/page_user_card/UserCard.vue")
        );

        let cli = Options {
            component_type: Some(String::from("page")),
            custom_directory: Some(String::from("TEMPLATE_NAME")),
            ..Default::default()
        };
        let plan = Plan::new(Path::new("/p"), "UserCard", &config, &cli).unwrap();
        assert_eq!(
            plan.files[0].path,
            Path::new("/p/src/components/USER_CARD/UserCard.vue")
        );
    }

    #[test]
    fn untemplatable_directory_is_fatal() {
        let config = config(json!({"component": {"default": {"customDirectory": "widgets"}}}));
        assert!(matches!(
            Plan::new(Path::new("/p"), "UserCard", &config, &Options::default()),
            Err(Error::UntemplatableDirectory { .. })
        ));
    }

    #[test]
    fn rendered_contents_have_no_tokens_left() {
        let config = config(json!({"component": {"default": {"withTest": true, "withStory": true}}}));
        let plan = Plan::new(Path::new("/p"), "user-card", &config, &Options::default()).unwrap();
        for file in &plan.files {
            assert!(!crate::case::contains_token(&file.contents), "{}", file.file_name);
        }
        assert!(plan.files[0].contents.contains("class=\"user-card\""));
        assert!(plan.files[1].contents.contains("import UserCard from './user-card.vue';"));
    }
}
