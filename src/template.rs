use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use crate::case::{self, Converters};
use crate::config::CustomTemplates;
use crate::utils::{Error, Result};

/// The kinds of file one generation run can produce, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Component,
    Test,
    Story,
}

impl FileKind {
    pub const ALL: [FileKind; 3] = [FileKind::Component, FileKind::Test, FileKind::Story];

    /// Name of the switch enabling this kind; the component is always on.
    pub fn flag(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Test => "withTest",
            Self::Story => "withStory",
        }
    }

    fn builtin_source(self) -> &'static str {
        match self {
            Self::Component => include_str!("../templates/component.vue"),
            Self::Test => include_str!("../templates/test.js"),
            Self::Story => include_str!("../templates/story.js"),
        }
    }

    fn builtin_file_name(self) -> &'static str {
        match self {
            Self::Component => "templatename.vue",
            Self::Test => "templatename.test.tsx",
            Self::Story => "templatename.stories.tsx",
        }
    }

    fn custom_path(self, custom: &CustomTemplates) -> Option<&Path> {
        match self {
            Self::Component => custom.component.as_deref(),
            Self::Test => custom.test.as_deref(),
            Self::Story => custom.story.as_deref(),
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Raw template text and the pattern its output file is named after.
#[derive(Debug, Clone)]
pub struct Template {
    source: Cow<'static, str>,
    file_name: String,
}

impl Template {
    pub fn builtin(kind: FileKind) -> Self {
        Self {
            source: Cow::Borrowed(kind.builtin_source()),
            file_name: kind.builtin_file_name().to_string(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::MissingCustomTemplate {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            source: Cow::Owned(source),
            file_name,
        })
    }

    pub fn file_name(&self, converters: &Converters) -> String {
        converters.substitute_file_name(&self.file_name).into_owned()
    }

    pub fn render(&self, converters: &Converters) -> String {
        converters.substitute(&self.source).into_owned()
    }
}

/// Templates for one run, read once up front.
#[derive(Debug, Default)]
pub struct Templates(IndexMap<FileKind, Template>);

impl Templates {
    /// Loads a template for each of `kinds`. Custom template paths are
    /// relative to `root`; a missing one fails the whole load.
    pub fn load(root: &Path, kinds: &[FileKind], custom: Option<&CustomTemplates>) -> Result<Self> {
        let mut templates = IndexMap::new();
        for &kind in kinds {
            let template = match custom.and_then(|custom| kind.custom_path(custom)) {
                Some(path) => {
                    debug!("using custom {kind} template {}", path.display());
                    Template::load(root.join(path))?
                }
                None => Template::builtin(kind),
            };
            templates.insert(kind, template);
        }
        Ok(Self(templates))
    }

    pub fn get(&self, kind: FileKind) -> Option<&Template> {
        self.0.get(&kind)
    }
}

/// Picks the custom directory pattern: the last non-empty candidate wins.
pub fn custom_directory<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .filter(|candidate| !candidate.is_empty())
        .last()
}

/// Where generated files go.
#[derive(Debug, Clone)]
pub struct Layout {
    pub base: PathBuf,
    pub flat: bool,
    pub custom_directory: Option<String>,
}

impl Layout {
    /// Directory holding every file of the component.
    pub fn directory(&self, converters: &Converters) -> Result<PathBuf> {
        if self.flat {
            return Ok(self.base.clone());
        }
        let name = match &self.custom_directory {
            Some(pattern) => {
                if !case::contains_token(pattern) {
                    return Err(Error::UntemplatableDirectory {
                        pattern: pattern.clone(),
                        name: converters.raw().to_string(),
                    });
                }
                converters.substitute(pattern).into_owned()
            }
            None => converters.raw().to_string(),
        };
        Ok(self.base.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_non_empty_candidate_wins() {
        assert_eq!(custom_directory([None, None]), None);
        assert_eq!(
            custom_directory([Some("global-template-name"), None, Some("type_template_name")]),
            Some("type_template_name")
        );
        assert_eq!(
            custom_directory([Some("TemplateName"), Some(""), None]),
            Some("TemplateName")
        );
        assert_eq!(
            custom_directory([Some("a-templateName"), Some("b-templateName"), Some("c-TemplateName"), Some("cli-template-name")]),
            Some("cli-template-name")
        );
    }

    #[test]
    fn nests_under_component_name() {
        let converters = Converters::new("UserCard");
        let layout = Layout {
            base: PathBuf::from("src/components"),
            flat: false,
            custom_directory: None,
        };
        assert_eq!(
            layout.directory(&converters).unwrap(),
            Path::new("src/components/UserCard")
        );
    }

    #[test]
    fn flat_ignores_directory_pattern() {
        let converters = Converters::new("UserCard");
        let layout = Layout {
            base: PathBuf::from("src/components"),
            flat: true,
            custom_directory: Some(String::from("no token here")),
        };
        assert_eq!(layout.directory(&converters).unwrap(), Path::new("src/components"));
    }

    #[test]
    fn substitutes_directory_pattern() {
        let converters = Converters::new("UserCard");
        let layout = Layout {
            base: PathBuf::from("src"),
            flat: false,
            custom_directory: Some(String::from("template-name-widget")),
        };
        assert_eq!(layout.directory(&converters).unwrap(), Path::new("src/user-card-widget"));
    }

    #[test]
    fn rejects_untemplatable_pattern() {
        let converters = Converters::new("UserCard");
        let layout = Layout {
            base: PathBuf::from("src"),
            flat: false,
            custom_directory: Some(String::from("widgets")),
        };
        assert!(matches!(
            layout.directory(&converters),
            Err(Error::UntemplatableDirectory { pattern, name }) if pattern == "widgets" && name == "UserCard"
        ));
    }

    #[test]
    fn builtin_templates_render() {
        let converters = Converters::new("user card");
        let template = Template::builtin(FileKind::Story);
        assert_eq!(template.file_name(&converters), "user card.stories.tsx");
        let rendered = template.render(&converters);
        assert!(rendered.contains("import UserCard from './user card.vue';"));
        assert!(rendered.contains("<user-card v-bind=\"args\" />"));
        assert!(!case::contains_token(&rendered));
    }

    #[test]
    fn loads_custom_templates_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("tpl")).unwrap();
        fs::write(
            dir.path().join("tpl/TemplateName.spec.ts"),
            "describe('TemplateName', () => {});",
        )
        .unwrap();
        let custom = CustomTemplates {
            test: Some(PathBuf::from("tpl/TemplateName.spec.ts")),
            ..Default::default()
        };
        let templates = Templates::load(
            dir.path(),
            &[FileKind::Component, FileKind::Test],
            Some(&custom),
        )
        .unwrap();

        let converters = Converters::new("userCard");
        let test = templates.get(FileKind::Test).unwrap();
        assert_eq!(test.file_name(&converters), "userCard.spec.ts");
        assert_eq!(test.render(&converters), "describe('UserCard', () => {});");
        assert_eq!(
            templates.get(FileKind::Component).unwrap().file_name(&converters),
            "userCard.vue"
        );
        assert!(templates.get(FileKind::Story).is_none());
    }

    #[test]
    fn missing_custom_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let custom = CustomTemplates {
            component: Some(PathBuf::from("nope/TemplateName.vue")),
            ..Default::default()
        };
        assert!(matches!(
            Templates::load(dir.path(), &[FileKind::Component], Some(&custom)),
            Err(Error::MissingCustomTemplate { .. })
        ));
    }

    #[test]
    fn unused_custom_templates_are_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let custom = CustomTemplates {
            story: Some(PathBuf::from("nope/TemplateName.stories.js")),
            ..Default::default()
        };
        assert!(Templates::load(dir.path(), &[FileKind::Component], Some(&custom)).is_ok());
    }
}
