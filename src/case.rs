use std::borrow::Cow;
use std::sync::OnceLock;

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use indexmap::IndexMap;
use regex::{Captures, Regex};

/// Placeholder tokens recognized in templates, file names and directory patterns.
pub const TOKENS: [&str; 6] = [
    "templatename",
    "TemplateName",
    "templateName",
    "template-name",
    "template_name",
    "TEMPLATE_NAME",
];

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let alternation = TOKENS
            .iter()
            .map(|token| regex::escape(token))
            .collect::<Vec<String>>()
            .join("|");
        Regex::new(&alternation).unwrap()
    })
}

/// Whether `source` holds at least one of the placeholder tokens.
pub fn contains_token(source: &str) -> bool {
    token_pattern().is_match(source)
}

/// The component name rendered once per placeholder token.
#[derive(Debug, Clone)]
pub struct Converters(IndexMap<&'static str, String>);

impl Converters {
    pub fn new(name: &str) -> Self {
        let variants = [
            name.to_string(),
            name.to_upper_camel_case(),
            name.to_lower_camel_case(),
            name.to_kebab_case(),
            name.to_snake_case(),
            name.to_shouty_snake_case(),
        ];
        Self(TOKENS.into_iter().zip(variants).collect())
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.0.get(token).map(String::as_str)
    }

    /// The name exactly as it was typed.
    pub fn raw(&self) -> &str {
        &self.0["templatename"]
    }

    /// Replaces every token in one pass. Replacement text is never rescanned.
    pub fn substitute<'a>(&self, source: &'a str) -> Cow<'a, str> {
        self.replace_with(source, |token| self.0[token].as_str())
    }

    /// Like [`Converters::substitute`], except that `TemplateName` in a file
    /// name stands for the name as typed, mirroring the default file names.
    pub fn substitute_file_name<'a>(&self, file_name: &'a str) -> Cow<'a, str> {
        self.replace_with(file_name, |token| match token {
            "TemplateName" => self.raw(),
            token => self.0[token].as_str(),
        })
    }

    fn replace_with<'a, 's, F>(&'s self, source: &'a str, lookup: F) -> Cow<'a, str>
    where
        F: Fn(&str) -> &'s str,
    {
        token_pattern().replace_all(source, |captures: &Captures| {
            lookup(captures.get(0).map_or("", |m| m.as_str())).to_string()
        })
    }
}
