use serde_json::{Map, Value};

use crate::utils::Result;

pub const DEFAULT_COMPONENT_PATH: &str = "src/components";

#[derive(Debug, Clone, Copy)]
pub enum Kind {
    Input { default: Option<&'static str> },
    Confirm { default: bool },
}

/// One expected config key and how to ask for it.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    /// Dot-separated key path, e.g. `component.default.path`.
    pub key: &'static str,
    pub message: &'static str,
    pub kind: Kind,
    /// Gates whether the question applies to the current document.
    pub when: Option<fn(&Value) -> bool>,
}

impl Question {
    pub fn applies_to(&self, document: &Value) -> bool {
        self.when.map_or(true, |when| when(document))
    }
}

pub const COMPONENT_QUESTIONS: &[Question] = &[
    Question {
        key: "component.default.path",
        message: "Set the default path directory to where your components will be generated in?",
        kind: Kind::Input {
            default: Some(DEFAULT_COMPONENT_PATH),
        },
        when: None,
    },
    Question {
        key: "component.default.withTest",
        message: "Would you like to create a corresponding test file with each component you generate?",
        kind: Kind::Confirm { default: true },
        when: None,
    },
    Question {
        key: "component.default.withStory",
        message: "Would you like to create a corresponding story with each component you generate?",
        kind: Kind::Confirm { default: true },
        when: None,
    },
];

/// Answers questions on behalf of the user.
pub trait Prompter {
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String>;
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
}

pub fn ask(prompter: &mut dyn Prompter, question: &Question) -> Result<Value> {
    let value = match question.kind {
        Kind::Input { default } => Value::String(prompter.input(question.message, default)?),
        Kind::Confirm { default } => Value::Bool(prompter.confirm(question.message, default)?),
    };
    Ok(value)
}

/// Asks each question in order and nests the answers under their key paths.
pub fn ask_all<'q, I>(prompter: &mut dyn Prompter, questions: I) -> Result<Value>
where
    I: IntoIterator<Item = &'q Question>,
{
    let mut answers = Value::Object(Map::new());
    for question in questions {
        let value = ask(prompter, question)?;
        set_path(&mut answers, question.key, value);
    }
    Ok(answers)
}

pub fn lookup<'v>(document: &'v Value, key: &str) -> Option<&'v Value> {
    key.split('.')
        .try_fold(document, |value, segment| value.as_object()?.get(segment))
}

/// Questions whose key is absent from `document` and which apply to it.
pub fn missing<'q>(questions: &'q [Question], document: &Value) -> Vec<&'q Question> {
    questions
        .iter()
        .filter(|question| lookup(document, question.key).is_none())
        .filter(|question| question.applies_to(document))
        .collect()
}

pub fn set_path(document: &mut Value, key: &str, value: Value) {
    let mut segments = key.split('.').peekable();
    let mut current = document;
    while let Some(segment) = segments.next() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let object = match current {
            Value::Object(object) => object,
            _ => unreachable!("value was just made an object"),
        };
        if segments.peek().is_none() {
            object.insert(segment.to_string(), value);
            return;
        }
        current = object
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

/// Deep-merges `answers` into `base`. Values already in `base` win; answers
/// only fill gaps. A non-object in `base` gives way when an answer needs to
/// nest beneath it.
pub fn merge(base: &mut Value, answers: Value) {
    match (base, answers) {
        (Value::Object(base), Value::Object(answers)) => {
            for (key, answer) in answers {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, answer),
                    None => {
                        base.insert(key, answer);
                    }
                }
            }
        }
        (base, answers @ Value::Object(_)) => *base = answers,
        _ => {}
    }
}
