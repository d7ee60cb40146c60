//! Semantic model extracted from a syntax tree.
//!
//! These are plain data records. Lookups by name use first-match semantics:
//! names are not required to be unique and the earliest declaration wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A literal value. Only used by the model shape today; default values and
/// instance state are not evaluated yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name without its quote delimiters.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    /// Declaration order.
    pub fields: Vec<FieldDefinition>,
    pub methods: Vec<MethodDefinition>,
}

impl ClassDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDefinition {
            name: name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// First field declared with `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub class_name: String,
    pub values: BTreeMap<String, Value>,
}

/// Output of one pipeline run.
///
/// When `errors` is non-empty, `classes` and `instances` are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub classes: Vec<ClassDefinition>,
    pub instances: Vec<Instance>,
    pub errors: Vec<String>,
}

/// Result of [`crate::execute`].
pub type ExecutionResult = Program;

impl Program {
    /// A result carrying only errors.
    pub fn failed(errors: Vec<String>) -> Self {
        Program {
            errors,
            ..Program::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// First class declared with `name`.
    pub fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> FieldDefinition {
        FieldDefinition {
            name: name.into(),
            default: None,
        }
    }

    #[test]
    fn lookups_return_first_match() {
        let mut first = ClassDefinition::new("Dup");
        first.fields = vec![field("a"), field("b"), field("a")];
        let second = ClassDefinition::new("Dup");
        let program = Program {
            classes: vec![first.clone(), second],
            ..Program::default()
        };

        let found = program.class("Dup").expect("class");
        assert_eq!(found.fields.len(), 3);
        assert!(std::ptr::eq(found.field("a").unwrap(), &found.fields[0]));
        assert!(found.field("missing").is_none());
        assert_eq!(found.field_names().collect::<Vec<_>>(), vec!["a", "b", "a"]);
        assert!(program.class("Nope").is_none());
    }

    #[test]
    fn unset_default_is_omitted_from_json() {
        let json = serde_json::to_value(field("title")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "title" }));

        let back: FieldDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(back.default, None);
    }

    #[test]
    fn failed_result_has_no_classes() {
        let p = Program::failed(vec!["bad".into()]);
        assert!(!p.is_ok());
        assert!(p.classes.is_empty());
        assert!(p.instances.is_empty());
    }
}
