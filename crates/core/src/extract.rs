//! Extractor: syntax tree to semantic model.
//!
//! Reads class names and field names off the tree in declaration order.
//! Default-value literals are present in the tree but not evaluated, so
//! every extracted field has no default. Extraction cannot fail.

use crate::ast::{ClassDefinitionNode, FieldDeclarationNode, ProgramNode};
use crate::model::{ClassDefinition, FieldDefinition, Program};

pub fn extract(program: &ProgramNode) -> Program {
    Program {
        classes: program.class_definitions().map(extract_class).collect(),
        ..Program::default()
    }
}

fn extract_class(node: &ClassDefinitionNode) -> ClassDefinition {
    ClassDefinition {
        name: node.name.image.clone(),
        fields: node.field_declarations().map(extract_field).collect(),
        methods: Vec::new(),
    }
}

fn extract_field(node: &FieldDeclarationNode) -> FieldDefinition {
    FieldDefinition {
        name: strip_delimiters(&node.name.image).to_owned(),
        default: None,
    }
}

/// Drop exactly the first and last character (the quote delimiters).
fn strip_delimiters(image: &str) -> &str {
    let mut chars = image.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer, parser};

    fn extract_src(src: &str) -> Program {
        let lexed = lexer::tokenize(src);
        assert!(lexed.errors.is_empty());
        let parsed = parser::parse(&lexed.tokens);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        extract(&parsed.program)
    }

    #[test]
    fn empty_tree_yields_no_classes() {
        let p = extract(&ProgramNode::default());
        assert!(p.classes.is_empty());
        assert!(p.instances.is_empty());
        assert!(p.errors.is_empty());
    }

    #[test]
    fn classes_and_fields_in_declaration_order() {
        let p = extract_src(
            r#"
define Person
  Person has field "name"
  Person has field "age" has default "0"
define Empty
define Pet
  Pet has field "species"
"#,
        );
        let names: Vec<_> = p.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Person", "Empty", "Pet"]);

        let person = &p.classes[0];
        assert_eq!(person.field_names().collect::<Vec<_>>(), vec!["name", "age"]);
        assert!(person.fields.iter().all(|f| f.default.is_none()));
        assert!(person.methods.is_empty());
        assert!(p.classes[1].fields.is_empty());
    }

    #[test]
    fn field_owner_is_not_checked_against_class() {
        let p = extract_src("define A B has field \"x\"");
        assert_eq!(p.classes[0].name, "A");
        assert_eq!(p.classes[0].fields[0].name, "x");
    }

    #[test]
    fn strip_delimiters_removes_exactly_one_char_each_side() {
        assert_eq!(strip_delimiters("\"title\""), "title");
        assert_eq!(strip_delimiters("\"\""), "");
        assert_eq!(strip_delimiters("\"a b\""), "a b");
        assert_eq!(strip_delimiters("\"é\""), "é");
    }
}
