//! Structural checks on repaired code before it is handed to the renderer:
//! the file must import manim, declare a Scene subclass, and define a
//! `construct` method. Catching these here turns an opaque renderer failure
//! into a precise 400.

use super::parse::{node_text, parse_python};
use super::scene;
use tree_sitter::Node;

#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("generated code does not import the manim library")]
    MissingImport,

    #[error("generated code does not declare a Scene subclass")]
    MissingSceneClass,

    #[error("generated code has no construct(self) method")]
    MissingConstruct,
}

pub fn validate(code: &str) -> Result<(), ValidateError> {
    let tree = parse_python(code).ok_or(ValidateError::MissingSceneClass)?;
    let root = tree.root_node();

    if !imports_manim(root, code) {
        return Err(ValidateError::MissingImport);
    }
    if scene::extract_scene_name(code).is_err() {
        return Err(ValidateError::MissingSceneClass);
    }
    if !defines_construct(root, code) {
        return Err(ValidateError::MissingConstruct);
    }
    Ok(())
}

fn imports_manim(node: Node<'_>, source: &str) -> bool {
    match node.kind() {
        "import_from_statement" => node
            .child_by_field_name("module_name")
            .map(|module| node_text(&module, source).starts_with("manim"))
            .unwrap_or(false),
        "import_statement" => node_text(&node, source).contains("manim"),
        _ => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if imports_manim(child, source) {
                    return true;
                }
            }
            false
        }
    }
}

fn defines_construct(node: Node<'_>, source: &str) -> bool {
    if node.kind() == "function_definition" {
        if let Some(name) = node.child_by_field_name("name") {
            if node_text(&name, source) == "construct" {
                return true;
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if defines_construct(child, source) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "from manim import *\n\nclass Intro(Scene):\n    def construct(self):\n        self.play(Create(Circle()))\n";

    #[test]
    fn well_formed_scene_passes() {
        assert!(validate(VALID).is_ok());
    }

    #[test]
    fn plain_import_also_counts() {
        let code = "import manim\n\nclass Intro(manim.Scene):\n    def construct(self):\n        pass\n";
        assert!(validate(code).is_ok());
    }

    #[test]
    fn missing_import_is_rejected() {
        let code = "class Intro(Scene):\n    def construct(self):\n        pass\n";
        assert!(matches!(validate(code), Err(ValidateError::MissingImport)));
    }

    #[test]
    fn missing_scene_class_is_rejected() {
        let code = "from manim import *\n\ndef construct():\n    pass\n";
        assert!(matches!(
            validate(code),
            Err(ValidateError::MissingSceneClass)
        ));
    }

    #[test]
    fn missing_construct_is_rejected() {
        let code = "from manim import *\n\nclass Intro(Scene):\n    def setup(self):\n        pass\n";
        assert!(matches!(
            validate(code),
            Err(ValidateError::MissingConstruct)
        ));
    }
}
