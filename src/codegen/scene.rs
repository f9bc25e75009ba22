//! Scene-name extraction: find the class the renderer should be told to run.
//!
//! Walks the parsed syntax tree for the first class whose base list names
//! `Scene` (bare or dotted, e.g. `manim.Scene`). Tree-walking survives the
//! formatting variance that broke the old line-prefix scanning, such as
//! `class  Intro (Scene) :`.

use super::parse::{node_text, parse_python};
use tree_sitter::Node;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("no Scene subclass found in generated code")]
    NoEntryPoint,
}

/// Name of the first `Scene` subclass declared in `code`.
pub fn extract_scene_name(code: &str) -> Result<String, SceneError> {
    let tree = parse_python(code).ok_or(SceneError::NoEntryPoint)?;
    find_scene_class(tree.root_node(), code).ok_or(SceneError::NoEntryPoint)
}

fn find_scene_class(node: Node<'_>, source: &str) -> Option<String> {
    if node.kind() == "class_definition" {
        if let (Some(name), Some(supers)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("superclasses"),
        ) {
            if has_scene_base(supers, source) {
                return Some(node_text(&name, source).to_string());
            }
        }
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_scene_class(child, source) {
            return Some(found);
        }
    }
    None
}

fn has_scene_base(superclasses: Node<'_>, source: &str) -> bool {
    let mut cursor = superclasses.walk();
    for base in superclasses.named_children(&mut cursor) {
        let matches = match base.kind() {
            "identifier" => node_text(&base, source) == "Scene",
            "attribute" => base
                .child_by_field_name("attribute")
                .map(|attr| node_text(&attr, source) == "Scene")
                .unwrap_or(false),
            _ => false,
        };
        if matches {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_scene_subclass_name() {
        let code = "from manim import *\n\nclass Intro(Scene):\n    def construct(self):\n        pass\n";
        assert_eq!(extract_scene_name(code).unwrap(), "Intro");
    }

    #[test]
    fn tolerates_loose_formatting() {
        let code = "class  Intro ( Scene ) :\n    pass\n";
        assert_eq!(extract_scene_name(code).unwrap(), "Intro");
    }

    #[test]
    fn accepts_dotted_base() {
        let code = "import manim\n\nclass Spiral(manim.Scene):\n    pass\n";
        assert_eq!(extract_scene_name(code).unwrap(), "Spiral");
    }

    #[test]
    fn first_scene_class_wins() {
        let code = "class A(Scene):\n    pass\n\nclass B(Scene):\n    pass\n";
        assert_eq!(extract_scene_name(code).unwrap(), "A");
    }

    #[test]
    fn scans_past_non_matching_bases() {
        let code = "class Main(Helper, Scene):\n    pass\n";
        assert_eq!(extract_scene_name(code).unwrap(), "Main");
    }

    #[test]
    fn skips_non_scene_classes() {
        let code = "class Helper:\n    pass\n\nclass Shape(Mobject):\n    pass\n\nclass Main(Scene):\n    pass\n";
        assert_eq!(extract_scene_name(code).unwrap(), "Main");
    }

    #[test]
    fn no_scene_class_is_an_error() {
        let code = "def construct():\n    pass\n";
        assert!(matches!(
            extract_scene_name(code),
            Err(SceneError::NoEntryPoint)
        ));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(extract_scene_name("").is_err());
    }
}
