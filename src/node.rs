//! Node Model
//!
//! The in-memory shape of one design-tree element as handed over by the tree
//! parser. Every classifier and slot rule reads nodes through this module.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Variant property suffixes such as `Type=Primary, State=Hover`.
static VARIANT_PROPERTIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z ]+=[^,]*,?").expect("variant property pattern"));

/// Characters dropped when building the compact form of a name.
const NAME_SEPARATORS: &[char] = &[' ', '-', '_', '/', '.', '\t'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[serde(alias = "FRAME", alias = "GROUP", alias = "SECTION", alias = "group")]
    Frame,
    #[serde(
        alias = "INSTANCE",
        alias = "COMPONENT",
        alias = "COMPONENT_SET",
        alias = "component"
    )]
    Instance,
    #[serde(alias = "TEXT")]
    Text,
    #[serde(
        alias = "VECTOR",
        alias = "RECTANGLE",
        alias = "ELLIPSE",
        alias = "LINE",
        alias = "STAR",
        alias = "POLYGON",
        alias = "BOOLEAN_OPERATION",
        alias = "vector"
    )]
    Shape,
}

impl NodeKind {
    /// Containers are the nodes that can carry component substructure.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Frame | NodeKind::Instance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height. `None` for degenerate sizes.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width > 0.0 && self.height > 0.0 {
            Some(self.width / self.height)
        } else {
            None
        }
    }

    /// Long side over short side, always >= 1.
    pub fn elongation(&self) -> Option<f64> {
        let long = self.width.max(self.height);
        let short = self.width.min(self.height);
        if short > 0.0 {
            Some(long / short)
        } else if long > 0.0 {
            Some(f64::INFINITY)
        } else {
            None
        }
    }

    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintKind {
    #[serde(alias = "SOLID")]
    Solid,
    #[serde(
        alias = "GRADIENT_LINEAR",
        alias = "GRADIENT_RADIAL",
        alias = "GRADIENT_ANGULAR",
        alias = "GRADIENT_DIAMOND"
    )]
    Gradient,
    #[serde(alias = "IMAGE")]
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub kind: PaintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[serde(alias = "HORIZONTAL")]
    Horizontal,
    #[serde(alias = "VERTICAL")]
    Vertical,
}

/// Visual attributes. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Paint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(alias = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(default)]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            size: None,
            style: Style::default(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn frame(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Frame)
    }

    pub fn instance(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Instance)
    }

    pub fn text(id: impl Into<String>, name: impl Into<String>, content: &str) -> Self {
        let mut node = Self::new(id, name, NodeKind::Text);
        node.text = Some(content.to_string());
        node
    }

    pub fn shape(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Shape)
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Lowercased name with variant properties stripped.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Words of the name; see [`name_words`].
    pub fn name_words(&self) -> Vec<String> {
        name_words(&self.name)
    }

    pub fn has_text(&self) -> bool {
        self.kind == NodeKind::Text || self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn has_image_fill(&self) -> bool {
        self.style.fills.iter().any(|p| p.kind == PaintKind::Image)
    }

    /// Pre-order traversal of this node and its subtree.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Pre-order traversal of the subtree, excluding this node.
    pub fn descendants(&self) -> impl Iterator<Item = &Node> {
        self.walk().skip(1)
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn strip_variants(name: &str) -> String {
    let stripped = if name.contains('=') {
        VARIANT_PROPERTIES.replace_all(name, " ").into_owned()
    } else {
        name.to_string()
    };
    let trimmed = stripped.trim_matches(|c: char| c.is_whitespace() || c == ',');
    // A name made only of variant properties keeps its original text
    if trimmed.is_empty() {
        name.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn normalize_name(name: &str) -> String {
    strip_variants(name).to_lowercase()
}

/// Lowercase words of a name with variant properties stripped. Words break at
/// any non-alphanumeric character, at lower-to-upper case changes
/// ("DropdownMenu"), before the last capital of an acronym ("HTMLInput") and
/// between letters and digits ("Tab1").
pub fn name_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = strip_variants(name).chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase() && c.is_uppercase() && next_lower)
                || (prev.is_alphabetic() != c.is_alphabetic());
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Whether `term` reads from the start of some word, possibly running on
/// through the following words. The last word touched may be longer than the
/// rest of the term, so "menu" matches "Menubar" and "dropdown menu" matches
/// "DropdownMenu", while "tab" does not match "Beta Banner".
pub fn words_match(words: &[String], term: &str) -> bool {
    let term = compact(term);
    if term.is_empty() {
        return false;
    }
    (0..words.len()).any(|start| {
        let mut rest = term.as_str();
        for word in &words[start..] {
            if rest.len() <= word.len() {
                return word.starts_with(rest);
            }
            match rest.strip_prefix(word.as_str()) {
                Some(remaining) => rest = remaining,
                None => return false,
            }
        }
        false
    })
}

pub fn compact(text: &str) -> String {
    text.chars()
        .filter(|c| !NAME_SEPARATORS.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_words_ignore_separators_and_case() {
        for name in ["Dropdown Menu", "dropdown-menu", "DropdownMenu", "dropdown_menu"] {
            assert_eq!(Node::frame("1", name).name_words(), vec!["dropdown", "menu"]);
        }
    }

    #[test]
    fn test_name_words_split_case_and_digits() {
        assert_eq!(name_words("DropdownMenu"), vec!["dropdown", "menu"]);
        assert_eq!(name_words("HTMLInput"), vec!["html", "input"]);
        assert_eq!(name_words("Tab1 / Active"), vec!["tab", "1", "active"]);
        assert_eq!(name_words("Button, Type=Primary"), vec!["button"]);
        assert!(name_words("  --  ").is_empty());
    }

    #[test]
    fn test_terms_match_from_word_starts() {
        let words = |name: &str| name_words(name);
        assert!(words_match(&words("DropdownMenu"), "dropdown menu"));
        assert!(words_match(&words("dropdown-menu"), "dropdown menu"));
        assert!(words_match(&words("dropdownmenu"), "dropdown menu"));
        assert!(words_match(&words("Menubar"), "menu"));
        assert!(words_match(&words("Tab List"), "tablist"));
        assert!(words_match(&words("Tabs"), "tab"));

        assert!(!words_match(&words("Beta Banner"), "tab"));
        assert!(!words_match(&words("Data Bar"), "tab"));
        assert!(!words_match(&words("Project Alpha"), "cta"));
        assert!(!words_match(&words("Discard"), "card"));
        assert!(!words_match(&words("Menu"), "menubar"));
        assert!(!words_match(&words("Menu"), ""));
    }

    #[test]
    fn test_variant_properties_are_stripped() {
        assert_eq!(normalize_name("Button, Type=Primary, State=Hover"), "button");
        assert_eq!(normalize_name("State=Hover"), "state=hover");
        assert_eq!(normalize_name("Select Default"), "select default");
    }

    #[test]
    fn test_walk_is_pre_order() {
        let tree = Node::frame("root", "Root").with_children(vec![
            Node::frame("a", "A").with_child(Node::frame("a1", "A1")),
            Node::frame("b", "B"),
        ]);

        let ids: Vec<&str> = tree.walk().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "a1", "b"]);

        let ids: Vec<&str> = tree.descendants().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "a1", "b"]);
    }

    #[test]
    fn test_elongation() {
        assert_eq!(Size::new(200.0, 1.0).elongation(), Some(200.0));
        assert_eq!(Size::new(1.0, 200.0).elongation(), Some(200.0));
        assert_eq!(Size::new(0.0, 0.0).elongation(), None);
        assert_eq!(Size::new(10.0, 0.0).elongation(), Some(f64::INFINITY));
    }

    #[test]
    fn test_deserialize_design_tool_kinds() {
        let json = r#"{
            "id": "1:2",
            "name": "Avatar",
            "kind": "ELLIPSE",
            "style": { "fills": [{ "kind": "IMAGE" }] }
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::Shape);
        assert!(node.has_image_fill());
        assert!(node.children.is_empty());
    }
}
