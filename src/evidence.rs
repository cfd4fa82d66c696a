//! Declarative evidence rules
//!
//! Classifiers and slot detection rules are both lists of
//! `(predicate, weight, reason)` clauses interpreted by [`Evidence::evaluate`].
//! A score is built by summing the weights of the clauses that hold, applying
//! any dampers multiplicatively, then clamping into `[0, 1]`.
//!
//! Name terms are matched against the words of a node's name (see
//! [`words_match`]). A term has to start at a word boundary, so `"tab"`
//! matches "Tabs" and "TabList" but not "Beta Banner", and a phrase like
//! `"dropdown menu"` matches "Dropdown Menu", "dropdown-menu" and "DropdownMenu".

use crate::node::{compact, words_match, LayoutMode, Node, NodeKind};
use regex::Regex;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub enum Predicate {
    /// Name contains at least one term.
    NameAny(&'static [&'static str]),
    /// Name contains a term and none of the exclusions.
    NameAnyExcept {
        terms: &'static [&'static str],
        except: &'static [&'static str],
    },
    /// Name is exactly one of the terms.
    NameIs(&'static [&'static str]),
    /// Regex over the normalized (lowercase, spaced) name.
    NameMatches(Regex),
    KindIs(NodeKind),
    HasText,
    HasImageFill,
    HasStroke,
    HasCornerRadius,
    /// Corner radius at least half the short side: pills and circles.
    FullyRounded,
    Layout(LayoutMode),
    /// Some direct child's name contains a term.
    ChildNamed(&'static [&'static str]),
    ChildKind(NodeKind),
    /// Some node below this one has a name containing a term.
    DescendantNamed(&'static [&'static str]),
    DescendantsNamedAtLeast {
        terms: &'static [&'static str],
        min: usize,
    },
    /// At least `min` nodes below this one whose normalized name matches.
    DescendantsMatchingAtLeast { pattern: Regex, min: usize },
    /// Long side over short side.
    ElongationAtLeast(f64),
    AspectAtLeast(f64),
    AspectAtMost(f64),
    MaxDimensionAtMost(f64),
    /// Width and height within `tolerance` of each other, relative to the long side.
    RoughlySquare(f64),
    AllOf(Vec<Predicate>),
    AnyOf(Vec<Predicate>),
}

fn contains_any(words: &[String], terms: &[&str]) -> bool {
    terms.iter().any(|t| words_match(words, t))
}

fn named_any(node: &Node, terms: &[&str]) -> bool {
    contains_any(&node.name_words(), terms)
}

impl Predicate {
    pub fn holds(&self, node: &Node) -> bool {
        self.holds_with_words(node, &node.name_words())
    }

    fn holds_with_words(&self, node: &Node, words: &[String]) -> bool {
        match self {
            Predicate::NameAny(terms) => contains_any(words, terms),
            Predicate::NameAnyExcept { terms, except } => {
                contains_any(words, terms) && !contains_any(words, except)
            }
            Predicate::NameIs(terms) => {
                let name = words.concat();
                terms.iter().any(|t| compact(t) == name)
            }
            Predicate::NameMatches(pattern) => pattern.is_match(&node.normalized_name()),
            Predicate::KindIs(kind) => node.kind == *kind,
            Predicate::HasText => node.has_text(),
            Predicate::HasImageFill => node.has_image_fill(),
            Predicate::HasStroke => {
                !node.style.strokes.is_empty() && node.style.stroke_weight.unwrap_or(1.0) > 0.0
            }
            Predicate::HasCornerRadius => node.style.corner_radius.is_some_and(|r| r > 0.0),
            Predicate::FullyRounded => match (node.style.corner_radius, node.size) {
                (Some(radius), Some(size)) => {
                    let short = size.width.min(size.height);
                    short > 0.0 && radius >= short / 2.0
                }
                _ => false,
            },
            Predicate::Layout(mode) => node.style.layout == Some(*mode),
            Predicate::ChildNamed(terms) => node.children.iter().any(|c| named_any(c, terms)),
            Predicate::ChildKind(kind) => node.children.iter().any(|c| c.kind == *kind),
            Predicate::DescendantNamed(terms) => node.descendants().any(|d| named_any(d, terms)),
            Predicate::DescendantsNamedAtLeast { terms, min } => {
                node.descendants().filter(|d| named_any(d, terms)).count() >= *min
            }
            Predicate::DescendantsMatchingAtLeast { pattern, min } => {
                node.descendants()
                    .filter(|d| pattern.is_match(&d.normalized_name()))
                    .count()
                    >= *min
            }
            Predicate::ElongationAtLeast(ratio) => node
                .size
                .and_then(|s| s.elongation())
                .is_some_and(|e| e >= *ratio),
            Predicate::AspectAtLeast(ratio) => node
                .size
                .and_then(|s| s.aspect_ratio())
                .is_some_and(|a| a >= *ratio),
            Predicate::AspectAtMost(ratio) => node
                .size
                .and_then(|s| s.aspect_ratio())
                .is_some_and(|a| a <= *ratio),
            Predicate::MaxDimensionAtMost(max) => node
                .size
                .is_some_and(|s| s.max_dimension() > 0.0 && s.max_dimension() <= *max),
            Predicate::RoughlySquare(tolerance) => node.size.is_some_and(|s| {
                let long = s.max_dimension();
                long > 0.0 && (s.width - s.height).abs() / long <= *tolerance
            }),
            Predicate::AllOf(all) => all.iter().all(|p| p.holds_with_words(node, words)),
            Predicate::AnyOf(any) => any.iter().any(|p| p.holds_with_words(node, words)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Clause {
    pub when: Predicate,
    pub weight: f64,
    pub reason: &'static str,
}

#[derive(Debug, Clone)]
pub enum Rule {
    Add(Clause),
    /// Only the first clause that holds contributes.
    FirstOf(Vec<Clause>),
}

/// Multiplies the accumulated score when a confusable type's vocabulary is present.
#[derive(Debug, Clone)]
pub struct Damper {
    pub key: &'static str,
    pub when: Predicate,
    pub factor: f64,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub confidence: f64,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Evidence {
    rules: Vec<Rule>,
    dampers: Vec<Damper>,
}

pub fn clause(when: Predicate, weight: f64, reason: &'static str) -> Clause {
    Clause {
        when,
        weight,
        reason,
    }
}

/// Compiles one of the built-in name patterns.
pub fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in name pattern must compile")
}

impl Evidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, when: Predicate, weight: f64, reason: &'static str) -> Self {
        self.rules.push(Rule::Add(clause(when, weight, reason)));
        self
    }

    pub fn first_of(mut self, tiers: Vec<Clause>) -> Self {
        self.rules.push(Rule::FirstOf(tiers));
        self
    }

    pub fn damp(
        mut self,
        key: &'static str,
        when: Predicate,
        factor: f64,
        reason: &'static str,
    ) -> Self {
        self.dampers.push(Damper {
            key,
            when,
            factor,
            reason,
        });
        self
    }

    pub fn dampers(&self) -> &[Damper] {
        &self.dampers
    }

    /// Replaces damping factors by key; keys not present here are left alone.
    pub fn apply_damping_overrides(&mut self, overrides: &BTreeMap<String, f64>) {
        for damper in &mut self.dampers {
            if let Some(factor) = overrides.get(damper.key) {
                damper.factor = *factor;
            }
        }
    }

    /// Highest total the additive rules can reach before clamping.
    pub fn max_raw_score(&self) -> f64 {
        self.rules
            .iter()
            .map(|rule| match rule {
                Rule::Add(c) => c.weight,
                Rule::FirstOf(tiers) => tiers.iter().map(|c| c.weight).fold(0.0, f64::max),
            })
            .sum()
    }

    pub fn evaluate(&self, node: &Node) -> Score {
        let words = node.name_words();
        let mut total = 0.0;
        let mut reasons = Vec::new();

        for rule in &self.rules {
            let hit = match rule {
                Rule::Add(c) => c.when.holds_with_words(node, &words).then_some(c),
                Rule::FirstOf(tiers) => {
                    tiers.iter().find(|c| c.when.holds_with_words(node, &words))
                }
            };
            if let Some(c) = hit {
                total += c.weight;
                reasons.push(format!("{} (+{:.2})", c.reason, c.weight));
            }
        }

        if total > 0.0 {
            for damper in &self.dampers {
                if damper.when.holds_with_words(node, &words) {
                    total *= damper.factor;
                    reasons.push(format!("{} (x{:.2})", damper.reason, damper.factor));
                }
            }
        }

        Score {
            confidence: clamp_confidence(total),
            reasons,
        }
    }
}

/// Clamps into `[0, 1]`; NaN becomes 0.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Style;

    fn menu_evidence() -> Evidence {
        Evidence::new()
            .first_of(vec![
                clause(Predicate::NameAny(&["dropdown menu"]), 0.6, "phrase"),
                clause(Predicate::NameAny(&["dropdown"]), 0.4, "word"),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["menu"],
                        except: &["menubar", "navigation"],
                    },
                    0.2,
                    "generic",
                ),
            ])
            .first_of(vec![
                clause(
                    Predicate::AllOf(vec![
                        Predicate::ChildNamed(&["trigger"]),
                        Predicate::ChildNamed(&["content"]),
                    ]),
                    0.3,
                    "both",
                ),
                clause(Predicate::ChildNamed(&["trigger"]), 0.1, "trigger"),
                clause(Predicate::ChildNamed(&["content"]), 0.1, "content"),
            ])
            .damp(
                "test",
                Predicate::NameAny(&["select"]),
                0.5,
                "damped",
            )
    }

    #[test]
    fn test_first_matching_tier_wins() {
        let evidence = menu_evidence();
        let phrase = evidence.evaluate(&Node::frame("1", "Dropdown Menu"));
        let word = evidence.evaluate(&Node::frame("1", "Dropdown"));
        let generic = evidence.evaluate(&Node::frame("1", "Menu"));
        assert_eq!(phrase.confidence, 0.6);
        assert_eq!(phrase.reasons.len(), 1);
        assert_eq!(word.confidence, 0.4);
        assert_eq!(generic.confidence, 0.2);
    }

    #[test]
    fn test_generic_term_excluded_by_other_vocabulary() {
        let evidence = menu_evidence();
        assert_eq!(evidence.evaluate(&Node::frame("1", "Menubar")).confidence, 0.0);
        assert_eq!(
            evidence.evaluate(&Node::frame("1", "Navigation Menu")).confidence,
            0.0
        );
    }

    #[test]
    fn test_compound_structure_beats_single_parts() {
        let evidence = menu_evidence();
        let both = Node::frame("1", "X").with_children(vec![
            Node::frame("2", "Trigger"),
            Node::frame("3", "Content"),
        ]);
        let one = Node::frame("1", "X").with_child(Node::frame("2", "Trigger"));
        let both_score = evidence.evaluate(&both).confidence;
        let one_score = evidence.evaluate(&one).confidence;
        assert!(both_score > 2.0 * one_score);
    }

    #[test]
    fn test_name_terms_respect_word_boundaries() {
        let tab = Predicate::NameAny(&["tab"]);
        assert!(tab.holds(&Node::frame("1", "TabList")));
        assert!(tab.holds(&Node::frame("1", "Settings Tabs")));
        assert!(!tab.holds(&Node::frame("1", "Beta Banner")));
        assert!(!tab.holds(&Node::frame("1", "Data Bar")));

        let exact = Predicate::NameIs(&["combobox"]);
        assert!(exact.holds(&Node::frame("1", "ComboBox")));
        assert!(!exact.holds(&Node::frame("1", "ComboBox Large")));
    }

    #[test]
    fn test_damper_multiplies_instead_of_zeroing() {
        let evidence = menu_evidence();
        let score = evidence.evaluate(&Node::frame("1", "Select Dropdown"));
        assert!((score.confidence - 0.2).abs() < 1e-9);
        assert!(score.reasons.iter().any(|r| r.starts_with("damped")));
    }

    #[test]
    fn test_clamp_after_sum() {
        let evidence = Evidence::new()
            .add(Predicate::NameAny(&["card"]), 0.8, "name")
            .add(Predicate::HasCornerRadius, 0.4, "radius");
        let node = Node::frame("1", "Card").with_style(Style {
            corner_radius: Some(8.0),
            ..Style::default()
        });
        let score = evidence.evaluate(&node);
        assert_eq!(score.confidence, 1.0);
        assert!((evidence.max_raw_score() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_confidence_handles_nan() {
        assert_eq!(clamp_confidence(f64::NAN), 0.0);
        assert_eq!(clamp_confidence(-0.5), 0.0);
        assert_eq!(clamp_confidence(3.0), 1.0);
    }

    #[test]
    fn test_damping_override_by_key() {
        let mut evidence = menu_evidence();
        let overrides = BTreeMap::from([("test".to_string(), 0.25)]);
        evidence.apply_damping_overrides(&overrides);
        assert_eq!(evidence.dampers()[0].factor, 0.25);
    }

    #[test]
    fn test_geometry_predicates() {
        let line = Node::shape("1", "Line").with_size(240.0, 1.0);
        assert!(Predicate::ElongationAtLeast(20.0).holds(&line));
        assert!(!Predicate::RoughlySquare(0.2).holds(&line));

        let key = Node::frame("1", "K").with_size(24.0, 22.0);
        assert!(Predicate::RoughlySquare(0.2).holds(&key));
        assert!(Predicate::MaxDimensionAtMost(32.0).holds(&key));

        let unsized_node = Node::frame("1", "K");
        assert!(!Predicate::MaxDimensionAtMost(32.0).holds(&unsized_node));
    }
}
