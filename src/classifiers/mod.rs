pub mod display;
pub mod forms;
pub mod navigation;
pub mod overlays;

use crate::component_type::ComponentType;
use crate::config::SuppressionConfig;
use crate::evidence::Evidence;
use crate::node::Node;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// `None` marks the unclassified outcome.
    pub component: Option<ComponentType>,
    pub confidence: f64,
    pub reasons: Vec<String>,
}

impl ClassificationResult {
    pub fn unclassified(reasons: Vec<String>) -> Self {
        Self {
            component: None,
            confidence: 0.0,
            reasons,
        }
    }

    pub fn is_classified(&self) -> bool {
        self.component.is_some()
    }
}

/// Scores one node against one component type. Implementations must be pure:
/// same node in, same result out, no access beyond the node's own subtree.
pub trait ComponentClassifier: Send + Sync {
    fn classify(&self, node: &Node) -> ClassificationResult;
    fn component(&self) -> ComponentType;
}

/// A classifier expressed entirely as declarative evidence.
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    component: ComponentType,
    evidence: Evidence,
}

impl RuleClassifier {
    pub fn new(component: ComponentType, evidence: Evidence) -> Self {
        Self {
            component,
            evidence,
        }
    }

    pub fn evidence(&self) -> &Evidence {
        &self.evidence
    }
}

impl ComponentClassifier for RuleClassifier {
    fn classify(&self, node: &Node) -> ClassificationResult {
        let score = self.evidence.evaluate(node);
        if score.confidence > 0.0 {
            log::debug!(
                "{} scored {:.2} for '{}': {}",
                self.component,
                score.confidence,
                node.name,
                score.reasons.join("; ")
            );
        }
        ClassificationResult {
            component: Some(self.component),
            confidence: score.confidence,
            reasons: score.reasons,
        }
    }

    fn component(&self) -> ComponentType {
        self.component
    }
}

pub struct ClassifierRegistry {
    classifiers: Vec<Box<dyn ComponentClassifier>>,
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassifierRegistry {
    pub fn new() -> Self {
        Self::from_rule_classifiers(builtin_classifiers())
    }

    /// Built-in classifiers with damping factors taken from configuration.
    pub fn from_config(config: &SuppressionConfig) -> Self {
        let mut classifiers = builtin_classifiers();
        for classifier in &mut classifiers {
            classifier
                .evidence
                .apply_damping_overrides(&config.damping);
        }
        Self::from_rule_classifiers(classifiers)
    }

    pub fn from_classifiers(classifiers: Vec<Box<dyn ComponentClassifier>>) -> Self {
        Self { classifiers }
    }

    fn from_rule_classifiers(classifiers: Vec<RuleClassifier>) -> Self {
        Self {
            classifiers: classifiers
                .into_iter()
                .map(|c| Box::new(c) as Box<dyn ComponentClassifier>)
                .collect(),
        }
    }

    /// Runs every classifier against the node, zero scores included.
    pub fn score_all(&self, node: &Node) -> Vec<ClassificationResult> {
        self.classifiers.iter().map(|c| c.classify(node)).collect()
    }

    pub fn components(&self) -> Vec<ComponentType> {
        self.classifiers.iter().map(|c| c.component()).collect()
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }
}

pub fn builtin_classifiers() -> Vec<RuleClassifier> {
    let mut classifiers = Vec::new();
    classifiers.extend(overlays::classifiers());
    classifiers.extend(navigation::classifiers());
    classifiers.extend(forms::classifiers());
    classifiers.extend(display::classifiers());
    classifiers
}

/// Every damper key used by the built-in classifiers.
pub fn builtin_damper_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = builtin_classifiers()
        .iter()
        .flat_map(|c| c.evidence.dampers().iter().map(|d| d.key))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

/// Built-in damping factors by key, as shipped.
pub fn builtin_damping_factors() -> BTreeMap<String, f64> {
    builtin_classifiers()
        .iter()
        .flat_map(|c| c.evidence.dampers().iter())
        .map(|d| (d.key.to_string(), d.factor))
        .collect()
}
