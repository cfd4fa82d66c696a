//! Classification Resolver
//!
//! Picks the single best classification for a node from the registry's
//! scores, or reports the node as unclassified when nothing is convincing.

use crate::classifiers::{ClassificationResult, ClassifierRegistry};
use crate::config::ClassificationConfig;
use crate::node::Node;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub best: ClassificationResult,
    /// Every classifier's result, best first.
    pub ranked: Vec<ClassificationResult>,
}

pub struct ClassificationResolver {
    registry: ClassifierRegistry,
    config: ClassificationConfig,
}

fn priority_of(result: &ClassificationResult) -> usize {
    result
        .component
        .map(|c| c.priority())
        .unwrap_or(usize::MAX)
}

/// Confidence descending, then the fixed priority table.
fn rank(a: &ClassificationResult, b: &ClassificationResult) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| priority_of(a).cmp(&priority_of(b)))
}

impl ClassificationResolver {
    pub fn new(registry: ClassifierRegistry, config: ClassificationConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &ClassifierRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    pub fn resolve(&self, node: &Node) -> Resolution {
        let mut ranked = self.registry.score_all(node);
        ranked.sort_by(rank);

        let best = match ranked.first() {
            Some(top) if top.confidence >= self.config.min_confidence && top.confidence > 0.0 => {
                log::debug!(
                    "Resolved '{}' ({}) as {:?} with confidence {:.2}",
                    node.name,
                    node.id,
                    top.component,
                    top.confidence
                );
                top.clone()
            }
            _ => {
                log::debug!(
                    "'{}' ({}) left unclassified; best confidence {:.2} below {:.2}",
                    node.name,
                    node.id,
                    ranked.first().map(|r| r.confidence).unwrap_or(0.0),
                    self.config.min_confidence
                );
                ClassificationResult::unclassified(self.candidate_reasons(&ranked))
            }
        };

        Resolution { best, ranked }
    }

    fn candidate_reasons(&self, ranked: &[ClassificationResult]) -> Vec<String> {
        let mut reasons = vec![format!(
            "No type reached the minimum confidence of {:.2}",
            self.config.min_confidence
        )];
        reasons.extend(
            ranked
                .iter()
                .filter(|r| r.confidence > 0.0)
                .take(self.config.candidate_limit)
                .filter_map(|r| {
                    r.component
                        .map(|c| format!("candidate: {} ({:.2})", c, r.confidence))
                }),
        );
        reasons
    }
}
