//! Slot Mapper
//!
//! Binds a classified node's descendants to the slots of its component
//! schema and scores how completely the structure fits.
//!
//! Slots are processed top-down. Top-level slots draw candidates from the
//! node's direct children; nested slots draw from the children of whatever
//! their parent slot bound. Within one pool, a node bound to an earlier slot
//! is not offered to later ones.

use crate::component_type::ComponentType;
use crate::config::SlotMappingConfig;
use crate::error::Result;
use crate::evidence::{clamp_confidence, Score};
use crate::node::Node;
use crate::schema::{SchemaRegistry, SlotDefinition};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotMapping<'a> {
    /// Dotted path for nested slots, e.g. `content.item`.
    pub slot_name: String,
    pub required: bool,
    #[serde(serialize_with = "serialize_nodes")]
    pub matched_nodes: Vec<&'a Node>,
    pub confidence: f64,
    pub reasoning: Vec<String>,
}

impl SlotMapping<'_> {
    pub fn is_matched(&self) -> bool {
        !self.matched_nodes.is_empty()
    }
}

#[derive(Serialize)]
struct NodeRef<'a> {
    id: &'a str,
    name: &'a str,
}

fn serialize_nodes<S: Serializer>(
    nodes: &[&Node],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(nodes.iter().map(|n| NodeRef {
        id: &n.id,
        name: &n.name,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingResult<'a> {
    pub component_type: ComponentType,
    pub mappings: Vec<SlotMapping<'a>>,
    pub overall_confidence: f64,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl<'a> MappingResult<'a> {
    pub fn mapping(&self, slot_name: &str) -> Option<&SlotMapping<'a>> {
        self.mappings.iter().find(|m| m.slot_name == slot_name)
    }
}

/// Accumulates one mapping pass.
#[derive(Default)]
struct Pass<'a> {
    mappings: Vec<SlotMapping<'a>>,
    warnings: Vec<String>,
    suggestions: Vec<String>,
    /// (weight, confidence) of every slot that counts toward the overall score.
    contributions: Vec<(f64, f64)>,
}

struct Candidate<'a> {
    index: usize,
    node: &'a Node,
    score: Score,
}

fn slot_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn describe(candidate: &Candidate) -> String {
    format!(
        "'{}' ({}) scored {:.2}: {}",
        candidate.node.name,
        candidate.node.id,
        candidate.score.confidence,
        candidate.score.reasons.join(", ")
    )
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub struct SlotMapper {
    config: SlotMappingConfig,
}

impl Default for SlotMapper {
    fn default() -> Self {
        Self::new(SlotMappingConfig::default())
    }
}

impl SlotMapper {
    pub fn new(config: SlotMappingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SlotMappingConfig {
        &self.config
    }

    /// Maps `node` onto the schema of `component`. Fails only when no schema
    /// is registered for the type.
    pub fn map_slots<'a>(
        &self,
        node: &'a Node,
        component: ComponentType,
        schemas: &SchemaRegistry,
    ) -> Result<MappingResult<'a>> {
        let schema = schemas.get_schema(component)?;
        let mut pass = Pass::default();
        let pool: Vec<&'a Node> = node.children.iter().collect();
        self.map_level(&schema.slots, &pool, "", &mut pass);
        self.flag_weak_matches(&mut pass);

        let total_weight: f64 = pass.contributions.iter().map(|(w, _)| w).sum();
        let overall_confidence = if total_weight > 0.0 {
            let weighted: f64 = pass.contributions.iter().map(|(w, c)| w * c).sum();
            clamp_confidence(weighted / total_weight)
        } else if schema.slots.is_empty() {
            1.0
        } else {
            // Slots exist but nothing was found for any of them
            self.config.unfilled_confidence
        };

        log::debug!(
            "Mapped '{}' as {}: overall {:.2}, {} warning(s), {} suggestion(s)",
            node.name,
            component,
            overall_confidence,
            pass.warnings.len(),
            pass.suggestions.len()
        );

        Ok(MappingResult {
            component_type: component,
            mappings: pass.mappings,
            overall_confidence,
            warnings: pass.warnings,
            suggestions: pass.suggestions,
        })
    }

    fn map_level<'a>(
        &self,
        slots: &[SlotDefinition],
        pool: &[&'a Node],
        prefix: &str,
        pass: &mut Pass<'a>,
    ) {
        let threshold = self.config.bind_threshold;
        let mut taken = vec![false; pool.len()];

        // Binding runs in declaration order before anything is reported, so a
        // slot can see whether the sibling covering it bound.
        let mut levels: Vec<(Vec<Candidate<'a>>, Vec<usize>)> = Vec::with_capacity(slots.len());
        for slot in slots {
            let candidates: Vec<Candidate<'a>> = pool
                .iter()
                .enumerate()
                .filter(|(i, _)| !taken[*i])
                .map(|(index, &node)| Candidate {
                    index,
                    node,
                    score: slot.rule.evaluate(node),
                })
                .collect();

            let bound: Vec<usize> = if slot.allows_multiple {
                (0..candidates.len())
                    .filter(|&i| candidates[i].score.confidence >= threshold)
                    .collect()
            } else {
                // Strict comparison keeps the earliest node on ties.
                let mut best: Option<usize> = None;
                for (i, candidate) in candidates.iter().enumerate() {
                    if candidate.score.confidence < threshold {
                        continue;
                    }
                    let better = best.map_or(true, |b| {
                        candidate.score.confidence > candidates[b].score.confidence
                    });
                    if better {
                        best = Some(i);
                    }
                }
                best.into_iter().collect()
            };
            for &i in &bound {
                taken[candidates[i].index] = true;
            }
            levels.push((candidates, bound));
        }

        let bound_here = |name: &str| {
            slots
                .iter()
                .zip(&levels)
                .any(|(s, (_, bound))| s.name == name && !bound.is_empty())
        };

        for (slot, (candidates, bound)) in slots.iter().zip(&levels) {
            let path = slot_path(prefix, slot.name);
            let bound: Vec<&Candidate<'a>> = bound.iter().map(|&i| &candidates[i]).collect();

            if bound.is_empty() || slot.allows_multiple {
                self.suggest_near_miss(&path, candidates, pass);
            }

            let weight = if slot.required {
                self.config.required_weight
            } else {
                self.config.optional_weight
            };

            if bound.is_empty() {
                log::debug!("Slot '{}' unmatched among {} candidate(s)", path, candidates.len());
                let covering = slot.covered_by.filter(|sibling| bound_here(*sibling));
                let reasoning = if let Some(sibling) = covering {
                    vec![format!("Covered by slot '{}'", slot_path(prefix, sibling))]
                } else if candidates.is_empty() {
                    vec!["No candidate nodes available".to_string()]
                } else {
                    vec![format!(
                        "No candidate reached the binding threshold of {:.2}",
                        threshold
                    )]
                };
                if slot.required && covering.is_none() {
                    pass.warnings
                        .push(format!("Required slot '{}' has no matching node", path));
                    pass.contributions.push((weight, 0.0));
                }
                pass.mappings.push(SlotMapping {
                    slot_name: path.clone(),
                    required: slot.required,
                    matched_nodes: Vec::new(),
                    confidence: 0.0,
                    reasoning,
                });
                self.list_unreachable(&slot.children, &path, pass);
                continue;
            }

            let confidence = mean(bound.iter().map(|c| c.score.confidence));
            log::debug!(
                "Slot '{}' bound {} node(s) at {:.2}",
                path,
                bound.len(),
                confidence
            );
            pass.contributions.push((weight, confidence));
            pass.mappings.push(SlotMapping {
                slot_name: path.clone(),
                required: slot.required,
                matched_nodes: bound.iter().map(|c| c.node).collect(),
                confidence,
                reasoning: bound.iter().map(|c| describe(c)).collect(),
            });

            if !slot.children.is_empty() {
                let nested_pool: Vec<&'a Node> = bound
                    .iter()
                    .flat_map(|c| {
                        let parent: &'a Node = c.node;
                        parent.children.iter()
                    })
                    .collect();
                self.map_level(&slot.children, &nested_pool, &path, pass);
            }
        }
    }

    /// Nested slots of an unmatched parent: listed empty, not warned about,
    /// not scored.
    fn list_unreachable(&self, slots: &[SlotDefinition], prefix: &str, pass: &mut Pass<'_>) {
        for slot in slots {
            let path = slot_path(prefix, slot.name);
            pass.mappings.push(SlotMapping {
                slot_name: path.clone(),
                required: slot.required,
                matched_nodes: Vec::new(),
                confidence: 0.0,
                reasoning: vec![format!("Parent slot '{}' is unmatched", prefix)],
            });
            self.list_unreachable(&slot.children, &path, pass);
        }
    }

    fn suggest_near_miss(&self, path: &str, candidates: &[Candidate], pass: &mut Pass<'_>) {
        let threshold = self.config.bind_threshold;
        let floor = threshold - self.config.near_miss_margin;
        let near: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| {
                let confidence = c.score.confidence;
                confidence > 0.0 && confidence >= floor && confidence < threshold
            })
            .collect();
        if let [only] = near.as_slice() {
            pass.suggestions.push(format!(
                "'{}' ({}) is a near miss for slot '{}' at {:.2} (threshold {:.2}); \
                 consider binding it manually",
                only.node.name, only.node.id, path, only.score.confidence, threshold
            ));
        }
    }

    fn flag_weak_matches(&self, pass: &mut Pass<'_>) {
        let matched: Vec<&SlotMapping> = pass.mappings.iter().filter(|m| m.is_matched()).collect();
        if matched.len() < 2 {
            return;
        }
        let average = mean(matched.iter().map(|m| m.confidence));
        let floor = average * self.config.weak_match_ratio;
        let weak: Vec<String> = matched
            .iter()
            .filter(|m| m.confidence < floor)
            .map(|m| {
                format!(
                    "Slot '{}' matched with low confidence {:.2} (component average {:.2})",
                    m.slot_name, m.confidence, average
                )
            })
            .collect();
        pass.warnings.extend(weak);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::{Evidence, Predicate};
    use crate::schema::SlotSchema;

    fn named(terms: &'static [&'static str], weight: f64) -> Evidence {
        Evidence::new().add(Predicate::NameAny(terms), weight, "name")
    }

    fn card_registry() -> SchemaRegistry {
        SchemaRegistry::from_schemas(vec![SlotSchema::new(
            ComponentType::Card,
            vec![
                SlotDefinition::optional("header", named(&["header"], 0.8)),
                SlotDefinition::required("content", named(&["content"], 0.8)),
                SlotDefinition::optional("footer", named(&["footer"], 0.8)),
            ],
        )])
    }

    #[test]
    fn test_missing_required_slot_lowers_overall() {
        let mapper = SlotMapper::default();
        let registry = card_registry();
        let complete = Node::frame("1", "Card")
            .with_children(vec![Node::frame("2", "Header"), Node::frame("3", "Content")]);
        let missing = Node::frame("1", "Card").with_child(Node::frame("2", "Header"));

        let with = mapper.map_slots(&complete, ComponentType::Card, &registry).unwrap();
        let without = mapper.map_slots(&missing, ComponentType::Card, &registry).unwrap();

        assert!(without.overall_confidence < with.overall_confidence);
        assert!(with.warnings.is_empty());
        assert_eq!(without.warnings.len(), 1);
        assert!(without.warnings[0].contains("content"));
        // header 0.8 at weight 1, content 0 at weight 2
        assert!((without.overall_confidence - 0.8 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let mapper = SlotMapper::default();
        let registry = SchemaRegistry::builtin();
        let node = Node::frame("1", "DropdownMenu").with_children(vec![
            Node::frame("2", "Trigger"),
            Node::frame("3", "Content")
                .with_children(vec![Node::frame("4", "Item"), Node::frame("5", "Item")]),
        ]);
        let first = mapper.map_slots(&node, ComponentType::DropdownMenu, &registry).unwrap();
        let second = mapper.map_slots(&node, ComponentType::DropdownMenu, &registry).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nested_slots_use_parent_bindings() {
        let mapper = SlotMapper::default();
        let registry = SchemaRegistry::builtin();
        let node = Node::frame("1", "DropdownMenu").with_children(vec![
            Node::frame("2", "Trigger"),
            Node::frame("3", "Content")
                .with_children(vec![Node::frame("4", "Item"), Node::frame("5", "Item")]),
        ]);
        let result = mapper.map_slots(&node, ComponentType::DropdownMenu, &registry).unwrap();
        let items = result.mapping("content.item").unwrap();
        let ids: Vec<_> = items.matched_nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "5"]);
        assert_eq!(result.mapping("trigger").unwrap().matched_nodes[0].id, "2");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_unmatched_parent_lists_nested_slots_silently() {
        let mapper = SlotMapper::default();
        let registry = SchemaRegistry::builtin();
        let node = Node::frame("1", "DropdownMenu").with_child(Node::frame("2", "Trigger"));
        let result = mapper.map_slots(&node, ComponentType::DropdownMenu, &registry).unwrap();
        let item = result.mapping("content.item").unwrap();
        assert!(!item.is_matched());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("'content'"));
    }

    #[test]
    fn test_grouped_menu_items_cover_direct_items() {
        let registry = SchemaRegistry::builtin();
        let content = || {
            Node::frame("3", "Content").with_child(
                Node::frame("4", "Group")
                    .with_children(vec![Node::frame("5", "Item"), Node::frame("6", "Item")]),
            )
        };
        let menu = Node::frame("1", "DropdownMenu")
            .with_children(vec![Node::frame("2", "Trigger"), content()]);
        let select = Node::frame("1", "Select")
            .with_children(vec![Node::frame("2", "Trigger"), content()]);
        let menubar = Node::frame("0", "Menubar").with_child(
            Node::frame("1", "Menu").with_children(vec![Node::frame("2", "Trigger"), content()]),
        );

        for (node, component, prefix) in [
            (&menu, ComponentType::DropdownMenu, "content"),
            (&select, ComponentType::Select, "content"),
            (&menubar, ComponentType::Menubar, "menu.content"),
        ] {
            let result = SlotMapper::default()
                .map_slots(node, component, &registry)
                .unwrap();
            let grouped = result.mapping(&format!("{prefix}.group.item")).unwrap();
            let ids: Vec<_> = grouped.matched_nodes.iter().map(|n| n.id.as_str()).collect();
            assert_eq!(ids, vec!["5", "6"], "{component}");

            let direct = result.mapping(&format!("{prefix}.item")).unwrap();
            assert!(!direct.is_matched());
            assert!(direct.reasoning[0].contains("group"));
            assert!(result.warnings.is_empty(), "{component}: {:?}", result.warnings);
            assert!(result.overall_confidence > 0.8, "{component}");
        }
    }

    #[test]
    fn test_covering_slot_unbound_keeps_the_warning() {
        let registry = SchemaRegistry::builtin();
        let node = Node::frame("1", "DropdownMenu").with_children(vec![
            Node::frame("2", "Trigger"),
            Node::frame("3", "Content").with_child(Node::frame("4", "Frame 9")),
        ]);
        let result = SlotMapper::default()
            .map_slots(&node, ComponentType::DropdownMenu, &registry)
            .unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("'content.item'")));
    }

    #[test]
    fn test_single_slot_binds_once_and_prefers_earliest_on_tie() {
        let mapper = SlotMapper::default();
        let registry = card_registry();
        let node = Node::frame("1", "Card").with_children(vec![
            Node::frame("2", "Content A"),
            Node::frame("3", "Content B"),
        ]);
        let result = mapper.map_slots(&node, ComponentType::Card, &registry).unwrap();
        let content = result.mapping("content").unwrap();
        assert_eq!(content.matched_nodes.len(), 1);
        assert_eq!(content.matched_nodes[0].id, "2");
    }

    #[test]
    fn test_bound_node_not_offered_to_later_slots() {
        let registry = SchemaRegistry::from_schemas(vec![SlotSchema::new(
            ComponentType::Button,
            vec![
                SlotDefinition::required("label", named(&["text"], 0.8)),
                SlotDefinition::optional("caption", named(&["text"], 0.8)),
            ],
        )]);
        let node = Node::frame("1", "Button").with_child(Node::text("2", "Text", "Go"));
        let result = SlotMapper::default()
            .map_slots(&node, ComponentType::Button, &registry)
            .unwrap();
        assert!(result.mapping("label").unwrap().is_matched());
        assert!(!result.mapping("caption").unwrap().is_matched());
    }

    #[test]
    fn test_near_miss_becomes_suggestion() {
        let registry = SchemaRegistry::from_schemas(vec![SlotSchema::new(
            ComponentType::Card,
            vec![SlotDefinition::required("content", named(&["content"], 0.3))],
        )]);
        let node = Node::frame("1", "Card").with_child(Node::frame("2", "Main Content"));
        let result = SlotMapper::default()
            .map_slots(&node, ComponentType::Card, &registry)
            .unwrap();
        assert!(!result.mapping("content").unwrap().is_matched());
        assert_eq!(result.suggestions.len(), 1);
        assert!(result.suggestions[0].contains("Main Content"));
    }

    #[test]
    fn test_two_near_misses_are_ambiguous() {
        let registry = SchemaRegistry::from_schemas(vec![SlotSchema::new(
            ComponentType::Card,
            vec![SlotDefinition::required("content", named(&["content"], 0.3))],
        )]);
        let node = Node::frame("1", "Card").with_children(vec![
            Node::frame("2", "Content A"),
            Node::frame("3", "Content B"),
        ]);
        let result = SlotMapper::default()
            .map_slots(&node, ComponentType::Card, &registry)
            .unwrap();
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_weak_match_warning() {
        let registry = SchemaRegistry::from_schemas(vec![SlotSchema::new(
            ComponentType::Card,
            vec![
                SlotDefinition::required("header", named(&["header"], 1.0)),
                SlotDefinition::required("content", named(&["content"], 1.0)),
                SlotDefinition::optional("footer", named(&["footer"], 0.45)),
            ],
        )]);
        let node = Node::frame("1", "Card").with_children(vec![
            Node::frame("2", "Header"),
            Node::frame("3", "Content"),
            Node::frame("4", "Footer"),
        ]);
        let result = SlotMapper::default()
            .map_slots(&node, ComponentType::Card, &registry)
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("'footer'"));
    }

    #[test]
    fn test_slotless_schema_is_fully_confident() {
        let registry = SchemaRegistry::builtin();
        let node = Node::shape("1", "Separator").with_size(320.0, 1.0);
        let result = SlotMapper::default()
            .map_slots(&node, ComponentType::Separator, &registry)
            .unwrap();
        assert!(result.mappings.is_empty());
        assert_eq!(result.overall_confidence, 1.0);
    }

    #[test]
    fn test_schema_with_nothing_found_is_not_fully_confident() {
        let registry = SchemaRegistry::builtin();
        let node = Node::frame("1", "Avatar");
        let result = SlotMapper::default()
            .map_slots(&node, ComponentType::Avatar, &registry)
            .unwrap();
        assert!(result.warnings.is_empty());
        assert!(result.mappings.iter().all(|m| !m.is_matched()));
        assert_eq!(result.overall_confidence, 0.5);

        let config = SlotMappingConfig {
            unfilled_confidence: 0.2,
            ..SlotMappingConfig::default()
        };
        let result = SlotMapper::new(config)
            .map_slots(&node, ComponentType::Avatar, &registry)
            .unwrap();
        assert_eq!(result.overall_confidence, 0.2);
    }

    #[test]
    fn test_unknown_schema_propagates() {
        let registry = SchemaRegistry::from_schemas(vec![]);
        let node = Node::frame("1", "Card");
        assert!(SlotMapper::default()
            .map_slots(&node, ComponentType::Card, &registry)
            .is_err());
    }

    #[test]
    fn test_serializes_node_references() {
        let registry = card_registry();
        let node = Node::frame("1", "Card").with_child(Node::frame("2", "Content"));
        let result = SlotMapper::default()
            .map_slots(&node, ComponentType::Card, &registry)
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        let content = &json["mappings"][1];
        assert_eq!(content["slot_name"], "content");
        assert_eq!(content["matched_nodes"][0]["id"], "2");
        assert_eq!(content["matched_nodes"][0]["name"], "Content");
    }
}
