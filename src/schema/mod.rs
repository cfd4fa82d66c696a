//! Slot Schema Registry
//!
//! One declarative slot tree per component type, describing which named
//! roles a target implementation expects and how to recognise them.

pub mod catalog;

use crate::component_type::ComponentType;
use crate::error::{EngineError, Result};
use crate::evidence::Evidence;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct SlotDefinition {
    pub name: &'static str,
    pub required: bool,
    pub allows_multiple: bool,
    pub rule: Evidence,
    pub children: Vec<SlotDefinition>,
    /// Sibling slot whose binding stands in for this one: an unmatched slot
    /// is not missing when that sibling bound nodes at the same level.
    pub covered_by: Option<&'static str>,
}

impl SlotDefinition {
    pub fn required(name: &'static str, rule: Evidence) -> Self {
        Self {
            name,
            required: true,
            allows_multiple: false,
            rule,
            children: Vec::new(),
            covered_by: None,
        }
    }

    pub fn optional(name: &'static str, rule: Evidence) -> Self {
        Self {
            required: false,
            ..Self::required(name, rule)
        }
    }

    pub fn multiple(mut self) -> Self {
        self.allows_multiple = true;
        self
    }

    pub fn with_children(mut self, children: Vec<SlotDefinition>) -> Self {
        self.children = children;
        self
    }

    pub fn covered_by(mut self, sibling: &'static str) -> Self {
        self.covered_by = Some(sibling);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SlotSchema {
    pub component: ComponentType,
    pub slots: Vec<SlotDefinition>,
}

/// Serializable outline of a slot tree, for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotOutline {
    pub name: String,
    pub required: bool,
    pub allows_multiple: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SlotOutline>,
}

impl SlotSchema {
    pub fn new(component: ComponentType, slots: Vec<SlotDefinition>) -> Self {
        Self { component, slots }
    }

    pub fn outline(&self) -> Vec<SlotOutline> {
        fn outline_of(slots: &[SlotDefinition]) -> Vec<SlotOutline> {
            slots
                .iter()
                .map(|s| SlotOutline {
                    name: s.name.to_string(),
                    required: s.required,
                    allows_multiple: s.allows_multiple,
                    children: outline_of(&s.children),
                })
                .collect()
        }
        outline_of(&self.slots)
    }
}

pub struct SchemaRegistry {
    schemas: HashMap<ComponentType, SlotSchema>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SchemaRegistry {
    pub fn builtin() -> Self {
        Self::from_schemas(catalog::schemas())
    }

    pub fn from_schemas(schemas: Vec<SlotSchema>) -> Self {
        Self {
            schemas: schemas.into_iter().map(|s| (s.component, s)).collect(),
        }
    }

    pub fn get_schema(&self, component: ComponentType) -> Result<&SlotSchema> {
        self.schemas
            .get(&component)
            .ok_or(EngineError::SchemaNotFound { component })
    }

    /// Fails with every classifiable type that lacks a schema.
    pub fn verify_covers(&self, components: &[ComponentType]) -> Result<()> {
        let mut missing: Vec<ComponentType> = components
            .iter()
            .copied()
            .filter(|c| !self.schemas.contains_key(c))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            missing.sort();
            missing.dedup();
            Err(EngineError::MissingSchemas(missing))
        }
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
