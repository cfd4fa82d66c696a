//! Classification plus slot mapping for single nodes and whole trees.

use crate::classifiers::{ClassificationResult, ClassifierRegistry};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::mapper::{MappingResult, SlotMapper};
use crate::node::Node;
use crate::resolver::ClassificationResolver;
use crate::schema::SchemaRegistry;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation shared between a batch and whoever may stop it.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeAnalysis<'a> {
    pub node_id: String,
    pub node_name: String,
    pub classification: ClassificationResult,
    pub ranked: Vec<ClassificationResult>,
    /// Absent when the node is unclassified.
    pub mapping: Option<MappingResult<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport<'a> {
    /// In input order; cancelled nodes are left out.
    pub analyses: Vec<NodeAnalysis<'a>>,
    pub skipped: usize,
}

impl BatchReport<'_> {
    pub fn classified(&self) -> usize {
        self.analyses
            .iter()
            .filter(|a| a.classification.is_classified())
            .count()
    }
}

pub struct ComponentEngine {
    resolver: ClassificationResolver,
    schemas: SchemaRegistry,
    mapper: SlotMapper,
}

impl ComponentEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let registry = ClassifierRegistry::from_config(&config.suppression);
        Self::with_parts(registry, SchemaRegistry::builtin(), config)
    }

    /// Assembles an engine from explicit registries. Fails when a classifier
    /// has no schema to map onto.
    pub fn with_parts(
        registry: ClassifierRegistry,
        schemas: SchemaRegistry,
        config: EngineConfig,
    ) -> Result<Self> {
        schemas.verify_covers(&registry.components())?;
        log::info!(
            "Component engine ready: {} classifiers, {} slot schemas",
            registry.len(),
            schemas.len()
        );
        Ok(Self {
            resolver: ClassificationResolver::new(registry, config.classification),
            schemas,
            mapper: SlotMapper::new(config.slot_mapping),
        })
    }

    pub fn resolver(&self) -> &ClassificationResolver {
        &self.resolver
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn analyze<'a>(&self, node: &'a Node) -> Result<NodeAnalysis<'a>> {
        let resolution = self.resolver.resolve(node);
        let mapping = match resolution.best.component {
            Some(component) => Some(self.mapper.map_slots(node, component, &self.schemas)?),
            None => None,
        };
        Ok(NodeAnalysis {
            node_id: node.id.clone(),
            node_name: node.name.clone(),
            classification: resolution.best,
            ranked: resolution.ranked,
            mapping,
        })
    }

    /// One pass per node in parallel. Nodes not yet started when `cancel` is
    /// raised are counted as skipped.
    pub fn analyze_batch<'a>(
        &self,
        nodes: &[&'a Node],
        cancel: &CancellationFlag,
    ) -> Result<BatchReport<'a>> {
        let outcomes: Vec<Option<Result<NodeAnalysis<'a>>>> = nodes
            .par_iter()
            .map(|&node| {
                if cancel.is_cancelled() {
                    None
                } else {
                    Some(self.analyze(node))
                }
            })
            .collect();

        let mut analyses = Vec::with_capacity(outcomes.len());
        let mut skipped = 0;
        for outcome in outcomes {
            match outcome {
                Some(analysis) => analyses.push(analysis?),
                None => skipped += 1,
            }
        }

        let report = BatchReport { analyses, skipped };
        log::info!(
            "Analyzed {} node(s): {} classified, {} skipped",
            report.analyses.len(),
            report.classified(),
            report.skipped
        );
        if report.skipped > 0 {
            log::warn!("Batch cancelled before {} node(s) started", report.skipped);
        }
        Ok(report)
    }
}

/// Frames and instances with a non-empty name, in pre-order.
pub fn collect_candidates(root: &Node) -> Vec<&Node> {
    root.walk()
        .filter(|n| n.kind.is_container() && !n.name.trim().is_empty())
        .collect()
}
