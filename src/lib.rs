pub mod classifiers;
pub mod component_type;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod mapper;
pub mod node;
pub mod resolver;
pub mod schema;

pub use classifiers::{ClassificationResult, ClassifierRegistry, ComponentClassifier};
pub use component_type::ComponentType;
pub use config::EngineConfig;
pub use engine::{collect_candidates, BatchReport, CancellationFlag, ComponentEngine, NodeAnalysis};
pub use error::{EngineError, Result};
pub use mapper::{MappingResult, SlotMapper, SlotMapping};
pub use node::Node;
pub use resolver::{ClassificationResolver, Resolution};
pub use schema::{SchemaRegistry, SlotDefinition, SlotSchema};
