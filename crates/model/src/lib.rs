//! # Metalabel Model
//!
//! Shared vocabulary for meta-label resolution: label types, label
//! instances, program elements, and the collaborator contracts that feed
//! labels into the resolver.
//!
//! ## Architecture
//!
//! ```text
//! LabelSource / ElementSource (traits)
//!     │
//!     ├──> labels_of(element)          directly declared labels
//!     ├──> labels_of_type(type)        labels on a label type's declaration
//!     ├──> labels_of_type_at(type, k)  member-level declaration site
//!     └──> fields_of / methods_of      member enumeration
//!
//! LabelGraph (petgraph)
//!     ├─ Nodes: label types with their declared labels
//!     ├─ Edges: "B is declared on A" (meta-label relation)
//!     └─ Elements: program elements with their labels
//! ```
//!
//! ## Example
//!
//! ```rust
//! use metalabel_model::{ElementId, Label, LabelGraph, LabelSource};
//!
//! let mut graph = LabelGraph::new();
//! graph.declare_type("Red", vec![Label::with_value("Color", "red")]).unwrap();
//! graph.declare_element(ElementId::of_type("Square"), vec![Label::new("Red")]).unwrap();
//!
//! assert_eq!(graph.labels_of(&ElementId::of_type("Square")).len(), 1);
//! ```

mod element;
mod error;
mod graph;
mod label;
mod manifest;
mod source;

pub use element::{ElementId, ElementKind, SiteKind};
pub use error::{ModelError, Result};
pub use graph::{LabelGraph, LabelTypeNode, MetaEdge};
pub use label::{Label, LabelType};
pub use manifest::{ElementDecl, LabelManifest, TypeDecl};
pub use source::{ElementSource, LabelSource};
