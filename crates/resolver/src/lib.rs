//! # Metalabel Resolver
//!
//! Resolves the complete effective set of labels on a program element:
//! the labels declared on it plus every label reachable by following
//! meta-labels, the labels that label types carry themselves.
//!
//! ## Architecture
//!
//! ```text
//! LabeledElement / LabeledType (lazy, memoized view)
//!     │
//!     └──> Resolver::closure (breadth-first, level order)
//!            ├─ Level 0: declared labels (always win)
//!            ├─ Level k: labels of meta-label types from level k-1
//!            ├─ Visited set keyed by label type (cycle guard)
//!            └─ Classifier (per run, memoized)
//!                 ├─ RootMarkerPolicy: carries a caller-supplied root
//!                 ├─ SelfFixedPointPolicy: labels itself
//!                 └─ MarkerRetention: which markers stay visible
//! ```
//!
//! ## Example
//!
//! ```rust
//! use metalabel_model::{ElementId, Label, LabelGraph, LabelType};
//! use metalabel_resolver::{Resolver, ResolverConfig};
//!
//! let mut graph = LabelGraph::new();
//! graph.declare_type("Metaroot", vec![]).unwrap();
//! graph.declare_type("Stereotype", vec![Label::new("Metaroot")]).unwrap();
//! graph
//!     .declare_type("Red", vec![Label::new("Stereotype"), Label::with_value("Color", "red")])
//!     .unwrap();
//! graph
//!     .declare_element(ElementId::of_type("Square"), vec![Label::new("Red")])
//!     .unwrap();
//!
//! let resolver = Resolver::new(&graph, ResolverConfig::with_root("Metaroot")).unwrap();
//! let square = resolver.type_element("Square").unwrap();
//!
//! let color = square.get(&LabelType::new("Color")).unwrap();
//! assert_eq!(color.value_str(), Some("red"));
//! assert!(!square.is_present(&LabelType::new("Stereotype")));
//! ```

mod adapter;
mod classifier;
mod closure;
mod config;
mod error;

pub use adapter::{LabeledElement, LabeledType};
pub use classifier::{Classifier, MarkerClass, MarkerPolicy, RootMarkerPolicy, SelfFixedPointPolicy};
pub use closure::{Resolution, ResolvedLabel, Resolver};
pub use config::{MarkerRetention, ResolverConfig};
pub use error::{ResolverError, Result};
