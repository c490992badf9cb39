use crate::element::{ElementId, SiteKind};
use crate::error::Result;
use crate::graph::LabelGraph;
use crate::label::{Label, LabelType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable description of a label graph
///
/// ```json
/// {
///   "types": [
///     { "name": "Red", "labels": [{ "type": "Color", "attributes": { "value": "red" } }] }
///   ],
///   "elements": [
///     { "kind": "type", "name": "Square", "labels": [{ "type": "Red" }] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelManifest {
    #[serde(default)]
    pub types: Vec<TypeDecl>,

    #[serde(default)]
    pub elements: Vec<ElementDecl>,
}

/// A label type declaration with optional member-level sites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: LabelType,

    #[serde(default)]
    pub labels: Vec<Label>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sites: BTreeMap<SiteKind, Vec<Label>>,
}

/// An element with its directly declared labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDecl {
    #[serde(flatten)]
    pub id: ElementId,

    #[serde(default)]
    pub labels: Vec<Label>,
}

impl LabelManifest {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_graph(self) -> Result<LabelGraph> {
        LabelGraph::from_manifest(self)
    }
}

impl LabelGraph {
    /// Build a graph from a manifest, types first
    pub fn from_manifest(manifest: LabelManifest) -> Result<Self> {
        let mut graph = LabelGraph::new();

        for decl in manifest.types {
            graph.declare_type(decl.name.clone(), decl.labels)?;
            for (kind, labels) in decl.sites {
                graph.declare_site(decl.name.clone(), kind, labels)?;
            }
        }

        for decl in manifest.elements {
            graph.declare_element(decl.id, decl.labels)?;
        }

        log::debug!(
            "Loaded label graph: {} types, {} meta edges, {} elements",
            graph.type_count(),
            graph.edge_count(),
            graph.element_count()
        );

        Ok(graph)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        LabelManifest::from_json_str(json)?.into_graph()
    }
}
