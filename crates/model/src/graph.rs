use crate::element::{ElementId, ElementKind, SiteKind};
use crate::error::{ModelError, Result};
use crate::label::{Label, LabelType};
use crate::source::{ElementSource, LabelSource};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};
use std::collections::{HashMap, HashSet};

/// Label type node: the type plus what its declarations carry
#[derive(Debug, Clone)]
pub struct LabelTypeNode {
    pub label_type: LabelType,

    /// Labels on the type's own declaration
    pub declared: Vec<Label>,

    /// Labels on member-level pseudo elements, keyed by member kind
    pub member_sites: HashMap<SiteKind, Vec<Label>>,
}

/// Edge A -> B: label type B is declared on A
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaEdge {
    /// `None` for the type's own declaration
    pub site: Option<SiteKind>,
}

#[derive(Debug, Clone)]
struct ElementEntry {
    id: ElementId,
    labels: Vec<Label>,
}

/// In-memory label graph implementing both collaborator contracts
#[derive(Debug, Clone, Default)]
pub struct LabelGraph {
    /// Directed graph over label types (meta-label relation)
    graph: DiGraph<LabelTypeNode, MetaEdge>,

    /// Label type -> NodeIndex mapping for fast lookup
    type_index: HashMap<LabelType, NodeIndex>,

    /// Elements in registration order
    elements: Vec<ElementEntry>,

    /// Element -> position in `elements`
    element_index: HashMap<ElementId, usize>,
}

impl LabelGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a label type and the labels on its own declaration
    ///
    /// Redeclaring a type replaces its previous declaration.
    pub fn declare_type(
        &mut self,
        label_type: impl Into<LabelType>,
        labels: Vec<Label>,
    ) -> Result<NodeIndex> {
        let label_type = label_type.into();
        ensure_unique(&label_type.to_string(), &labels)?;

        let idx = self.ensure_node(&label_type);
        self.graph[idx].declared = labels.clone();
        self.rewire(idx, None, &labels);
        Ok(idx)
    }

    /// Declare the labels a label type carries for members of `kind`
    pub fn declare_site(
        &mut self,
        label_type: impl Into<LabelType>,
        kind: SiteKind,
        labels: Vec<Label>,
    ) -> Result<NodeIndex> {
        let label_type = label_type.into();
        ensure_unique(&format!("{label_type} ({kind} site)"), &labels)?;

        let idx = self.ensure_node(&label_type);
        self.graph[idx].member_sites.insert(kind, labels.clone());
        self.rewire(idx, Some(kind), &labels);
        Ok(idx)
    }

    /// Register an element with its directly declared labels
    pub fn declare_element(&mut self, id: ElementId, labels: Vec<Label>) -> Result<()> {
        id.validate()?;
        ensure_unique(&id.to_string(), &labels)?;

        for label in &labels {
            self.ensure_node(label.label_type());
        }

        match self.element_index.get(&id) {
            Some(&pos) => self.elements[pos].labels = labels,
            None => {
                self.element_index.insert(id.clone(), self.elements.len());
                self.elements.push(ElementEntry { id, labels });
            }
        }
        Ok(())
    }

    pub fn find_type(&self, label_type: &LabelType) -> Option<&LabelTypeNode> {
        self.type_index
            .get(label_type)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    pub fn type_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn elements(&self) -> impl Iterator<Item = &ElementId> {
        self.elements.iter().map(|entry| &entry.id)
    }

    /// Groups of label types that meta-label each other circularly
    ///
    /// Self-labeled types form a group of one.
    pub fn meta_cycles(&self) -> Vec<Vec<LabelType>> {
        let mut cycles: Vec<Vec<LabelType>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .map(|scc| {
                let mut types: Vec<LabelType> = scc
                    .into_iter()
                    .map(|idx| self.graph[idx].label_type.clone())
                    .collect();
                types.sort();
                types
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Every label type reachable from `label_type` over meta edges of any
    /// site, the start type excluded unless it lies on a cycle
    pub fn reachable_from(&self, label_type: &LabelType) -> HashSet<LabelType> {
        let Some(&start) = self.type_index.get(label_type) else {
            return HashSet::new();
        };

        let mut reachable = HashSet::new();
        let mut bfs = Bfs::new(&self.graph, start);
        while let Some(idx) = bfs.next(&self.graph) {
            if idx != start {
                reachable.insert(self.graph[idx].label_type.clone());
            }
        }

        let on_cycle = self
            .graph
            .edges_directed(start, petgraph::Direction::Incoming)
            .any(|edge| reachable.contains(&self.graph[edge.source()].label_type))
            || self.graph.contains_edge(start, start);
        if on_cycle {
            reachable.insert(label_type.clone());
        }
        reachable
    }

    fn ensure_node(&mut self, label_type: &LabelType) -> NodeIndex {
        if let Some(&idx) = self.type_index.get(label_type) {
            return idx;
        }
        let idx = self.graph.add_node(LabelTypeNode {
            label_type: label_type.clone(),
            declared: Vec::new(),
            member_sites: HashMap::new(),
        });
        self.type_index.insert(label_type.clone(), idx);
        idx
    }

    /// Replace the outgoing edges of one declaration site
    fn rewire(&mut self, from: NodeIndex, site: Option<SiteKind>, labels: &[Label]) {
        let mut stale: Vec<_> = self
            .graph
            .edges(from)
            .filter(|edge| edge.weight().site == site)
            .map(|edge| edge.id())
            .collect();
        // remove_edge swaps the last edge in; descending order keeps ids valid
        stale.sort_by(|a, b| b.cmp(a));
        for id in stale {
            self.graph.remove_edge(id);
        }

        for label in labels {
            let to = self.ensure_node(label.label_type());
            self.graph.add_edge(from, to, MetaEdge { site });
        }
    }
}

fn ensure_unique(owner: &str, labels: &[Label]) -> Result<()> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label.label_type()) {
            return Err(ModelError::DuplicateLabel {
                element: owner.to_string(),
                label_type: label.label_type().to_string(),
            });
        }
    }
    Ok(())
}

impl LabelSource for LabelGraph {
    fn labels_of(&self, element: &ElementId) -> Vec<Label> {
        self.element_index
            .get(element)
            .map(|&pos| self.elements[pos].labels.clone())
            .unwrap_or_default()
    }

    fn labels_of_type(&self, label_type: &LabelType) -> Vec<Label> {
        self.find_type(label_type)
            .map(|node| node.declared.clone())
            .unwrap_or_default()
    }

    fn labels_of_type_at(&self, label_type: &LabelType, kind: ElementKind) -> Vec<Label> {
        let Some(node) = self.find_type(label_type) else {
            return Vec::new();
        };
        SiteKind::for_element(kind)
            .and_then(|site| node.member_sites.get(&site))
            .unwrap_or(&node.declared)
            .clone()
    }
}

impl ElementSource for LabelGraph {
    fn fields_of(&self, owner: &str) -> Vec<ElementId> {
        self.members_of(owner, ElementKind::Field)
    }

    fn methods_of(&self, owner: &str) -> Vec<ElementId> {
        self.members_of(owner, ElementKind::Method)
    }
}

impl LabelGraph {
    fn members_of(&self, owner: &str, kind: ElementKind) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|entry| entry.id.kind == kind && entry.id.owner.as_deref() == Some(owner))
            .map(|entry| entry.id.clone())
            .collect()
    }
}
