use crate::error::{ResolverError, Result};
use metalabel_model::{LabelSource, LabelType};
use std::collections::{HashMap, HashSet};

/// Strategy deciding whether a label type is a marker
///
/// A label type is a meta-label, and gets expanded during resolution, when
/// one of the labels on its own declaration is a marker under any
/// registered policy.
pub trait MarkerPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_marker(&self, candidate: &LabelType, source: &dyn LabelSource) -> bool;
}

/// Markers identified by a caller-supplied root marker type
///
/// A candidate is a marker if it is a root, or if a root appears within
/// `search_depth` levels of its own declarations. `search_depth` must be at
/// least 1.
#[derive(Debug, Clone)]
pub struct RootMarkerPolicy {
    roots: HashSet<LabelType>,
    search_depth: usize,
}

impl RootMarkerPolicy {
    pub fn new(roots: impl IntoIterator<Item = LabelType>, search_depth: usize) -> Result<Self> {
        if search_depth == 0 {
            return Err(ResolverError::invalid_config(
                "marker_search_depth must be > 0",
            ));
        }
        Ok(Self {
            roots: roots.into_iter().collect(),
            search_depth,
        })
    }
}

impl MarkerPolicy for RootMarkerPolicy {
    fn name(&self) -> &'static str {
        "root-marker"
    }

    fn is_marker(&self, candidate: &LabelType, source: &dyn LabelSource) -> bool {
        if self.roots.contains(candidate) {
            return true;
        }

        let mut in_progress = HashSet::from([candidate.clone()]);
        let mut frontier = vec![candidate.clone()];

        for _ in 0..self.search_depth {
            let mut next = Vec::new();
            for label_type in &frontier {
                for label in source.labels_of_type(label_type) {
                    let found = label.label_type();
                    if self.roots.contains(found) {
                        return true;
                    }
                    if in_progress.insert(found.clone()) {
                        next.push(found.clone());
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        false
    }
}

/// Markers that label themselves
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfFixedPointPolicy;

impl MarkerPolicy for SelfFixedPointPolicy {
    fn name(&self) -> &'static str {
        "self-fixed-point"
    }

    fn is_marker(&self, candidate: &LabelType, source: &dyn LabelSource) -> bool {
        labels_itself(candidate, source)
    }
}

fn labels_itself(label_type: &LabelType, source: &dyn LabelSource) -> bool {
    source
        .labels_of_type(label_type)
        .iter()
        .any(|label| label.is(label_type))
}

/// Marker status of a label type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerClass {
    /// Ordinary label type
    NotMarker,

    /// Marker used only to classify other label types
    Plumbing,

    /// Marker that labels itself
    SelfDescribing,

    /// Self-labeled marker that also carries a root marker other than itself
    Rooted,
}

/// Per-run classifier with memoized answers
pub struct Classifier<'a> {
    source: &'a dyn LabelSource,
    policies: &'a [Box<dyn MarkerPolicy>],
    roots: &'a [LabelType],
    markers: HashMap<LabelType, MarkerClass>,
    meta_labels: HashMap<LabelType, bool>,
}

impl<'a> Classifier<'a> {
    pub fn new(source: &'a dyn LabelSource, policies: &'a [Box<dyn MarkerPolicy>]) -> Self {
        Self {
            source,
            policies,
            roots: &[],
            markers: HashMap::new(),
            meta_labels: HashMap::new(),
        }
    }

    /// Root markers used to tell `Rooted` markers apart
    pub fn with_roots(mut self, roots: &'a [LabelType]) -> Self {
        self.roots = roots;
        self
    }

    /// Whether descending into the labels of `label_type` is meaningful
    pub fn is_meta_label(&mut self, label_type: &LabelType) -> bool {
        if let Some(&known) = self.meta_labels.get(label_type) {
            return known;
        }

        let declared = self.source.labels_of_type(label_type);
        let meta = declared
            .iter()
            .any(|label| self.marker_class(label.label_type()) != MarkerClass::NotMarker);

        log::trace!("{label_type} meta-label: {meta}");
        self.meta_labels.insert(label_type.clone(), meta);
        meta
    }

    pub fn marker_class(&mut self, label_type: &LabelType) -> MarkerClass {
        if let Some(&known) = self.markers.get(label_type) {
            return known;
        }

        let class = match self
            .policies
            .iter()
            .find(|policy| policy.is_marker(label_type, self.source))
        {
            None => MarkerClass::NotMarker,
            Some(policy) => {
                log::trace!("{label_type} is a marker ({})", policy.name());
                if !labels_itself(label_type, self.source) {
                    MarkerClass::Plumbing
                } else if self.carries_root(label_type) {
                    MarkerClass::Rooted
                } else {
                    MarkerClass::SelfDescribing
                }
            }
        };

        self.markers.insert(label_type.clone(), class);
        class
    }

    fn carries_root(&self, label_type: &LabelType) -> bool {
        if self.roots.contains(label_type) {
            return false;
        }
        self.source
            .labels_of_type(label_type)
            .iter()
            .any(|label| self.roots.contains(label.label_type()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metalabel_model::{Label, LabelGraph};
    use pretty_assertions::assert_eq;

    fn lt(name: &str) -> LabelType {
        LabelType::new(name)
    }

    fn stereotypes() -> LabelGraph {
        let mut graph = LabelGraph::new();
        graph.declare_type("Metaroot", vec![Label::new("Metaroot")]).unwrap();
        graph.declare_type("Stereotype", vec![Label::new("Metaroot")]).unwrap();
        graph
            .declare_type("Red", vec![Label::new("Stereotype"), Label::with_value("Color", "red")])
            .unwrap();
        graph.declare_type("NotMeta", vec![Label::new("Red")]).unwrap();
        graph
    }

    fn root_only(depth: usize) -> Vec<Box<dyn MarkerPolicy>> {
        vec![Box::new(RootMarkerPolicy::new([lt("Metaroot")], depth).unwrap())]
    }

    #[test]
    fn root_policy_follows_one_declaration_level() {
        let graph = stereotypes();
        let policy = RootMarkerPolicy::new([lt("Metaroot")], 1).unwrap();

        assert!(policy.is_marker(&lt("Metaroot"), &graph));
        assert!(policy.is_marker(&lt("Stereotype"), &graph));
        assert!(!policy.is_marker(&lt("Red"), &graph));
        assert!(!policy.is_marker(&lt("Color"), &graph));
    }

    #[test]
    fn zero_search_depth_is_rejected() {
        let err = RootMarkerPolicy::new([lt("Metaroot")], 0).unwrap_err();
        assert!(matches!(err, ResolverError::InvalidConfig(_)));
    }

    #[test]
    fn deeper_root_search_widens_markers() {
        let graph = stereotypes();
        let policy = RootMarkerPolicy::new([lt("Metaroot")], 2).unwrap();
        assert!(policy.is_marker(&lt("Red"), &graph));
    }

    #[test]
    fn root_search_terminates_on_cycles() {
        let mut graph = LabelGraph::new();
        graph.declare_type("Egg", vec![Label::new("Chicken")]).unwrap();
        graph.declare_type("Chicken", vec![Label::new("Egg")]).unwrap();

        let policy = RootMarkerPolicy::new([lt("Metaroot")], 64).unwrap();
        assert!(!policy.is_marker(&lt("Egg"), &graph));
    }

    #[test]
    fn self_fixed_point_needs_self_label() {
        let mut graph = stereotypes();
        graph.declare_type("Metatype", vec![Label::new("Metatype")]).unwrap();

        assert!(SelfFixedPointPolicy.is_marker(&lt("Metatype"), &graph));
        assert!(SelfFixedPointPolicy.is_marker(&lt("Metaroot"), &graph));
        assert!(!SelfFixedPointPolicy.is_marker(&lt("Stereotype"), &graph));
    }

    #[test]
    fn meta_labels_need_a_marker_on_their_declaration() {
        let graph = stereotypes();
        let policies = root_only(1);
        let mut classifier = Classifier::new(&graph, &policies);

        assert!(classifier.is_meta_label(&lt("Red")));
        assert!(!classifier.is_meta_label(&lt("NotMeta")));
        assert!(!classifier.is_meta_label(&lt("Color")));
        assert!(!classifier.is_meta_label(&lt("Unknown")));
    }

    #[test]
    fn marker_classes_distinguish_self_describing() {
        let graph = stereotypes();
        let policies = root_only(1);
        let mut classifier = Classifier::new(&graph, &policies);

        assert_eq!(classifier.marker_class(&lt("Stereotype")), MarkerClass::Plumbing);
        assert_eq!(classifier.marker_class(&lt("Metaroot")), MarkerClass::SelfDescribing);
        assert_eq!(classifier.marker_class(&lt("Red")), MarkerClass::NotMarker);
    }

    #[test]
    fn rooted_markers_carry_a_root_besides_themselves() {
        let mut graph = stereotypes();
        graph
            .declare_type("Metatype", vec![Label::new("Metatype"), Label::new("Metaroot")])
            .unwrap();
        graph.declare_type("Loner", vec![Label::new("Loner")]).unwrap();

        let roots = [lt("Metaroot")];
        let policies: Vec<Box<dyn MarkerPolicy>> = vec![
            Box::new(RootMarkerPolicy::new(roots.clone(), 1).unwrap()),
            Box::new(SelfFixedPointPolicy),
        ];
        let mut classifier = Classifier::new(&graph, &policies).with_roots(&roots);

        assert_eq!(classifier.marker_class(&lt("Metatype")), MarkerClass::Rooted);
        assert_eq!(classifier.marker_class(&lt("Metaroot")), MarkerClass::SelfDescribing);
        assert_eq!(classifier.marker_class(&lt("Loner")), MarkerClass::SelfDescribing);
        assert_eq!(classifier.marker_class(&lt("Stereotype")), MarkerClass::Plumbing);
    }

    #[test]
    fn policies_compose_by_or() {
        let mut graph = stereotypes();
        graph.declare_type("Metatype", vec![Label::new("Metatype")]).unwrap();
        graph
            .declare_type("Blue", vec![Label::new("Metatype"), Label::with_value("Color", "blue")])
            .unwrap();

        let policies: Vec<Box<dyn MarkerPolicy>> = vec![
            Box::new(RootMarkerPolicy::new([lt("Metaroot")], 1).unwrap()),
            Box::new(SelfFixedPointPolicy),
        ];
        let mut classifier = Classifier::new(&graph, &policies);

        assert!(classifier.is_meta_label(&lt("Red")));
        assert!(classifier.is_meta_label(&lt("Blue")));
    }
}
