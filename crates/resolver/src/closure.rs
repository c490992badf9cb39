use crate::classifier::{
    Classifier, MarkerClass, MarkerPolicy, RootMarkerPolicy, SelfFixedPointPolicy,
};
use crate::config::{MarkerRetention, ResolverConfig};
use crate::error::{ResolverError, Result};
use metalabel_model::{ElementId, Label, LabelSource, LabelType};
use std::collections::{HashMap, HashSet};

/// A label in the effective set with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLabel {
    pub label: Label,

    /// 0 for declared labels, otherwise the meta-label level it was found at
    pub depth: usize,

    /// Label type whose declaration contributed this label
    pub via: Option<LabelType>,
}

impl ResolvedLabel {
    pub fn is_declared(&self) -> bool {
        self.depth == 0
    }
}

/// Declared and effective label sets of one element
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    declared: Vec<Label>,

    /// Discovery order: declared labels first, then breadth-first
    effective: Vec<ResolvedLabel>,

    /// Label type -> position in `effective`
    index: HashMap<LabelType, usize>,
}

impl Resolution {
    pub fn declared(&self) -> &[Label] {
        &self.declared
    }

    pub fn effective(&self) -> &[ResolvedLabel] {
        &self.effective
    }

    pub fn get(&self, label_type: &LabelType) -> Option<&ResolvedLabel> {
        self.index.get(label_type).map(|&pos| &self.effective[pos])
    }

    pub fn contains(&self, label_type: &LabelType) -> bool {
        self.index.contains_key(label_type)
    }

    pub fn len(&self) -> usize {
        self.effective.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effective.is_empty()
    }

    fn push(&mut self, resolved: ResolvedLabel) {
        self.index
            .insert(resolved.label.label_type().clone(), self.effective.len());
        self.effective.push(resolved);
    }
}

/// Computes effective label sets over a label source
pub struct Resolver<S> {
    source: S,
    config: ResolverConfig,
    policies: Vec<Box<dyn MarkerPolicy>>,
}

impl<S: LabelSource> Resolver<S> {
    pub fn new(source: S, config: ResolverConfig) -> Result<Self> {
        config.validate().map_err(ResolverError::invalid_config)?;

        let mut policies: Vec<Box<dyn MarkerPolicy>> = Vec::new();
        if !config.root_markers.is_empty() {
            policies.push(Box::new(RootMarkerPolicy::new(
                config.root_markers.iter().cloned(),
                config.marker_search_depth,
            )?));
        }
        if config.self_describing {
            policies.push(Box::new(SelfFixedPointPolicy));
        }

        Ok(Self {
            source,
            config,
            policies,
        })
    }

    /// Register an additional marker policy, consulted after the built-ins
    pub fn with_policy(mut self, policy: impl MarkerPolicy + 'static) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolve(&self, element: &ElementId) -> Result<Resolution> {
        element.validate()?;
        Ok(self.closure(element))
    }

    /// Breadth-first walk over meta-labels; `element` must be valid
    ///
    /// A label type is visited the moment it is first discovered, so each
    /// type contributes at most one instance and cycles stop at the second
    /// occurrence. Declared labels win over inherited ones; among inherited
    /// labels the shallowest, then earliest declared, wins.
    pub(crate) fn closure(&self, element: &ElementId) -> Resolution {
        let mut classifier =
            Classifier::new(&self.source, &self.policies).with_roots(&self.config.root_markers);
        let mut resolution = Resolution::default();
        let mut visited: HashSet<LabelType> = HashSet::new();
        let mut level: Vec<LabelType> = Vec::new();

        for label in self.source.labels_of(element) {
            let label_type = label.label_type().clone();
            if !visited.insert(label_type.clone()) {
                log::warn!("Ignoring repeated label {label_type} on {element}");
                continue;
            }
            resolution.declared.push(label.clone());
            resolution.push(ResolvedLabel {
                label,
                depth: 0,
                via: None,
            });
            level.push(label_type);
        }

        let mut depth = 0;
        while !level.is_empty() {
            depth += 1;
            let mut next = Vec::new();

            for parent in &level {
                if !classifier.is_meta_label(parent) {
                    continue;
                }

                for label in self.source.labels_of_type_at(parent, element.kind) {
                    let label_type = label.label_type().clone();
                    if !visited.insert(label_type.clone()) {
                        if let Some(winner) = resolution.get(&label_type) {
                            if winner.depth == depth && winner.label != label {
                                log::trace!(
                                    "{label_type} via {parent} shadowed by an earlier discovery on {element}"
                                );
                            }
                        }
                        continue;
                    }

                    let class = classifier.marker_class(&label_type);
                    if !retains(self.config.marker_retention, class) {
                        log::trace!("Suppressing marker {label_type} on {element}");
                        continue;
                    }

                    resolution.push(ResolvedLabel {
                        label,
                        depth,
                        via: Some(parent.clone()),
                    });
                    next.push(label_type);
                }
            }

            level = next;
        }

        log::debug!(
            "Resolved {}: {} declared, {} effective",
            element,
            resolution.declared.len(),
            resolution.len()
        );

        resolution
    }
}

fn retains(retention: MarkerRetention, class: MarkerClass) -> bool {
    match (retention, class) {
        (_, MarkerClass::NotMarker) => true,
        (MarkerRetention::CarryAll, _) => true,
        (
            MarkerRetention::CarrySelfDescribing,
            MarkerClass::SelfDescribing | MarkerClass::Rooted,
        ) => true,
        (MarkerRetention::CarryRooted, MarkerClass::Rooted) => true,
        _ => false,
    }
}
