use crate::closure::{Resolution, ResolvedLabel, Resolver};
use crate::error::{ResolverError, Result};
use metalabel_model::{ElementId, ElementKind, ElementSource, Label, LabelSource, LabelType};
use std::ops::Deref;
use std::sync::OnceLock;

/// Presence and lookup view over one element's effective labels
///
/// The closure is computed on first access and kept for the lifetime of
/// the view. The view is `Sync` whenever the label source is, so it can be
/// queried from several threads at once.
pub struct LabeledElement<'r, S> {
    resolver: &'r Resolver<S>,
    element: ElementId,
    resolution: OnceLock<Resolution>,
}

impl<'r, S: LabelSource> LabeledElement<'r, S> {
    pub fn new(resolver: &'r Resolver<S>, element: ElementId) -> Result<Self> {
        element.validate()?;
        Ok(Self {
            resolver,
            element,
            resolution: OnceLock::new(),
        })
    }

    pub fn element(&self) -> &ElementId {
        &self.element
    }

    pub fn resolution(&self) -> &Resolution {
        self.resolution
            .get_or_init(|| self.resolver.closure(&self.element))
    }

    /// True iff `label_type` is in the effective set
    pub fn is_present(&self, label_type: &LabelType) -> bool {
        self.resolution().contains(label_type)
    }

    /// Resolved instance for `label_type`
    pub fn get(&self, label_type: &LabelType) -> Option<&Label> {
        self.resolution().get(label_type).map(|resolved| &resolved.label)
    }

    /// Instance declared directly on the element, ignoring meta-labels
    pub fn get_declared(&self, label_type: &LabelType) -> Option<&Label> {
        self.declared_labels()
            .iter()
            .find(|label| label.is(label_type))
    }

    /// Declared labels in declaration order
    pub fn declared_labels(&self) -> &[Label] {
        self.resolution().declared()
    }

    /// Effective labels in discovery order
    pub fn all_labels(&self) -> Vec<&Label> {
        self.resolution()
            .effective()
            .iter()
            .map(|resolved| &resolved.label)
            .collect()
    }

    /// Depth and contributing label type of a resolved label
    pub fn provenance(&self, label_type: &LabelType) -> Option<&ResolvedLabel> {
        self.resolution().get(label_type)
    }
}

/// Type element view that can also enumerate its members
pub struct LabeledType<'r, S> {
    inner: LabeledElement<'r, S>,
}

impl<'r, S: LabelSource> LabeledType<'r, S> {
    pub fn new(resolver: &'r Resolver<S>, element: ElementId) -> Result<Self> {
        if element.kind != ElementKind::Type {
            return Err(ResolverError::invalid_element(format!(
                "{} is a {}, not a type",
                element, element.kind
            )));
        }
        Ok(Self {
            inner: LabeledElement::new(resolver, element)?,
        })
    }
}

impl<'r, S: LabelSource + ElementSource> LabeledType<'r, S> {
    /// Fields declared on this type
    pub fn fields(&self) -> Result<Vec<LabeledElement<'r, S>>> {
        let fields = self.inner.resolver.source().fields_of(&self.inner.element.name);
        self.members(fields)
    }

    /// Methods declared on this type
    pub fn methods(&self) -> Result<Vec<LabeledElement<'r, S>>> {
        let methods = self.inner.resolver.source().methods_of(&self.inner.element.name);
        self.members(methods)
    }

    fn members(&self, ids: Vec<ElementId>) -> Result<Vec<LabeledElement<'r, S>>> {
        ids.into_iter()
            .map(|id| LabeledElement::new(self.inner.resolver, id))
            .collect()
    }
}

impl<'r, S> Deref for LabeledType<'r, S> {
    type Target = LabeledElement<'r, S>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<S: LabelSource> Resolver<S> {
    /// View over any element
    pub fn element(&self, element: ElementId) -> Result<LabeledElement<'_, S>> {
        LabeledElement::new(self, element)
    }

    /// View over a type, with member enumeration
    pub fn type_element(&self, name: impl Into<String>) -> Result<LabeledType<'_, S>> {
        LabeledType::new(self, ElementId::of_type(name))
    }
}
