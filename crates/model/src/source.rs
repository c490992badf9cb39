use crate::element::{ElementId, ElementKind};
use crate::label::{Label, LabelType};
use std::sync::Arc;

/// Supplies the labels directly attached to elements and label types
///
/// Unknown elements and types yield an empty list; missing data is never an
/// error for the resolver.
pub trait LabelSource {
    /// Labels declared directly on a program element, in declaration order
    fn labels_of(&self, element: &ElementId) -> Vec<Label>;

    /// Labels declared on a label type's own declaration
    fn labels_of_type(&self, label_type: &LabelType) -> Vec<Label>;

    /// Labels a label type carries when applied to an element of `kind`
    ///
    /// Sources that keep member-level meta-labels on a separate pseudo
    /// element override this; the default is the type's own declaration.
    fn labels_of_type_at(&self, label_type: &LabelType, kind: ElementKind) -> Vec<Label> {
        let _ = kind;
        self.labels_of_type(label_type)
    }
}

/// Enumerates the members of a type
pub trait ElementSource {
    fn fields_of(&self, owner: &str) -> Vec<ElementId>;

    fn methods_of(&self, owner: &str) -> Vec<ElementId>;
}

impl<T: LabelSource + ?Sized> LabelSource for &T {
    fn labels_of(&self, element: &ElementId) -> Vec<Label> {
        (**self).labels_of(element)
    }

    fn labels_of_type(&self, label_type: &LabelType) -> Vec<Label> {
        (**self).labels_of_type(label_type)
    }

    fn labels_of_type_at(&self, label_type: &LabelType, kind: ElementKind) -> Vec<Label> {
        (**self).labels_of_type_at(label_type, kind)
    }
}

impl<T: LabelSource + ?Sized> LabelSource for Arc<T> {
    fn labels_of(&self, element: &ElementId) -> Vec<Label> {
        (**self).labels_of(element)
    }

    fn labels_of_type(&self, label_type: &LabelType) -> Vec<Label> {
        (**self).labels_of_type(label_type)
    }

    fn labels_of_type_at(&self, label_type: &LabelType, kind: ElementKind) -> Vec<Label> {
        (**self).labels_of_type_at(label_type, kind)
    }
}

impl<T: ElementSource + ?Sized> ElementSource for &T {
    fn fields_of(&self, owner: &str) -> Vec<ElementId> {
        (**self).fields_of(owner)
    }

    fn methods_of(&self, owner: &str) -> Vec<ElementId> {
        (**self).methods_of(owner)
    }
}

impl<T: ElementSource + ?Sized> ElementSource for Arc<T> {
    fn fields_of(&self, owner: &str) -> Vec<ElementId> {
        (**self).fields_of(owner)
    }

    fn methods_of(&self, owner: &str) -> Vec<ElementId> {
        (**self).methods_of(owner)
    }
}
