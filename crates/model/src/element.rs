use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of program element a label can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Type,
    Field,
    Method,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementKind::Type => "type",
            ElementKind::Field => "field",
            ElementKind::Method => "method",
        };
        f.write_str(s)
    }
}

/// Member kinds that may carry their own meta-label site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    Field,
    Method,
}

impl SiteKind {
    /// Site consulted when expanding labels on an element of `kind`
    pub fn for_element(kind: ElementKind) -> Option<Self> {
        match kind {
            ElementKind::Type => None,
            ElementKind::Field => Some(SiteKind::Field),
            ElementKind::Method => Some(SiteKind::Method),
        }
    }
}

impl From<SiteKind> for ElementKind {
    fn from(kind: SiteKind) -> Self {
        match kind {
            SiteKind::Field => ElementKind::Field,
            SiteKind::Method => ElementKind::Method,
        }
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ElementKind::from(*self).fmt(f)
    }
}

/// Identity of a program element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId {
    pub kind: ElementKind,

    /// Declaring type for fields and methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    pub name: String,
}

impl ElementId {
    pub fn of_type(name: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Type,
            owner: None,
            name: name.into(),
        }
    }

    pub fn field(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Field,
            owner: Some(owner.into()),
            name: name.into(),
        }
    }

    pub fn method(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Method,
            owner: Some(owner.into()),
            name: name.into(),
        }
    }

    /// Check that the identity is complete enough to resolve
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::invalid_element(format!(
                "{} element has an empty name",
                self.kind
            )));
        }

        match (self.kind, self.owner.as_deref()) {
            (ElementKind::Type, _) => Ok(()),
            (_, Some(owner)) if !owner.trim().is_empty() => Ok(()),
            (kind, _) => Err(ModelError::invalid_element(format!(
                "{kind} '{}' has no declaring type",
                self.name
            ))),
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{}#{}", owner, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_identities_validate() {
        assert!(ElementId::of_type("shapes.Square").validate().is_ok());
        assert!(ElementId::field("shapes.Square", "side").validate().is_ok());
        assert!(ElementId::method("shapes.Square", "area").validate().is_ok());
    }

    #[test]
    fn rejects_empty_name_and_missing_owner() {
        assert!(ElementId::of_type("  ").validate().is_err());

        let orphan = ElementId {
            kind: ElementKind::Method,
            owner: None,
            name: "area".to_string(),
        };
        assert!(matches!(
            orphan.validate(),
            Err(ModelError::InvalidElement(_))
        ));
        assert!(ElementId::field("", "side").validate().is_err());
    }

    #[test]
    fn only_members_have_sites() {
        assert_eq!(SiteKind::for_element(ElementKind::Type), None);
        assert_eq!(SiteKind::for_element(ElementKind::Field), Some(SiteKind::Field));
        assert_eq!(SiteKind::for_element(ElementKind::Method), Some(SiteKind::Method));
    }

    #[test]
    fn display_includes_owner() {
        assert_eq!(ElementId::field("Square", "side").to_string(), "Square#side");
        assert_eq!(ElementId::of_type("Square").to_string(), "Square");
    }
}
