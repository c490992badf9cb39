use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Identity of a label type, compared by fully qualified name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelType(Arc<str>);

impl LabelType {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Fully qualified name (e.g., "org.shapes.Color")
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Last path segment of the qualified name
    pub fn simple_name(&self) -> &str {
        self.0
            .rsplit(|c: char| c == '.' || c == '$' || c == ':')
            .next()
            .unwrap_or(self.name())
    }
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LabelType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LabelType {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

/// Label instance: a label type plus its attribute payload
///
/// Instances are immutable once handed out by a label source; the attribute
/// map is shared so clones stay cheap while the resolver copies labels
/// between declared and effective sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(rename = "type")]
    label_type: LabelType,

    #[serde(default)]
    attributes: Arc<BTreeMap<String, Value>>,
}

impl Label {
    /// Marker label without attributes
    pub fn new(label_type: impl Into<LabelType>) -> Self {
        Self {
            label_type: label_type.into(),
            attributes: Arc::default(),
        }
    }

    /// Label carrying the conventional `value` attribute
    pub fn with_value(label_type: impl Into<LabelType>, value: impl Into<Value>) -> Self {
        Self::new(label_type).with_attr("value", value)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.attributes).insert(name.into(), value.into());
        self
    }

    pub fn label_type(&self) -> &LabelType {
        &self.label_type
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn value(&self) -> Option<&Value> {
        self.attr("value")
    }

    pub fn value_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }

    pub fn is(&self, label_type: &LabelType) -> bool {
        &self.label_type == label_type
    }
}
