#![allow(dead_code)]

use metalabel_model::{Label, LabelGraph, LabelType};

const STEREOTYPE_SHAPES: &str = include_str!("fixtures/stereotype_shapes.json");
const METATYPE_MEMBERS: &str = include_str!("fixtures/metatype_members.json");

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Shapes whose label types are marked through `shapes.Stereotype`, itself
/// carrying the root marker `shapes.Metaroot`
pub fn stereotype_shapes() -> LabelGraph {
    init_logging();
    LabelGraph::from_json_str(STEREOTYPE_SHAPES).expect("stereotype fixture should load")
}

/// Field and method fixtures whose label types carry the self-labeled
/// `members.Metatype` and declare member-level sites
pub fn metatype_members() -> LabelGraph {
    init_logging();
    LabelGraph::from_json_str(METATYPE_MEMBERS).expect("member fixture should load")
}

pub fn lt(name: &str) -> LabelType {
    LabelType::new(name)
}

pub fn contains(labels: &[&Label], name: &str) -> bool {
    labels.iter().any(|label| label.label_type().name() == name)
}

pub fn names<'a>(labels: impl IntoIterator<Item = &'a Label>) -> Vec<String> {
    labels
        .into_iter()
        .map(|label| label.label_type().name().to_string())
        .collect()
}
