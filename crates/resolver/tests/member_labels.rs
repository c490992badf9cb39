use metalabel_model::{Label, LabelGraph};
use metalabel_resolver::{LabeledElement, Resolver, ResolverConfig};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

mod support;
use support::{lt, metatype_members, names};

const OWNERS: [&str; 7] = [
    "members.Square",
    "members.Circle",
    "members.Triangle",
    "members.Oval",
    "members.None",
    "members.Store",
    "members.Farm",
];

/// Collect every field or method of the fixture owners by member name
fn members<'r, 'g>(
    resolver: &'r Resolver<&'g LabelGraph>,
    methods: bool,
) -> HashMap<String, LabeledElement<'r, &'g LabelGraph>> {
    let mut map = HashMap::new();
    for owner in OWNERS {
        let owner = resolver.type_element(owner).expect("owner is a type");
        let found = if methods {
            owner.methods()
        } else {
            owner.fields()
        }
        .expect("members are valid");
        for member in found {
            map.insert(member.element().name.clone(), member);
        }
    }
    map
}

fn color_of(member: &LabeledElement<'_, &LabelGraph>) -> Option<String> {
    member
        .get(&lt("members.Color"))
        .and_then(Label::value_str)
        .map(str::to_string)
}

fn check_members(methods: bool) {
    let graph = metatype_members();
    let resolver = Resolver::new(&graph, ResolverConfig::self_describing_only()).expect("config");
    let map = members(&resolver, methods);
    assert_eq!(map.len(), OWNERS.len());

    let circle = &map["circle"];
    assert_eq!(color_of(circle).as_deref(), Some("white"));
    assert!(circle.get_declared(&lt("members.Red")).is_some());
    assert_eq!(circle.declared_labels().len(), 2);
    assert_eq!(circle.all_labels().len(), 2);

    let square = &map["square"];
    assert_eq!(color_of(square).as_deref(), Some("red"));
    assert!(square.get_declared(&lt("members.Color")).is_none());
    assert_eq!(square.declared_labels().len(), 1);
    assert_eq!(square.all_labels().len(), 2);

    let triangle = &map["triangle"];
    assert_eq!(color_of(triangle).as_deref(), Some("red"));
    assert!(triangle.is_present(&lt("members.Red")));
    assert!(triangle.get_declared(&lt("members.Red")).is_none());
    assert_eq!(triangle.all_labels().len(), 3);

    let oval = &map["oval"];
    assert_eq!(color_of(oval).as_deref(), Some("green"));
    assert_eq!(
        names(oval.all_labels()),
        vec![
            "members.Forrest",
            "members.DarkGreen",
            "members.Green",
            "members.Color"
        ]
    );

    let store = &map["store"];
    assert_eq!(color_of(store).as_deref(), Some("egg"));
    assert!(store.is_present(&lt("members.Chicken")));
    assert_eq!(store.all_labels().len(), 3);

    let farm = &map["farm"];
    assert_eq!(color_of(farm).as_deref(), Some("chicken"));
    assert!(farm.is_present(&lt("members.Egg")));
    assert_eq!(farm.declared_labels().len(), 1);
    assert_eq!(farm.all_labels().len(), 3);

    let none = &map["none"];
    assert!(none.declared_labels().is_empty());
    assert!(none.all_labels().is_empty());

    for member in map.values() {
        assert!(!member.is_present(&lt("members.Metatype")));
    }
}

#[test]
fn field_labels_follow_field_sites() {
    check_members(false);
}

#[test]
fn method_labels_follow_method_sites() {
    check_members(true);
}

#[test]
fn type_level_use_reads_type_declaration() {
    let mut graph = metatype_members();
    graph
        .declare_element(
            metalabel_model::ElementId::of_type("members.Palette"),
            vec![Label::new("members.Red")],
        )
        .expect("palette is valid");
    let resolver = Resolver::new(&graph, ResolverConfig::self_describing_only()).expect("config");

    let palette = resolver.type_element("members.Palette").expect("type element");
    // Red declares Color only on its member sites
    assert!(!palette.is_present(&lt("members.Color")));
    assert!(palette.is_present(&lt("members.Metatype")));
}
