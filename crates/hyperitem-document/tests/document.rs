use hyperitem_document::constants::{METHOD_DELETE, METHOD_POST, REL_NEXT, REL_SELF};
use hyperitem_document::*;
use serde_json::json;

fn action(rel: &str, label: &str, method: &str) -> Action {
    Action {
        rel: rel.into(),
        label: label.into(),
        method: method.into(),
        ..Action::default()
    }
}

// ── Links ───────────────────────────────────────────────────────

#[test]
fn links_by_rel() {
    let links: Links = vec![
        Link::new(REL_SELF, "/orders"),
        Link::new(REL_NEXT, "/orders?skip=10"),
        Link::new("alternate", "/orders.csv"),
        Link::new("alternate", "/orders.xml"),
    ]
    .into();
    assert_eq!(links.find_by_rel(REL_NEXT).unwrap().href, "/orders?skip=10");
    assert!(links.find_by_rel("last").is_none());
    assert_eq!(links.filter_by_rel("alternate").len(), 2);
}

#[test]
fn link_json_uses_kebab_and_type_names() {
    let link = Link {
        type_: "text/csv".into(),
        accept_language: "de".into(),
        ..Link::new("alternate", "/orders.csv")
    };
    assert_eq!(
        serde_json::to_value(&link).unwrap(),
        json!({ "rel": "alternate", "href": "/orders.csv", "type": "text/csv", "accept-language": "de" })
    );
}

// ── Actions ─────────────────────────────────────────────────────

#[test]
fn actions_lookup_and_ordering() {
    let mut actions: Actions = vec![
        action("update", "Update", METHOD_POST),
        action("delete", "Delete", METHOD_DELETE),
        action("archive", "Archive", METHOD_POST),
    ]
    .into();
    assert_eq!(actions.find_by_rel("delete").unwrap().method, "DELETE");
    assert_eq!(actions.filter(|a| a.method == METHOD_POST).len(), 2);
    assert!(actions.filter_by_rel("publish").is_empty());

    actions.sort_by_label();
    let labels: Vec<&str> = actions.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, ["Archive", "Delete", "Update"]);
}

#[test]
fn action_form_round_trips_through_json() {
    let mut a = action("create", "Create", METHOD_POST);
    a.parameters.push(action_parameter("create"));
    a.parameters.push(Parameter {
        required: true,
        ..Parameter::new("name", constants::TYPE_TEXT)
    });
    let json = serde_json::to_string(&a).unwrap();
    let back: Action = serde_json::from_str(&json).unwrap();
    assert_eq!(back, a);
    assert!(back.parameters.find_by_name("@action").is_some());
}

// ── Items ───────────────────────────────────────────────────────

#[test]
fn item_document_shape() {
    let mut item = Item {
        label: "Order 7".into(),
        id: "7".into(),
        ..Item::default()
    };
    item.add_property(Property::new("total", 12.5));
    item.add_link(Link::new(REL_SELF, "/orders/7"));
    item.add_action(action("cancel", "Cancel", METHOD_POST));
    item.errors.push(Error {
        message: "payment overdue".into(),
        ..Error::default()
    });

    assert_eq!(
        serde_json::to_value(&item).unwrap(),
        json!({
            "label": "Order 7",
            "id": "7",
            "properties": [{ "name": "total", "value": 12.5 }],
            "links": [{ "rel": "self", "href": "/orders/7" }],
            "actions": [{ "label": "Cancel", "rel": "cancel", "method": "POST" }],
            "errors": [{ "message": "payment overdue" }]
        })
    );
}

#[test]
fn properties_keyed_by_name() {
    let props: Properties = vec![Property::new("a", 1), Property::new("b", "x")].into();
    let by_name = props.key_by(|p| p.name.clone());
    assert_eq!(by_name["b"].value, json!("x"));
    assert_eq!(props.find_by_name("a").unwrap().value, json!(1));
}

#[test]
fn nested_search() {
    let mut root = Item::default();
    let mut child = Item {
        id: "child".into(),
        ..Item::default()
    };
    child.add_item(Item {
        id: "grandchild".into(),
        label: "found".into(),
        ..Item::default()
    });
    root.add_item(child);
    assert_eq!(search(&root, "grandchild").unwrap().label, "found");
    assert!(search(&root, "other").is_none());
}
