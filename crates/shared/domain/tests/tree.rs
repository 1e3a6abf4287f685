use databind_domain::{Mapping, NodeKind, ParameterFlags, TreeNode};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn json_object_keeps_key_order() {
    let node: TreeNode =
        serde_json::from_str(r#"{"zeta": 1, "alpha": [true, null], "mid": {"x": 1.5}}"#).unwrap();

    let mapping = node.as_mapping().expect("mapping");
    assert_eq!(mapping.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    assert_eq!(node.get("zeta").and_then(TreeNode::as_i64), Some(1));
    assert_eq!(node.get("alpha").map(TreeNode::kind), Some(NodeKind::Sequence));
    assert_eq!(node.get("mid").and_then(|m| m.get("x")).and_then(TreeNode::as_f64), Some(1.5));
}

#[test]
fn serializes_in_natural_shape() {
    let mut inner = Mapping::new();
    inner.insert("label", "linux");
    let mut outer = Mapping::new();
    outer.insert("agent", inner);
    outer.insert("retries", 3);
    outer.insert("skip", TreeNode::Null);

    let value = serde_json::to_value(TreeNode::from(outer)).unwrap();
    assert_eq!(value, json!({ "agent": { "label": "linux" }, "retries": 3, "skip": null }));
}

#[test]
fn toml_table_becomes_mapping() {
    let node: TreeNode = toml::from_str(
        r#"
        url = "https://example.org/repo.git"
        depth = 1

        [extensions]
        lfs = true
        "#,
    )
    .unwrap();

    assert_eq!(node.get("url").and_then(TreeNode::as_str), Some("https://example.org/repo.git"));
    assert_eq!(node.get("extensions").and_then(|e| e.get("lfs")).and_then(TreeNode::as_bool), Some(true));
}

#[test]
fn oversized_unsigned_is_rejected() {
    let err = serde_json::from_str::<TreeNode>("18446744073709551615").unwrap_err();
    assert!(err.to_string().contains("does not fit"));
}

#[test]
fn parameter_flags_from_required() {
    assert!(ParameterFlags::required(true).contains(ParameterFlags::MANDATORY));
    assert!(ParameterFlags::required(false).is_empty());
    assert_eq!(ParameterFlags::from(0b11), ParameterFlags::MANDATORY | ParameterFlags::DEPRECATED);
}

proptest! {
    #[test]
    fn mapping_keys_stay_unique(keys in proptest::collection::vec("[a-d]{1,2}", 0..32)) {
        let mapping: Mapping = keys.iter().map(|k| (k.clone(), TreeNode::from(k.as_str()))).collect();

        let mut seen = std::collections::HashSet::new();
        for key in mapping.keys() {
            prop_assert!(seen.insert(key.to_owned()), "duplicate key {}", key);
        }
        for key in &keys {
            prop_assert_eq!(mapping.get(key).and_then(TreeNode::as_str), Some(key.as_str()));
        }
    }
}
