use databind::prelude::*;
use databind::domain::config::BindingConfig;

/// Archives build outputs.
#[data_model(crate = "databind::kernel")]
#[derive(Debug, PartialEq)]
struct Archive {
    artifacts: String,
    #[data(default)]
    fingerprint: bool,
}

#[test]
fn models_bind_through_the_facade() {
    let model = by_reflection::<Archive>().unwrap();
    assert_eq!(model.describe().unwrap(), "Archive(artifacts, fingerprint?)");

    let mut context = DataContext::from_config(&BindingConfig::default());
    let archive = model.read(&TreeNode::from("*.jar"), &mut context).unwrap();
    assert_eq!(archive, Archive { artifacts: "*.jar".to_owned(), fingerprint: false });
}

#[test]
fn json_documents_convert_to_trees() {
    let json = serde_json::json!({ "artifacts": "dist/**", "fingerprint": true });
    let tree: TreeNode = serde_json::from_value(json).unwrap();

    let registry = ModelRegistry::new();
    registry.register::<Archive>().unwrap();
    let archive = registry.model::<Archive>().unwrap().read(&tree, &mut DataContext::new()).unwrap();
    assert!(archive.fingerprint);
    let help = registry.lookup("Archive").unwrap().help().unwrap();
    assert_eq!(help.as_deref(), Some("<div><p>Archives build outputs.</p></div>"));
}
