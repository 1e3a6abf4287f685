#![allow(deprecated)]

use databind_derive::data_model;
use databind_kernel::{DataContext, DataModel, Mapping, ModelSchema, TreeNode, by_reflection};

/// Checks out sources.
///
/// Supports any Git remote.
#[data_model(display_name = "Checkout")]
#[derive(Debug, PartialEq)]
struct GitCheckout {
    /// Remote URL.
    url: String,
    #[data(default)]
    poll: bool,
    branch: Option<String>,
    #[data(rename = "type", help = "Kind of checkout.")]
    kind: String,
    #[data(skip)]
    cache: Vec<String>,
    #[data(deprecated)]
    depth: Option<u32>,
}

#[data_model(crate = "databind_kernel", deprecated, help = "Old style.")]
#[derive(Debug)]
struct OldCheckout {
    r#ref: String,
}

fn main() {
    let model = by_reflection::<GitCheckout>().unwrap();
    assert_eq!(model.display_name(), "Checkout");
    assert_eq!(model.describe().unwrap(), "GitCheckout(url, type, poll?, branch?, depth?)");
    assert_eq!(
        model.help().unwrap().as_deref(),
        Some("<div><p>Checks out sources.</p><p>Supports any Git remote.</p></div>")
    );
    assert_eq!(model.parameter("type").unwrap().help(), Some("Kind of checkout."));
    assert_eq!(model.parameter("url").unwrap().help(), Some("Remote URL."));
    assert!(model.parameter("depth").unwrap().is_deprecated());
    assert!(model.parameter("cache").is_none());

    let input: Mapping = [("url", "https://x"), ("type", "git")].into_iter().collect();
    let value = model.read(&TreeNode::from(input.clone()), &mut DataContext::new()).unwrap();
    assert_eq!(
        value,
        GitCheckout {
            url: "https://x".to_owned(),
            poll: false,
            branch: None,
            kind: "git".to_owned(),
            cache: Vec::new(),
            depth: None,
        }
    );
    assert_eq!(model.write(&value, &mut DataContext::new()).unwrap(), TreeNode::from(input));

    let old = by_reflection::<OldCheckout>().unwrap();
    assert!(old.is_deprecated());
    assert_eq!(old.describe().unwrap(), "OldCheckout(ref)");
    assert_eq!(old.help().unwrap().as_deref(), Some("<div><p>Old style.</p></div>"));
}
