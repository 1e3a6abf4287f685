use databind_derive::data_model;
use databind_kernel::{DataContext, DataModel, ModelSchema, TreeNode, by_reflection};

#[data_model]
#[derive(Debug, PartialEq)]
struct Holder<T> {
    value: T,
    extra: Option<T>,
}

fn main() {
    let model = by_reflection::<Holder<String>>().unwrap();
    assert_eq!(model.describe().unwrap(), "Holder(value, extra?)");
    assert_eq!(model.display_name(), "Holder");

    let value = model.read(&TreeNode::from("only"), &mut DataContext::new()).unwrap();
    assert_eq!(value, Holder { value: "only".to_owned(), extra: None });

    let numbers = by_reflection::<Holder<i64>>().unwrap();
    assert!(numbers.read(&TreeNode::from("nope"), &mut DataContext::new()).is_err());
}
