use databind_kernel::prelude::*;
use databind_kernel::{AtomicType, DataModelParameter, ParameterType, TypeInfo};
use proptest::prelude::*;

#[data_model]
#[derive(Debug, Clone, PartialEq)]
struct Sample {
    name: String,
    count: i64,
    enabled: Option<bool>,
    #[data(default)]
    tags: Vec<String>,
    ratio: Option<f64>,
}

/// Schema over an arbitrary parameter list, for exercising the default lookups.
#[derive(Debug)]
struct FixedSchema {
    ty: TypeInfo,
    parameters: Vec<DataModelParameter>,
}

impl ModelSchema for FixedSchema {
    fn model_type(&self) -> &TypeInfo {
        &self.ty
    }

    fn parameters(&self) -> &[DataModelParameter] {
        &self.parameters
    }

    fn help(&self) -> Result<Option<String>, DataError> {
        Ok(None)
    }
}

fn sample() -> impl Strategy<Value = Sample> {
    (
        "[a-z]{0,12}",
        any::<i64>(),
        proptest::option::of(any::<bool>()),
        proptest::collection::vec("[a-z0-9]{1,6}", 0..4),
        proptest::option::of(-1.0e6..1.0e6_f64),
    )
        .prop_map(|(name, count, enabled, tags, ratio)| Sample { name, count, enabled, tags, ratio })
}

proptest! {
    #[test]
    fn write_then_read_is_identity(value in sample()) {
        let model = by_reflection::<Sample>().unwrap();
        let mut context = DataContext::new();
        let tree = model.write(&value, &mut context).unwrap();
        prop_assert_eq!(model.read(&tree, &mut context).unwrap(), value);
    }

    #[test]
    fn lookup_finds_exactly_the_declared_names(
        names in proptest::collection::btree_set("[a-z]{1,8}", 0..10),
        probe in "[A-Z]{1,8}",
    ) {
        let schema = FixedSchema {
            ty: TypeInfo::of::<FixedSchema>(),
            parameters: names
                .iter()
                .map(|n| DataModelParameter::new(n.clone(), ParameterType::Atomic(AtomicType::String), true))
                .collect(),
        };

        for parameter in schema.parameters() {
            prop_assert_eq!(schema.parameter(parameter.name()), Some(parameter));
        }
        prop_assert!(schema.parameter(&probe).is_none());
    }
}

#[test]
fn mandatory_parameters_precede_optional_ones() {
    let model = by_reflection::<Sample>().unwrap();
    let first_optional = model.parameters().iter().position(|p| !p.is_mandatory()).unwrap();
    assert!(model.parameters()[first_optional..].iter().all(|p| !p.is_mandatory()));
    assert_eq!(model.describe().unwrap(), "Sample(name, count, enabled?, tags?, ratio?)");
}
