//! Bindings between Rust field types and tree nodes.

use crate::context::{DataContext, PathSegment};
use crate::error::DataError;
use crate::parameter::{AtomicType, ParameterType};
use databind_domain::{Mapping, TreeNode};
use std::collections::BTreeMap;

/// A type that can appear as a parameter value.
///
/// Implemented for the atomic types, `Option`, `Box`, `Vec`, string-keyed `BTreeMap`,
/// raw [`TreeNode`] and every `#[data_model]` type.
pub trait DataValue: Sized {
    fn parameter_type() -> ParameterType;

    /// # Errors
    /// `Write` when the value has no tree representation.
    fn write_value(&self, context: &mut DataContext) -> Result<TreeNode, DataError>;

    /// # Errors
    /// `Read` when the node has the wrong shape or is out of range.
    fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError>;
}

fn mismatch(expected: &str, node: &TreeNode, context: &DataContext) -> DataError {
    DataError::read(format!("expected {expected} at {}, found {}", context.location(), node.kind()))
}

impl DataValue for bool {
    fn parameter_type() -> ParameterType {
        ParameterType::Atomic(AtomicType::Boolean)
    }

    fn write_value(&self, _context: &mut DataContext) -> Result<TreeNode, DataError> {
        Ok(TreeNode::from(*self))
    }

    fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError> {
        node.as_bool().ok_or_else(|| mismatch("boolean", node, context))
    }
}

impl DataValue for i64 {
    fn parameter_type() -> ParameterType {
        ParameterType::Atomic(AtomicType::Integer)
    }

    fn write_value(&self, _context: &mut DataContext) -> Result<TreeNode, DataError> {
        Ok(TreeNode::from(*self))
    }

    fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError> {
        node.as_i64().ok_or_else(|| mismatch("integer", node, context))
    }
}

macro_rules! integer_value {
    ($($ty:ty),* $(,)?) => {$(
        impl DataValue for $ty {
            fn parameter_type() -> ParameterType {
                ParameterType::Atomic(AtomicType::Integer)
            }

            fn write_value(&self, context: &mut DataContext) -> Result<TreeNode, DataError> {
                i64::try_from(*self).map(TreeNode::from).map_err(|_| {
                    DataError::write(format!(
                        "{self} at {} does not fit in a signed 64-bit integer",
                        context.location()
                    ))
                })
            }

            fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError> {
                let value = node.as_i64().ok_or_else(|| mismatch("integer", node, context))?;
                <$ty>::try_from(value).map_err(|_| {
                    DataError::read(format!(
                        "{value} at {} is out of range for {}",
                        context.location(),
                        stringify!($ty)
                    ))
                })
            }
        }
    )*};
}

integer_value!(i8, i16, i32, isize, u8, u16, u32, u64, usize);

impl DataValue for f64 {
    fn parameter_type() -> ParameterType {
        ParameterType::Atomic(AtomicType::Number)
    }

    fn write_value(&self, context: &mut DataContext) -> Result<TreeNode, DataError> {
        if self.is_finite() {
            Ok(TreeNode::from(*self))
        } else {
            Err(DataError::write(format!("{self} at {} is not a finite number", context.location())))
        }
    }

    fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError> {
        node.as_f64().ok_or_else(|| mismatch("number", node, context))
    }
}

impl DataValue for f32 {
    fn parameter_type() -> ParameterType {
        ParameterType::Atomic(AtomicType::Number)
    }

    fn write_value(&self, context: &mut DataContext) -> Result<TreeNode, DataError> {
        f64::from(*self).write_value(context)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError> {
        let value = f64::read_value(node, context)?;
        let narrowed = value as Self;
        if value.is_finite() && !narrowed.is_finite() {
            return Err(DataError::read(format!(
                "{value:e} at {} is out of range for f32",
                context.location()
            )));
        }
        Ok(narrowed)
    }
}

impl DataValue for String {
    fn parameter_type() -> ParameterType {
        ParameterType::Atomic(AtomicType::String)
    }

    fn write_value(&self, _context: &mut DataContext) -> Result<TreeNode, DataError> {
        Ok(TreeNode::from(self.as_str()))
    }

    fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError> {
        node.as_str().map(str::to_owned).ok_or_else(|| mismatch("string", node, context))
    }
}

impl DataValue for TreeNode {
    fn parameter_type() -> ParameterType {
        ParameterType::Any
    }

    fn write_value(&self, _context: &mut DataContext) -> Result<TreeNode, DataError> {
        Ok(self.clone())
    }

    fn read_value(node: &TreeNode, _context: &mut DataContext) -> Result<Self, DataError> {
        Ok(node.clone())
    }
}

impl<T: DataValue> DataValue for Option<T> {
    fn parameter_type() -> ParameterType {
        T::parameter_type()
    }

    fn write_value(&self, context: &mut DataContext) -> Result<TreeNode, DataError> {
        self.as_ref().map_or(Ok(TreeNode::Null), |value| value.write_value(context))
    }

    fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError> {
        if node.is_null() { Ok(None) } else { T::read_value(node, context).map(Some) }
    }
}

impl<T: DataValue> DataValue for Box<T> {
    fn parameter_type() -> ParameterType {
        T::parameter_type()
    }

    fn write_value(&self, context: &mut DataContext) -> Result<TreeNode, DataError> {
        (**self).write_value(context)
    }

    fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError> {
        T::read_value(node, context).map(Self::new)
    }
}

impl<T: DataValue> DataValue for Vec<T> {
    fn parameter_type() -> ParameterType {
        ParameterType::Sequence(Box::new(T::parameter_type()))
    }

    fn write_value(&self, context: &mut DataContext) -> Result<TreeNode, DataError> {
        self.iter()
            .enumerate()
            .map(|(index, item)| context.scoped(PathSegment::Index(index), |cx| item.write_value(cx)))
            .collect::<Result<Vec<_>, _>>()
            .map(TreeNode::Sequence)
    }

    fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError> {
        let items = node.as_sequence().ok_or_else(|| mismatch("sequence", node, context))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| context.scoped(PathSegment::Index(index), |cx| T::read_value(item, cx)))
            .collect()
    }
}

impl<T: DataValue> DataValue for BTreeMap<String, T> {
    fn parameter_type() -> ParameterType {
        ParameterType::Map(Box::new(T::parameter_type()))
    }

    fn write_value(&self, context: &mut DataContext) -> Result<TreeNode, DataError> {
        let mut mapping = Mapping::with_capacity(self.len());
        for (key, value) in self {
            let node = context.scoped(PathSegment::Key(key.clone()), |cx| value.write_value(cx))?;
            mapping.insert(key.clone(), node);
        }
        Ok(TreeNode::Mapping(mapping))
    }

    fn read_value(node: &TreeNode, context: &mut DataContext) -> Result<Self, DataError> {
        let mapping = node.as_mapping().ok_or_else(|| mismatch("mapping", node, context))?;
        mapping
            .iter()
            .map(|(key, value)| {
                context
                    .scoped(PathSegment::Key(key.to_owned()), |cx| T::read_value(value, cx))
                    .map(|value| (key.to_owned(), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read<T: DataValue>(node: impl Into<TreeNode>) -> Result<T, DataError> {
        T::read_value(&node.into(), &mut DataContext::new())
    }

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(read::<u8>(200_i64).unwrap(), 200);
        let err = read::<u8>(300_i64).unwrap_err();
        assert_eq!(err.to_string(), "Read failed: 300 at the document root is out of range for u8");
        assert!(read::<u32>(-1_i64).is_err());
    }

    #[test]
    fn oversized_floats_are_range_checked() {
        assert!((read::<f32>(1.5).unwrap() - 1.5).abs() < f32::EPSILON);
        let err = read::<f32>(1e300).unwrap_err();
        assert!(matches!(err, DataError::Read { .. }));
        assert_eq!(err.to_string(), "Read failed: 1e300 at the document root is out of range for f32");
        assert!(read::<f32>(-1e300).is_err());
        assert_eq!(read::<f32>(f64::from(f32::MAX)).unwrap(), f32::MAX);
    }

    #[test]
    fn oversized_unsigned_fails_to_write() {
        let err = u64::MAX.write_value(&mut DataContext::new()).unwrap_err();
        assert!(matches!(err, DataError::Write { .. }));
    }

    #[test]
    fn non_finite_floats_fail_to_write() {
        assert!(f64::NAN.write_value(&mut DataContext::new()).is_err());
        assert!(f32::INFINITY.write_value(&mut DataContext::new()).is_err());
        assert_eq!(1.5_f64.write_value(&mut DataContext::new()).unwrap(), TreeNode::from(1.5));
    }

    #[test]
    fn numbers_accept_integers() {
        assert!((read::<f64>(2_i64).unwrap() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mismatches_name_the_element() {
        let node = TreeNode::Sequence(vec!["a".into(), 1_i64.into()]);
        let err = read::<Vec<String>>(node).unwrap_err();
        assert_eq!(err.to_string(), "Read failed: expected string at '[1]', found integer");
    }

    #[test]
    fn maps_keep_their_keys() {
        let node: Mapping = [("b", "2"), ("a", "1")].into_iter().collect();
        let map = read::<BTreeMap<String, String>>(node).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(
            <BTreeMap<String, Vec<bool>>>::parameter_type().to_string(),
            "boolean[]{}"
        );
    }
}
