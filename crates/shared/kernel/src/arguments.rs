use crate::context::{DataContext, PathSegment};
use crate::error::DataError;
use crate::value::DataValue;
use databind_domain::{Mapping, TreeNode};

/// Named tree nodes bound to parameters during one read or write.
///
/// Reads consume entries, so whatever is left after instantiation matched no parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: Mapping,
}

impl Arguments {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Mapping::new() }
    }

    #[must_use]
    pub const fn from_mapping(entries: Mapping) -> Self {
        Self { entries }
    }

    /// Takes and binds a mandatory parameter.
    ///
    /// # Errors
    /// `Read` when the parameter is absent, or when its value does not bind to `V`.
    pub fn required<V: DataValue>(&mut self, name: &str, context: &mut DataContext) -> Result<V, DataError> {
        let node = self.entries.remove(name);
        context.scoped(PathSegment::Parameter(name.to_owned()), |cx| match node {
            Some(node) => V::read_value(&node, cx),
            None => Err(DataError::read(format!("missing mandatory parameter {}", cx.location()))),
        })
    }

    /// Takes and binds an optional parameter. Absent and null values are `None`.
    ///
    /// # Errors
    /// `Read` when a present value does not bind to `V`.
    pub fn optional<V: DataValue>(&mut self, name: &str, context: &mut DataContext) -> Result<Option<V>, DataError> {
        match self.entries.remove(name) {
            None | Some(TreeNode::Null) => Ok(None),
            Some(node) => context
                .scoped(PathSegment::Parameter(name.to_owned()), |cx| V::read_value(&node, cx))
                .map(Some),
        }
    }

    /// Writes `value` under `name`.
    ///
    /// # Errors
    /// Propagates the value's write failure.
    pub fn insert<V: DataValue>(&mut self, name: &str, value: &V, context: &mut DataContext) -> Result<(), DataError> {
        let node = context.scoped(PathSegment::Parameter(name.to_owned()), |cx| value.write_value(cx))?;
        self.entries.insert(name, node);
        Ok(())
    }

    /// Writes `value` under `name` unless it serializes to null.
    ///
    /// # Errors
    /// Propagates the value's write failure.
    pub fn insert_optional<V: DataValue>(
        &mut self,
        name: &str,
        value: &V,
        context: &mut DataContext,
    ) -> Result<(), DataError> {
        let node = context.scoped(PathSegment::Parameter(name.to_owned()), |cx| value.write_value(cx))?;
        if !node.is_null() {
            self.entries.insert(name, node);
        }
        Ok(())
    }

    pub fn insert_node(&mut self, name: impl Into<String>, node: TreeNode) {
        self.entries.insert(name, node);
    }

    pub fn take(&mut self, name: &str) -> Option<TreeNode> {
        self.entries.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_mapping(self) -> Mapping {
        self.entries
    }
}
