use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of the concrete type a model describes.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    deprecated: bool,
}

impl TypeInfo {
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: type_name::<T>(), deprecated: false }
    }

    #[must_use]
    pub const fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, generic arguments included.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Unqualified name without generic arguments: `a::b::Holder<c::D>` is `Holder`.
    #[must_use]
    pub fn simple_name(&self) -> &'static str {
        simple_name(self.name)
    }

    #[must_use]
    pub const fn is_deprecated(&self) -> bool {
        self.deprecated
    }
}

pub(crate) fn simple_name(name: &str) -> &str {
    let base = name.split_once('<').map_or(name, |(base, _)| base);
    base.rsplit("::").next().unwrap_or(base)
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
