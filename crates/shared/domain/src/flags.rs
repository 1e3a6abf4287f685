use bitflags::bitflags;

bitflags! {
    /// Binding flags carried by a single model parameter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ParameterFlags: u8 {
        /// The value is required at construction time.
        const MANDATORY = 1 << 0;
        /// The parameter is kept for compatibility and should not be used in new documents.
        const DEPRECATED = 1 << 1;
    }
}

impl ParameterFlags {
    /// Flags for a parameter that is mandatory or optional.
    #[must_use]
    pub const fn required(mandatory: bool) -> Self {
        if mandatory { Self::MANDATORY } else { Self::empty() }
    }
}

impl From<u8> for ParameterFlags {
    fn from(bits: u8) -> Self {
        Self::from_bits_truncate(bits)
    }
}
