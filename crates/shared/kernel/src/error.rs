use std::borrow::Cow;

/// Failures raised while building, reading or writing models.
#[databind_derive::data_error]
pub enum DataError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Read failed{}: {message}", format_context(.context))]
    Read { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Write failed{}: {message}", format_context(.context))]
    Write { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unsupported operation{}: {message}", format_context(.context))]
    Unsupported { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl DataError {
    pub fn read(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Read { message: message.into(), context: None }
    }

    pub fn write(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Write { message: message.into(), context: None }
    }

    pub fn unsupported(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Unsupported { message: message.into(), context: None }
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Internal { message: message.into(), context: None }
    }

    /// `true` for failures of the I/O class: loading help or reconstructing an instance.
    #[must_use]
    pub const fn is_io_class(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Read { .. })
    }
}
