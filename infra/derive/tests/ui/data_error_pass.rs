use databind_derive::data_error;
use std::borrow::Cow;

#[data_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: DemoError = "boom".into();
    assert_eq!(err.to_string(), "Internal error: boom");

    let io: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
    let err = io.context("reading").unwrap_err();
    assert_eq!(err.to_string(), "IO error (reading): disk");

    let wrapped: Result<(), DemoError> = Err(DemoError::from(String::from("late")));
    let err = wrapped.context("retry").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (retry): late");
}
