use databind_derive::data_error;

#[data_error]
pub enum DemoError {
    #[error("IO error: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },
}

fn main() {}
