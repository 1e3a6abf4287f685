use databind_derive::data_error;

#[data_error]
pub struct DemoError {
    message: String,
}

fn main() {}
