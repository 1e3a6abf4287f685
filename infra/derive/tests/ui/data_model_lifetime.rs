use databind_derive::data_model;

#[data_model]
struct Borrowed<'a> {
    name: &'a str,
}

fn main() {}
