use databind_derive::data_model;

#[data_model]
enum Mode {
    Fast,
    Slow,
}

fn main() {}
