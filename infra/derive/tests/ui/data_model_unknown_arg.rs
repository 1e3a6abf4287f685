use databind_derive::data_model;

#[data_model(colour = "red")]
struct Paint {
    name: String,
}

fn main() {}
