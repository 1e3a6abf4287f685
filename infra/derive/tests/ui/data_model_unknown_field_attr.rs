use databind_derive::data_model;

#[data_model]
struct Paint {
    #[data(colour)]
    name: String,
}

fn main() {}
