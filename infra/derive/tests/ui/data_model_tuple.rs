use databind_derive::data_model;

#[data_model]
struct Pair(String, String);

fn main() {}
