use databind_derive::data_model;

#[data_model]
struct Remote {
    url: String,
    #[data(rename = "url")]
    mirror: String,
}

fn main() {}
