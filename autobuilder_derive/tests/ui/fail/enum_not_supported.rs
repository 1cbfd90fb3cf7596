use autobuilder_derive::AutoBuilder;

#[derive(AutoBuilder)]
pub enum Status {
    Active,
    Inactive,
}

fn main() {}
