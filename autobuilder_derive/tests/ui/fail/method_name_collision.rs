use autobuilder_derive::AutoBuilder;

#[derive(Default, AutoBuilder)]
pub struct Job {
    pub(crate) build: u32,
}

fn main() {}
