use autobuilder_derive::AutoBuilder;

#[derive(Default, AutoBuilder)]
pub struct Wrapper<T> {
    pub(crate) inner: T,
}

fn main() {}
