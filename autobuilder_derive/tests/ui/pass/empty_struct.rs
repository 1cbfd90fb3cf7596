use autobuilder_derive::AutoBuilder;

#[derive(Debug, Default, PartialEq, AutoBuilder)]
pub struct Marker {}

#[derive(Debug, Default, PartialEq, AutoBuilder)]
pub struct Unit;

fn main() {
    assert_eq!(MarkerBuilder::builder().build(), Marker {});
    assert_eq!(UnitBuilder::builder().build(), Unit);
}
