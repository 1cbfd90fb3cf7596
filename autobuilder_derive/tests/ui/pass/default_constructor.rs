use autobuilder_derive::AutoBuilder;

#[derive(Debug, Default, AutoBuilder)]
pub struct Person {
    pub(crate) name: String,
    pub(crate) age: i32,
    #[builder(ignore)]
    pub(crate) id: i64,
    secret: String,
}

fn main() {
    let person = PersonBuilder::builder().name("Ann".to_string()).age(42).build();
    assert_eq!(person.name, "Ann");
    assert_eq!(person.age, 42);
    assert_eq!(person.id, 0);
    assert!(person.secret.is_empty());
}
