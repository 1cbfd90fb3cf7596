use autobuilder_derive::AutoBuilder;
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
}

#[derive(Debug, Default, AutoBuilder)]
pub struct Person {
    pub(crate) name: String,
    pub(crate) age: i32,
    pub address: Address,
    pub tags: Vec<String>,
    #[builder(ignore)]
    pub(crate) id: i64,
}

#[derive(Debug, AutoBuilder)]
#[builder(constructor = "with_defaults")]
pub struct Connection {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) r#type: String,
}

impl Connection {
    fn with_defaults() -> Self {
        Connection {
            host: "localhost".to_string(),
            port: 5432,
            r#type: "tcp".to_string(),
        }
    }
}

mod nested {
    use autobuilder_derive::AutoBuilder;

    #[derive(Debug, Default, AutoBuilder)]
    pub struct Settings {
        pub(super) verbose: bool,
        pub(in crate::nested) level: u8,
    }
}

#[test]
fn all_setters_round_trip() {
    let address = Address {
        street: "Main St".to_string(),
        city: "Springfield".to_string(),
    };
    let person = PersonBuilder::builder()
        .name("John".to_string())
        .age(30)
        .address(address.clone())
        .tags(vec!["admin".to_string()])
        .build();

    assert_eq!(person.name, "John");
    assert_eq!(person.age, 30);
    assert_eq!(person.address, address);
    assert_eq!(person.tags, vec!["admin".to_string()]);
    assert_eq!(person.id, 0);
}

#[test]
fn unset_fields_keep_constructor_values() {
    let person = PersonBuilder::builder().age(7).build();
    assert_eq!(person.name, "");
    assert_eq!(person.age, 7);
    assert_eq!(person.address, Address::default());
}

#[test]
fn last_setter_call_wins() {
    let person = PersonBuilder::builder().age(1).age(2).build();
    assert_eq!(person.age, 2);
}

#[test]
fn associated_constructor_supplies_defaults() {
    let connection = ConnectionBuilder::builder().port(6543).build();
    assert_eq!(connection.host, "localhost");
    assert_eq!(connection.port, 6543);
    assert_eq!(connection.r#type, "tcp");

    let udp = ConnectionBuilder::builder().r#type("udp".to_string()).build();
    assert_eq!(udp.r#type, "udp");
}

#[test]
fn restricted_visibility_fields_get_setters() {
    let settings = nested::SettingsBuilder::builder().verbose(true).build();
    assert!(settings.verbose);
}

#[test]
fn each_build_returns_a_fresh_instance() {
    let first = PersonBuilder::builder().name("A".to_string()).build();
    let second = PersonBuilder::builder().build();
    assert_eq!(first.name, "A");
    assert_eq!(second.name, "");
}
