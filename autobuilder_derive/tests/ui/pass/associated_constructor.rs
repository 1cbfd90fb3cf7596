use autobuilder_derive::AutoBuilder;

#[derive(AutoBuilder)]
#[builder(constructor = "new")]
pub struct Session {
    pub(crate) user: String,
    pub(crate) retries: u32,
}

impl Session {
    pub fn new() -> Self {
        Session {
            user: "guest".to_string(),
            retries: 3,
        }
    }
}

fn main() {
    let session = SessionBuilder::builder().retries(5).build();
    assert_eq!(session.user, "guest");
    assert_eq!(session.retries, 5);
}
