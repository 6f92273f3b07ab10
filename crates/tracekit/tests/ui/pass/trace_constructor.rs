use tracekit::trace_constructor;

#[derive(Debug)]
struct Session {
    user: String,
    ttl: u64,
}

impl Session {
    #[trace_constructor]
    pub fn new(user: String, ttl: u64) -> Self {
        Self { user, ttl }
    }

    #[trace_constructor]
    fn anonymous() -> Self {
        Self::new("anonymous".to_string(), 0)
    }
}

fn main() {
    let session = Session::new("ada".into(), 60);
    assert_eq!(session.user, "ada");
    assert_eq!(session.ttl, 60);
    assert_eq!(Session::anonymous().ttl, 0);
}
