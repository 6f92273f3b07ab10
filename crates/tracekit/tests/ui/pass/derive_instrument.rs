use tracekit::{Instrument, MetadataRegistry, Traced};

#[derive(Instrument)]
#[instrument(color = "blue", label = "User", param(0, label = "login"), param(1, redact, color = "red"))]
struct User {
    name: String,
    #[instrument(redact)]
    password: String,
    #[instrument(label = "visits", mute)]
    count: Traced<u32>,
}

#[derive(Instrument)]
#[instrument(mute, method("switch", redact, label = "toggle"))]
enum Mode {
    Fast,
    Slow,
}

#[derive(Instrument)]
struct Pair<T>(#[instrument(color = "green")] T, T);

fn main() {
    let registry = MetadataRegistry::new();
    registry.install::<User>().unwrap();
    registry.install::<Mode>().unwrap();
    registry.install::<Pair<u8>>().unwrap();
    assert_eq!(registry.len(), 8);

    let user = User {
        name: "ada".into(),
        password: "secret".into(),
        count: Traced::member::<User>("count", 0),
    };
    let _ = (user.name, user.password, user.count.into_inner());
    let _ = [Mode::Fast, Mode::Slow];
    let _ = Pair(1_u8, 2_u8);
}
