//! Method interception.

use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

use tracekit_console::TraceLogger;
use tracekit_core::logging::targets;
use tracekit_core::render::{arg_list, short_type_name};
use tracekit_core::{Color, Coordinate, Member, MemberStyle, MetadataRegistry, TypeKey};

use super::Binding;

/// Announces calls to one method of one type.
///
/// On entry the arguments are printed:
///
/// ```text
///     METHOD 'deposit' passed args:     [50]
/// ```
///
/// and once the method has returned, the type of its result:
///
/// ```text
///     METHOD 'deposit' returns:     u64
/// ```
///
/// The method's own behavior is untouched: the value it returns, the error
/// it fails with or the panic it raises reach the caller unchanged.
/// An `Err` or a panic skips the second line.
#[derive(Debug, Clone)]
pub struct MethodInterceptor {
    owner: TypeKey,
    name: Cow<'static, str>,
    label: Option<String>,
    color: Option<Color>,
    binding: Binding,
}

impl MethodInterceptor {
    /// Create an interceptor for method `name` of `owner`.
    #[must_use]
    pub fn new(owner: TypeKey, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            owner,
            name: name.into(),
            label: None,
            color: None,
            binding: Binding::default(),
        }
    }

    /// Create an interceptor for method `name` of `T`.
    #[must_use]
    pub fn of<T: ?Sized>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(TypeKey::of::<T>(), name)
    }

    /// Write through this logger instead of the global one.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<TraceLogger>) -> Self {
        self.binding.logger = Some(logger);
        self
    }

    /// Read tags from this registry instead of the global one.
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<MetadataRegistry>) -> Self {
        self.binding.registry = Some(registry);
        self
    }

    /// Print `label` instead of the method name, whatever the registry says.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Paint lines in `color`, whatever the registry says.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Where this method's tags live in the registry.
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::member(self.owner, Member::method(self.name.clone()))
    }

    fn style(&self) -> MemberStyle {
        let mut style = self.binding.style(&self.coordinate());
        if let Some(label) = &self.label {
            style.label = Some(label.clone());
        }
        if let Some(color) = self.color {
            style.color = color;
        }
        style
    }

    /// Announce a call and return the guard that announces its result.
    ///
    /// Arguments are rendered here, with `Debug`, so the guard holds no
    /// borrow of them.
    pub fn enter(&self, args: &[&dyn Debug]) -> Invocation<'_> {
        let style = self.style();
        let active = !style.mute && self.binding.is_debug();
        if active {
            log::trace!(target: targets::INTERCEPT, "enter {}", self.coordinate());
            let rendered = arg_list(args, |_| style.redact);
            self.binding.emit(
                style.color,
                vec![
                    format!("\tMETHOD '{}' passed args:\t", style.display_name(&self.name)),
                    rendered,
                ],
            );
        }
        Invocation {
            interceptor: self,
            style,
        }
    }

    /// Run `body` as the method, announcing the call and its result.
    pub fn call<R>(&self, args: &[&dyn Debug], body: impl FnOnce() -> R) -> R {
        let invocation = self.enter(args);
        invocation.returned(body())
    }

    /// Run a fallible `body` as the method; an `Err` is returned unchanged
    /// with no result line.
    pub fn call_fallible<T, E>(
        &self,
        args: &[&dyn Debug],
        body: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        let invocation = self.enter(args);
        invocation.finished(body())
    }
}

/// A call in progress, returned by [`MethodInterceptor::enter`].
///
/// Consuming it with [`returned`](Self::returned) or
/// [`finished`](Self::finished) prints the result line. Dropping it, as
/// happens when the method panics, prints nothing.
#[must_use = "hand the method's result to `returned` or `finished`"]
#[derive(Debug)]
pub struct Invocation<'a> {
    interceptor: &'a MethodInterceptor,
    style: MemberStyle,
}

impl Invocation<'_> {
    /// Announce the type of `value` and hand it back.
    pub fn returned<R>(self, value: R) -> R {
        self.announce(std::any::type_name::<R>());
        value
    }

    /// Announce the `Ok` type of `result` and hand it back; an `Err` is
    /// passed through silently.
    pub fn finished<T, E>(self, result: Result<T, E>) -> Result<T, E> {
        if result.is_ok() {
            self.announce(std::any::type_name::<T>());
        }
        result
    }

    fn announce(&self, type_name: &str) {
        let binding = &self.interceptor.binding;
        if self.style.mute || !binding.is_debug() {
            return;
        }
        binding.emit(
            self.style.color,
            vec![
                format!(
                    "\tMETHOD '{}' returns:\t",
                    self.style.display_name(&self.interceptor.name)
                ),
                short_type_name(type_name),
            ],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestHarness;
    use tracekit_core::Tag;

    struct Vault;

    #[test]
    fn test_call_lines_and_value() {
        let h = TestHarness::new();
        let interceptor = h.method::<Vault>("deposit");

        let amount = 50_u64;
        let result = interceptor.call(&[&amount], || amount * 2);

        assert_eq!(result, 100);
        assert_eq!(
            h.output(),
            vec![
                "\tMETHOD 'deposit' passed args:\t [50]",
                "\tMETHOD 'deposit' returns:\t u64",
            ]
        );
    }

    #[test]
    fn test_lines_use_accent_color() {
        let h = TestHarness::new();
        h.method::<Vault>("open").call(&[], || ());
        let calls = h.console().calls();
        assert_eq!(calls.len(), 2);
        for (_, parts) in calls {
            assert!(parts[0].starts_with(Color::Green.escape()));
            assert!(parts.last().is_some_and(|last| last.ends_with(Color::Reset.escape())));
        }
    }

    #[test]
    fn test_err_skips_result_line() {
        let h = TestHarness::new();
        let result: Result<u8, String> = h
            .method::<Vault>("withdraw")
            .call_fallible(&[&500], || Err("insufficient funds".to_string()));

        assert_eq!(result, Err("insufficient funds".to_string()));
        assert_eq!(h.output(), vec!["\tMETHOD 'withdraw' passed args:\t [500]"]);
    }

    #[test]
    fn test_ok_reports_inner_type() {
        let h = TestHarness::new();
        let result: Result<String, ()> = h
            .method::<Vault>("owner")
            .call_fallible(&[], || Ok("ada".to_string()));
        assert_eq!(result, Ok("ada".to_string()));
        h.console().assert_contains("returns:\t String");
    }

    #[test]
    fn test_panic_skips_result_line() {
        let h = TestHarness::new();
        let interceptor = h.method::<Vault>("explode");
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            interceptor.call(&[], || -> u8 { panic!("boom") })
        }));
        assert!(outcome.is_err());
        h.console().assert_line_count(1);
        h.console().assert_contains("METHOD 'explode' passed args");
    }

    #[test]
    fn test_registry_tags_apply() {
        let h = TestHarness::new();
        let at = Coordinate::member(TypeKey::of::<Vault>(), Member::method("login"));
        h.registry().tag(at.clone(), Tag::Redact).unwrap();
        h.registry().tag(at.clone(), Tag::Label("sign-in".into())).unwrap();
        h.registry().tag(at, Tag::Color(Color::Magenta)).unwrap();

        h.method::<Vault>("login").call(&[&"ada", &1234], || true);

        assert_eq!(
            h.output(),
            vec![
                "\tMETHOD 'sign-in' passed args:\t [<redacted>, <redacted>]",
                "\tMETHOD 'sign-in' returns:\t bool",
            ]
        );
        assert!(h.console().calls()[0].1[0].starts_with(Color::Magenta.escape()));
    }

    #[test]
    fn test_explicit_overrides_win() {
        let h = TestHarness::new();
        h.method::<Vault>("audit")
            .with_label("AUDIT")
            .with_color(Color::Yellow)
            .call(&[], || ());
        assert!(h.console().calls()[0].1[0].starts_with(Color::Yellow.escape()));
        h.console().assert_contains("METHOD 'AUDIT' passed args");
    }

    #[test]
    fn test_muted_method_is_silent() {
        let h = TestHarness::new();
        h.registry()
            .tag(
                Coordinate::member(TypeKey::of::<Vault>(), Member::method("tick")),
                Tag::Mute,
            )
            .unwrap();
        assert_eq!(h.method::<Vault>("tick").call(&[], || 7), 7);
        assert!(h.console().calls().is_empty());
    }

    #[test]
    fn test_debug_off_is_silent() {
        let h = TestHarness::new();
        h.logger().set_debug(false);
        h.console().clear();
        assert_eq!(h.method::<Vault>("deposit").call(&[&1], || 2), 2);
        assert!(h.console().calls().is_empty());
    }
}
