//! Property interception.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracekit_console::TraceLogger;
use tracekit_core::logging::targets;
use tracekit_core::render::{REDACTED, json};
use tracekit_core::{Coordinate, Member, MemberStyle, MetadataRegistry, TypeKey};

use super::Binding;

/// A field whose every read and write is announced.
///
/// ```ignore
/// struct Cart {
///     total: Traced<u32>,
/// }
///
/// let mut cart = Cart { total: Traced::member::<Cart>("total", 0) };
/// cart.total.set(42); //         Setting value for 'total':     42
/// cart.total.get();   //         Getting value from 'total':    42
/// ```
///
/// The value given at construction is the backing storage until the first
/// write. Values are shown as JSON.
#[derive(Clone)]
pub struct Traced<T> {
    value: T,
    name: Cow<'static, str>,
    owner: Option<TypeKey>,
    binding: Binding,
}

impl<T> Traced<T> {
    /// Wrap `value` as a free-standing property called `name`.
    pub fn new(name: impl Into<Cow<'static, str>>, value: T) -> Self {
        Self {
            value,
            name: name.into(),
            owner: None,
            binding: Binding::default(),
        }
    }

    /// Wrap `value` as property `name` of `O`, styled by `O`'s tags.
    pub fn member<O: ?Sized>(name: impl Into<Cow<'static, str>>, value: T) -> Self {
        Self::new(name, value).with_owner(TypeKey::of::<O>())
    }

    /// Attach the property to an owner type.
    #[must_use]
    pub fn with_owner(mut self, owner: TypeKey) -> Self {
        self.owner = Some(owner);
        self
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

    /// Property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry coordinate, if the property has an owner.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.owner
            .map(|owner| Coordinate::member(owner, Member::property(self.name.clone())))
    }

    /// Take the backing value out without announcing anything.
    pub fn into_inner(self) -> T {
        self.value
    }

    fn style(&self) -> MemberStyle {
        match self.coordinate() {
            Some(coordinate) => self.binding.style(&coordinate),
            None => MemberStyle::plain(self.binding.logger().accent()),
        }
    }
}

impl<T: Serialize> Traced<T> {
    /// Read the value, announcing it.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.announce("\t\tGetting value from", &self.value);
        self.value.clone()
    }

    /// Read the value through a borrow, announcing it.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        self.announce("\t\tGetting value from", &self.value);
        read(&self.value)
    }

    /// Store `value`, announcing it.
    pub fn set(&mut self, value: T) {
        self.announce("\t\tSetting value for", &value);
        self.value = value;
    }

    fn announce(&self, action: &str, value: &T) {
        if !self.binding.is_debug() {
            return;
        }
        let style = self.style();
        if style.mute {
            return;
        }
        log::trace!(target: targets::INTERCEPT, "{action} {}", self.name);
        let shown = if style.redact {
            REDACTED.to_string()
        } else {
            json(value)
        };
        self.binding.emit(
            style.color,
            vec![
                format!("{action} '{}':\t", style.display_name(&self.name)),
                shown,
            ],
        );
    }
}

impl<T: fmt::Debug> fmt::Debug for Traced<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traced")
            .field("name", &self.name)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestHarness;
    use serde::Serialize;
    use tracekit_core::{Color, Tag};

    struct Cart;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Item {
        sku: String,
        qty: u32,
    }

    #[test]
    fn test_write_then_read() {
        let h = TestHarness::new();
        let mut total = h.property("total", 0_u32);

        total.set(42);
        let read = total.get();

        assert_eq!(read, 42);
        assert_eq!(
            h.output(),
            vec![
                "\t\tSetting value for 'total':\t 42",
                "\t\tGetting value from 'total':\t 42",
            ]
        );
    }

    #[test]
    fn test_initial_value_is_backing_storage() {
        let h = TestHarness::new();
        let name = h.property("name", "ada".to_string());
        assert_eq!(name.get(), "ada");
        h.console().assert_contains("Getting value from 'name':\t \"ada\"");
    }

    #[test]
    fn test_values_render_as_json() {
        let h = TestHarness::new();
        let mut item = h.property("item", None::<Item>);
        item.set(Some(Item {
            sku: "A-1".into(),
            qty: 2,
        }));
        let qty = item.with(|item| item.as_ref().map(|i| i.qty));
        assert_eq!(qty, Some(2));
        assert_eq!(
            h.output()[0],
            "\t\tSetting value for 'item':\t {\"sku\":\"A-1\",\"qty\":2}"
        );
    }

    #[test]
    fn test_into_inner_is_silent() {
        let h = TestHarness::new();
        let total = h.property("total", 5);
        assert_eq!(total.into_inner(), 5);
        assert!(h.console().calls().is_empty());
    }

    #[test]
    fn test_owner_tags_apply() {
        let h = TestHarness::new();
        let owner = TypeKey::of::<Cart>();
        h.registry()
            .tag(Coordinate::member(owner, Member::property("coupon")), Tag::Redact)
            .unwrap();
        h.registry()
            .tag(Coordinate::of_type(owner), Tag::Color(Color::Blue))
            .unwrap();

        let mut coupon = h.property("coupon", String::new()).with_owner(owner);
        coupon.set("SAVE10".into());

        assert_eq!(h.output(), vec!["\t\tSetting value for 'coupon':\t <redacted>"]);
        assert!(h.console().calls()[0].1[0].starts_with(Color::Blue.escape()));
    }

    #[test]
    fn test_debug_off_is_silent() {
        let h = TestHarness::new();
        h.logger().set_debug(false);
        h.console().clear();
        let mut total = h.property("total", 1);
        total.set(2);
        assert_eq!(total.get(), 2);
        assert!(h.console().calls().is_empty());
    }
}
