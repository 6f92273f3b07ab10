//! Constructor interception.

use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::sync::Arc;

use tracekit_console::TraceLogger;
use tracekit_core::logging::targets;
use tracekit_core::render::arg_list;
use tracekit_core::{Coordinate, Member, MetadataRegistry, Tag, TypeKey};

use super::{ArgList, Binding};

/// Announces every construction of one type.
///
/// ```text
/// New: Account ["ada", <redacted>]
/// ```
///
/// Parameter tags (`Member::Param(i)`) apply per position, so a redacted
/// parameter is hidden while its neighbours are shown. A type label
/// replaces the type name; a muted type is never announced.
#[derive(Debug, Clone)]
pub struct ConstructorInterceptor {
    owner: TypeKey,
    binding: Binding,
}

impl ConstructorInterceptor {
    /// Create an interceptor for constructors of `owner`.
    #[must_use]
    pub fn new(owner: TypeKey) -> Self {
        Self {
            owner,
            binding: Binding::default(),
        }
    }

    /// Create an interceptor for constructors of `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::new(TypeKey::of::<T>())
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

    /// Announce a construction with these arguments.
    pub fn announce(&self, args: &[&dyn Debug]) {
        if !self.binding.is_debug() {
            return;
        }
        let style = self.binding.style(&Coordinate::of_type(self.owner));
        if style.mute {
            return;
        }
        log::trace!(target: targets::INTERCEPT, "construct {}", self.owner);

        let registry = self.binding.registry();
        let rendered = arg_list(args, |index| {
            style.redact
                || registry
                    .read(&Coordinate::member(self.owner, Member::Param(index)))
                    .contains(&Tag::Redact)
        });
        let type_name = self.owner.short_name();
        self.binding.emit(
            style.color,
            vec![
                "New:".to_string(),
                style.display_name(&type_name).to_string(),
                rendered,
            ],
        );
    }

    /// Turn `build` into a constructor announcing itself.
    ///
    /// The returned [`Constructor`] produces exactly what `build` produces;
    /// only the announcement is added.
    pub fn wrap<T, A, F>(self, build: F) -> Constructor<T, A, F>
    where
        A: ArgList,
        F: Fn(A) -> T,
    {
        Constructor {
            interceptor: self,
            build,
            _marker: PhantomData,
        }
    }
}

/// A constructor function wrapped by [`ConstructorInterceptor::wrap`].
pub struct Constructor<T, A, F> {
    interceptor: ConstructorInterceptor,
    build: F,
    _marker: PhantomData<fn(A) -> T>,
}

impl<T, A, F> Constructor<T, A, F>
where
    A: ArgList,
    F: Fn(A) -> T,
{
    /// Announce, then build.
    pub fn construct(&self, args: A) -> T {
        self.interceptor.announce(&args.debug_args());
        (self.build)(args)
    }

    /// The interceptor doing the announcing.
    pub fn interceptor(&self) -> &ConstructorInterceptor {
        &self.interceptor
    }
}

impl<T, A, F> fmt::Debug for Constructor<T, A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("interceptor", &self.interceptor)
            .finish_non_exhaustive()
    }
}
