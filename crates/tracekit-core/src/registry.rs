//! Metadata registry: tags attached to a type or one of its members.
//!
//! Interceptors consult the registry every time they fire, to decide the
//! color of a trace line, whether a member is shown under a label, whether
//! its values are redacted and whether it is muted entirely. Tags are
//! written once, when a type is installed, and only read afterwards.
//!
//! # Example
//!
//! ```
//! use tracekit_core::{Color, Coordinate, Member, MetadataRegistry, Tag, TypeKey};
//!
//! let registry = MetadataRegistry::new();
//! let owner = TypeKey::named("bank::Account");
//! let pin = Coordinate::member(owner, Member::Param(1));
//!
//! registry.tag(pin.clone(), Tag::Redact).unwrap();
//! assert!(registry.tag(pin.clone(), Tag::Redact).is_err());
//! assert_eq!(registry.read(&pin), vec![Tag::Redact]);
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::MetadataError;
use crate::logging::targets;
use crate::presets::Color;
use crate::render::short_type_name;

/// Identifies an instrumented type by its full type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(&'static str);

impl TypeKey {
    /// Key of type `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>())
    }

    /// Key from an explicit name.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self(name)
    }

    /// Full type name, module path included.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0
    }

    /// Type name without its module path.
    #[must_use]
    pub fn short_name(&self) -> String {
        short_type_name(self.0)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// A member of an instrumented type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    /// Constructor parameter, by position.
    Param(usize),
    /// Field wrapped by the property interceptor.
    Property(Cow<'static, str>),
    /// Method wrapped by the method interceptor.
    Method(Cow<'static, str>),
}

impl Member {
    /// Property member.
    pub fn property(name: impl Into<Cow<'static, str>>) -> Self {
        Member::Property(name.into())
    }

    /// Method member.
    pub fn method(name: impl Into<Cow<'static, str>>) -> Self {
        Member::Method(name.into())
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Param(index) => write!(f, "{index}"),
            Member::Property(name) | Member::Method(name) => f.write_str(name),
        }
    }
}

/// Where a tag list lives: a type, optionally narrowed to one member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Owning type.
    pub owner: TypeKey,
    /// Member of the owning type, `None` for the type itself.
    pub member: Option<Member>,
}

impl Coordinate {
    /// Coordinate of the type itself.
    #[must_use]
    pub fn of_type(owner: TypeKey) -> Self {
        Self {
            owner,
            member: None,
        }
    }

    /// Coordinate of one member.
    #[must_use]
    pub fn member(owner: TypeKey, member: Member) -> Self {
        Self {
            owner,
            member: Some(member),
        }
    }

    /// The type-level coordinate of the same owner.
    #[must_use]
    pub fn type_level(&self) -> Self {
        Self::of_type(self.owner)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            None => write!(f, "{}", self.owner),
            Some(Member::Param(index)) => write!(f, "{}#{index}", self.owner),
            Some(Member::Property(name)) => write!(f, "{}.{name}", self.owner),
            Some(Member::Method(name)) => write!(f, "{}::{name}", self.owner),
        }
    }
}

/// A tag attached to a coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// Paint trace lines with this color.
    Color(Color),
    /// Show this label instead of the member name.
    Label(String),
    /// Print `<redacted>` instead of the value.
    Redact,
    /// Suppress trace lines entirely.
    Mute,
}

impl Tag {
    /// The semantic key used for duplicate detection.
    #[must_use]
    pub fn kind(&self) -> TagKind {
        match self {
            Tag::Color(_) => TagKind::Color,
            Tag::Label(_) => TagKind::Label,
            Tag::Redact => TagKind::Redact,
            Tag::Mute => TagKind::Mute,
        }
    }
}

/// Semantic key of a [`Tag`]: at most one tag per kind per coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Color,
    Label,
    Redact,
    Mute,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TagKind::Color => "color",
            TagKind::Label => "label",
            TagKind::Redact => "redact",
            TagKind::Mute => "mute",
        })
    }
}

/// Presentation of a member, resolved from its tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberStyle {
    /// Color for trace lines.
    pub color: Color,
    /// Label overriding the member name.
    pub label: Option<String>,
    /// Whether values are hidden.
    pub redact: bool,
    /// Whether trace lines are suppressed.
    pub mute: bool,
}

impl MemberStyle {
    /// Style of an untagged member.
    #[must_use]
    pub fn plain(color: Color) -> Self {
        Self {
            color,
            label: None,
            redact: false,
            mute: false,
        }
    }

    /// The label if one is set, otherwise `name`.
    #[must_use]
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(name)
    }
}

/// Thread-safe tag store keyed by [`Coordinate`].
///
/// Entries for one coordinate keep their insertion order. A poisoned lock
/// reads as empty, and writes fail with [`MetadataError::Unavailable`].
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    inner: Arc<Mutex<HashMap<Coordinate, Vec<Tag>>>>,
}

impl MetadataRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `tag` to the list at `coordinate`.
    ///
    /// Fails with [`MetadataError::Duplicate`] if a tag of the same kind is
    /// already there; the list is left unchanged.
    pub fn tag(&self, coordinate: Coordinate, tag: Tag) -> Result<(), MetadataError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| MetadataError::Unavailable)?;
        let entries = guard.entry(coordinate.clone()).or_default();
        if entries.iter().any(|existing| existing.kind() == tag.kind()) {
            return Err(MetadataError::Duplicate {
                coordinate,
                kind: tag.kind(),
            });
        }
        log::debug!(target: targets::REGISTRY, "tag {coordinate}: {tag:?}");
        entries.push(tag);
        Ok(())
    }

    /// Returns the tags at `coordinate`, or an empty list.
    #[must_use]
    pub fn read(&self, coordinate: &Coordinate) -> Vec<Tag> {
        self.inner
            .lock()
            .ok()
            .and_then(|g| g.get(coordinate).cloned())
            .unwrap_or_default()
    }

    /// Commits everything `T` describes, all or nothing.
    ///
    /// A duplicate inside the description, or against tags already in the
    /// registry, fails the install and writes nothing.
    pub fn install<T: Instrument + ?Sized>(&self) -> Result<(), MetadataError> {
        let mut tags = TypeTags::of::<T>();
        T::describe(&mut tags);
        self.commit(tags)
    }

    /// Commits a staged description, all or nothing.
    pub fn commit(&self, tags: TypeTags) -> Result<(), MetadataError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| MetadataError::Unavailable)?;

        let mut seen: HashMap<&Coordinate, Vec<TagKind>> = HashMap::new();
        for (coordinate, tag) in &tags.staged {
            let kind = tag.kind();
            let existing = guard
                .get(coordinate)
                .is_some_and(|list| list.iter().any(|t| t.kind() == kind));
            let kinds = seen.entry(coordinate).or_default();
            if existing || kinds.contains(&kind) {
                return Err(MetadataError::Duplicate {
                    coordinate: coordinate.clone(),
                    kind,
                });
            }
            kinds.push(kind);
        }

        let count = tags.staged.len();
        for (coordinate, tag) in tags.staged {
            guard.entry(coordinate).or_default().push(tag);
        }
        log::debug!(target: targets::REGISTRY, "installed {} tag(s) for {}", count, tags.owner);
        Ok(())
    }

    /// Resolves the presentation of a member.
    ///
    /// Member tags win over type tags; `default_color` applies when neither
    /// sets a color. A type label names the type only and is not inherited
    /// by its members.
    #[must_use]
    pub fn style(&self, coordinate: &Coordinate, default_color: Color) -> MemberStyle {
        let mut style = MemberStyle::plain(default_color);
        let inherited = coordinate.member.is_some();
        let mut layers = vec![(inherited, self.read(&coordinate.type_level()))];
        if inherited {
            layers.push((false, self.read(coordinate)));
        }
        for (from_type, tags) in layers {
            for tag in tags {
                match tag {
                    Tag::Color(color) => style.color = color,
                    Tag::Label(label) if !from_type => style.label = Some(label),
                    Tag::Label(_) => {}
                    Tag::Redact => style.redact = true,
                    Tag::Mute => style.mute = true,
                }
            }
        }
        style
    }

    /// Checks if any tag exists at `coordinate`.
    #[must_use]
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.inner
            .lock()
            .map(|g| g.get(coordinate).is_some_and(|list| !list.is_empty()))
            .unwrap_or(false)
    }

    /// Number of coordinates holding tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .map(|g| g.values().filter(|list| !list.is_empty()).count())
            .unwrap_or(0)
    }

    /// Returns true if no tag has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every tag.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            guard.clear();
        }
    }
}

static REGISTRY: OnceLock<Arc<MetadataRegistry>> = OnceLock::new();

/// The process-wide registry used by interceptors unless told otherwise.
#[must_use]
pub fn registry() -> &'static Arc<MetadataRegistry> {
    REGISTRY.get_or_init(|| Arc::new(MetadataRegistry::new()))
}

/// A type that describes its own tags.
///
/// Usually generated by `#[derive(Instrument)]`; install it once at startup
/// with [`MetadataRegistry::install`].
pub trait Instrument {
    /// Stages the tags of this type.
    fn describe(tags: &mut TypeTags);
}

/// Staged tags of one type, committed by [`MetadataRegistry::commit`].
#[derive(Debug, Clone)]
pub struct TypeTags {
    owner: TypeKey,
    staged: Vec<(Coordinate, Tag)>,
}

impl TypeTags {
    /// Starts an empty description of `owner`.
    #[must_use]
    pub fn new(owner: TypeKey) -> Self {
        Self {
            owner,
            staged: Vec::new(),
        }
    }

    /// Starts an empty description of `T`.
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self::new(TypeKey::of::<T>())
    }

    /// The described type.
    #[must_use]
    pub fn owner(&self) -> TypeKey {
        self.owner
    }

    /// Tags the type itself.
    pub fn on_type(&mut self, tag: Tag) -> &mut Self {
        self.stage(None, tag)
    }

    /// Tags a constructor parameter.
    pub fn param(&mut self, index: usize, tag: Tag) -> &mut Self {
        self.stage(Some(Member::Param(index)), tag)
    }

    /// Tags a property.
    pub fn property(&mut self, name: impl Into<Cow<'static, str>>, tag: Tag) -> &mut Self {
        self.stage(Some(Member::property(name)), tag)
    }

    /// Tags a method.
    pub fn method(&mut self, name: impl Into<Cow<'static, str>>, tag: Tag) -> &mut Self {
        self.stage(Some(Member::method(name)), tag)
    }

    /// Number of staged tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Returns true if nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    fn stage(&mut self, member: Option<Member>, tag: Tag) -> &mut Self {
        let coordinate = Coordinate {
            owner: self.owner,
            member,
        };
        self.staged.push((coordinate, tag));
        self
    }
}
