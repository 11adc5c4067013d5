use std::any::TypeId;
use std::fmt;

/// Identifier substituted when a binding declares none.
pub const DEFAULT_ID: &str = "default";

/// Identity of a completer implementation type.
///
/// Two kinds compare equal exactly when they name the same Rust type;
/// the type name is carried for diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompleterKind {
    type_id: TypeId,
    name: &'static str,
}

impl CompleterKind {
    /// Get the kind for a completer type
    pub fn of<C: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: std::any::type_name::<C>(),
        }
    }

    /// Type name of the completer this kind refers to
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for CompleterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Declares which completer a command parameter uses.
///
/// A binding is plain immutable data attached to a parameter definition:
/// the completer kind, an optional identifier distinguishing multiple
/// configurations of that kind, and whether resolutions should reuse one
/// shared instance. The identifier is kept raw here; normalization happens
/// when the registry turns it into a cache key.
#[derive(Clone, Debug)]
pub struct CompleterBinding {
    kind: CompleterKind,
    id: String,
    shared: bool,
}

impl CompleterBinding {
    /// Create a binding for the given kind (empty identifier, not shared)
    pub fn new(kind: CompleterKind) -> Self {
        Self {
            kind,
            id: String::new(),
            shared: false,
        }
    }

    /// Create a binding for a completer type
    pub fn of<C: 'static>() -> Self {
        Self::new(CompleterKind::of::<C>())
    }

    /// Set the identifier distinguishing this configuration
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Request shared-instance resolution for this binding
    pub fn shared(mut self) -> Self {
        self.shared = true;
        self
    }

    /// The completer kind to resolve
    pub fn kind(&self) -> CompleterKind {
        self.kind
    }

    /// The raw, pre-normalization identifier (empty means default)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether resolutions reuse a shared instance
    pub fn is_shared(&self) -> bool {
        self.shared
    }
}

/// Normalize an identifier into its canonical cache-key form.
///
/// Surrounding whitespace is trimmed, an empty result becomes
/// [`DEFAULT_ID`], and the rest is lower-cased. Every place an identifier
/// participates in a registry key goes through this one rule, so
/// registering under `" Foo "` and resolving `"foo"` hit the same slot.
pub fn canonical_id(id: &str) -> String {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        DEFAULT_ID.to_string()
    } else {
        trimmed.to_lowercase()
    }
}
