//! Model keys
//!
//! A [`ModelKey`] names one side of a mapping. It is either a Rust type
//! (compared by [`TypeId`]) or an opaque token minted by
//! [`ModelKey::token`]. Two tokens are equal only when one was cloned from
//! the other; the description is for display only.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a model shape used as a registry key
#[derive(Clone)]
pub enum ModelKey {
    /// A Rust type
    Type { id: TypeId, name: &'static str },

    /// An opaque unique token
    Token(Token),
}

impl ModelKey {
    /// Key for the type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        ModelKey::Type {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Mint a new token. Every call returns a distinct key.
    pub fn token(description: impl Into<String>) -> Self {
        ModelKey::Token(Token::new(description))
    }

    /// Whether this key names a Rust type
    pub fn is_type(&self) -> bool {
        matches!(self, ModelKey::Type { .. })
    }

    /// Whether this key is a token
    pub fn is_token(&self) -> bool {
        matches!(self, ModelKey::Token(_))
    }

    /// The `TypeId` behind a type key
    pub fn as_type_id(&self) -> Option<TypeId> {
        match self {
            ModelKey::Type { id, .. } => Some(*id),
            ModelKey::Token(_) => None,
        }
    }

    /// Type name or token description
    pub fn name(&self) -> &str {
        match self {
            ModelKey::Type { name, .. } => *name,
            ModelKey::Token(token) => token.description(),
        }
    }
}

impl PartialEq for ModelKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ModelKey::Type { id: a, .. }, ModelKey::Type { id: b, .. }) => a == b,
            (ModelKey::Token(a), ModelKey::Token(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ModelKey {}

impl Hash for ModelKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ModelKey::Type { id, .. } => {
                0u8.hash(state);
                id.hash(state);
            }
            ModelKey::Token(token) => {
                1u8.hash(state);
                token.hash(state);
            }
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKey::Type { name, .. } => f.write_str(name),
            ModelKey::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

impl fmt::Debug for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKey::Type { name, .. } => f.debug_tuple("Type").field(name).finish(),
            ModelKey::Token(token) => f.debug_tuple("Token").field(token).finish(),
        }
    }
}

impl From<Token> for ModelKey {
    fn from(token: Token) -> Self {
        ModelKey::Token(token)
    }
}

/// Opaque unique token
#[derive(Clone)]
pub struct Token {
    id: u64,
    description: Arc<str>,
}

impl Token {
    /// Mint a token distinct from every other token in the process
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed),
            description: Arc::from(description.into()),
        }
    }

    /// Text shown in `Symbol(..)` display form
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {:?}", self.id, self.description)
    }
}
