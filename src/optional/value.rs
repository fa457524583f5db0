use super::error::{OptionalError, OptionalResult};

/// A value that is either present or absent, used to avoid ambiguous null
/// references.
///
/// The absent case is a unit variant: zero-sized and constructed eagerly, so
/// every `Absent` is the same shared marker and compares equal to every other.
/// Values are immutable once constructed; [`Optional::map`] produces a new
/// optional and never mutates the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optional<T> {
    Present(T),
    Absent,
}

impl<T> Optional<T> {
    /// Wrap a value that is known to exist.
    pub const fn of(value: T) -> Self {
        Optional::Present(value)
    }

    /// The shared absent marker.
    pub const fn absent() -> Self {
        Optional::Absent
    }

    /// Construct from nullable input: `None` routes to the absent case, it
    /// never becomes a present "null".
    pub fn from_nullable(value: Option<T>) -> Self {
        match value {
            Some(v) => Optional::Present(v),
            None => Optional::Absent,
        }
    }

    /// Whether a value is present.
    pub const fn is_present(&self) -> bool {
        matches!(self, Optional::Present(_))
    }

    /// Whether the value is absent.
    pub const fn is_absent(&self) -> bool {
        !self.is_present()
    }

    /// Returns the held value, or an illegal state error when absent.
    ///
    /// Callers should check [`Optional::is_present`] first or reach for
    /// [`Optional::get_or_else`] / [`Optional::get_or_null`] instead.
    pub fn get(&self) -> OptionalResult<&T> {
        match self {
            Optional::Present(value) => Ok(value),
            Optional::Absent => Err(OptionalError::illegal_state(
                "Trying to get a nonexistent value.",
            )),
        }
    }

    /// Returns the held value, or `default` unchanged when absent.
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Optional::Present(value) => value,
            Optional::Absent => default,
        }
    }

    /// Returns the held value, or `None` when absent. An explicit escape
    /// hatch for interop with `Option`-based code.
    pub fn get_or_null(self) -> Option<T> {
        self.into()
    }

    /// Apply `f` to the held value and wrap the result. A `None` result
    /// becomes the absent case. On an absent optional `f` is not invoked and
    /// the absent marker is returned unchanged.
    pub fn map<U, F>(self, f: F) -> Optional<U>
    where
        F: FnOnce(T) -> Option<U>,
    {
        match self {
            Optional::Present(value) => Optional::from_nullable(f(value)),
            Optional::Absent => Optional::Absent,
        }
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        Optional::from_nullable(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        match value {
            Optional::Present(v) => Some(v),
            Optional::Absent => None,
        }
    }
}
