/// Declares a `Copy` newtype identifier over an integer.
///
/// Attributes (docs, extra derives) written before the name are forwarded.
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $inner:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)] // Same layout as the wrapped integer
        pub struct $name(pub $inner);

        impl $name {
            pub const fn new(id: $inner) -> Self {
                Self(id)
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> $inner {
                id.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Position of a token in its sentence. Real tokens start at 1; 0 is the virtual root.
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    TokenIndex,
    usize
);

impl TokenIndex {
    /// The synthetic root every sentence hangs from.
    pub const ROOT: TokenIndex = TokenIndex(0);

    pub fn is_root(self) -> bool {
        self.0 == 0
    }
}
