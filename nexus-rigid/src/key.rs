//! Node handles.
//!
//! Every node owned by a [`RigidList`](crate::RigidList) is addressed by a
//! [`Key`]: a small integer index into the list's node arena. The maximum
//! value of the integer type is reserved as the `NONE` sentinel, which is
//! what empty links and the end-of-sequence position are stored as.

/// Trait for integer types usable as node handles.
///
/// The key width bounds the capacity of a list: a list keyed by `u16`
/// can own at most `u16::MAX` nodes, since `u16::MAX` itself is `NONE`.
///
/// # Example
///
/// ```
/// use nexus_rigid::Key;
///
/// let key: u32 = 42;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::from_usize(7).as_usize(), 7);
/// ```
pub trait Key: Copy + Eq + core::fmt::Debug {
    /// Sentinel value representing "no node".
    const NONE: Self;

    /// Creates a key from an arena index.
    fn from_usize(val: usize) -> Self;

    /// Returns the arena index of this key.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this is NOT the sentinel value.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Converts to `Option`, mapping the sentinel to `None`.
    #[inline]
    fn into_option(self) -> Option<Self> {
        if self.is_none() { None } else { Some(self) }
    }

    /// Converts from `Option`, mapping `None` to the sentinel.
    #[inline]
    fn from_option(key: Option<Self>) -> Self {
        key.unwrap_or(Self::NONE)
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);
