//! The successor capability treaps need to cut a single key out of a tree.
//!
//! A treap removes `key` by splitting off everything below `key`, then
//! splitting what's left at the smallest value greater than `key`. Whatever
//! lands between the two cuts is exactly the node holding `key`. That second
//! cut point can't be derived from `Ord` alone, so key types used with the
//! treaps must say what their immediate successor is.

/// Key types with a computable immediate successor.
///
/// # Contract
///
/// `k.next_key()` must return the smallest value strictly greater than `k`, or
/// `None` if `k` is the greatest value of the type. Returning anything larger
/// than the true successor would make treap removal take out the keys in
/// between as well.
///
/// # Examples
///
/// ```
/// use balanced_bst::NextKey;
///
/// assert_eq!(41u8.next_key(), Some(42));
/// assert_eq!(u8::MAX.next_key(), None);
/// assert_eq!("ab".to_string().next_key(), Some("ab\0".to_string()));
/// ```
pub trait NextKey: Ord + Sized {
    /// The smallest value greater than `self`, if there is one.
    fn next_key(&self) -> Option<Self>;
}

macro_rules! impl_next_key_for_integers {
    ($($int:ty),* $(,)?) => {
        $(
            impl NextKey for $int {
                fn next_key(&self) -> Option<Self> {
                    self.checked_add(1)
                }
            }
        )*
    };
}

impl_next_key_for_integers!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl NextKey for char {
    fn next_key(&self) -> Option<Self> {
        match *self {
            // Skip the surrogate range, which holds no `char`s.
            '\u{D7FF}' => Some('\u{E000}'),
            c => char::from_u32(u32::from(c) + 1),
        }
    }
}

impl NextKey for bool {
    fn next_key(&self) -> Option<Self> {
        (!*self).then_some(true)
    }
}

/// Strings compare lexicographically, so nothing fits between `s` and `s`
/// followed by the smallest `char`.
impl NextKey for String {
    fn next_key(&self) -> Option<Self> {
        let mut next = String::with_capacity(self.len() + 1);
        next.push_str(self);
        next.push('\0');
        Some(next)
    }
}
