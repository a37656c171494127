/// Build a [`Mask`](crate::Mask) from a literal.
///
/// Values are `true`, `false`, a nested `{ ... }` block, or any single
/// token tree convertible into [`MaskValue`](crate::MaskValue)
/// (wrap longer expressions in parentheses).
///
/// # Examples
///
/// ```
/// use xp_mask::{mask, MaskValue};
///
/// let inner = mask! { "k" => true };
/// let m = mask! {
///     "id" => true,
///     "secret" => false,
///     "owner" => { "name" => true },
///     "blob" => (inner.clone()),
/// };
///
/// assert_eq!(m.get("secret"), Some(&MaskValue::Hidden));
/// assert_eq!(m.get("blob"), Some(&MaskValue::Nested(inner)));
/// assert!(mask! {}.is_empty());
/// ```
#[macro_export]
macro_rules! mask {
    () => {
        $crate::Mask::new()
    };
    ($($key:literal => $value:tt),+ $(,)?) => {{
        let mut mask = $crate::Mask::new();
        $( mask.insert($key, $crate::__mask_value!($value)); )+
        mask
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __mask_value {
    (true) => {
        $crate::MaskValue::Expose
    };
    (false) => {
        $crate::MaskValue::Hidden
    };
    ({ $($inner:tt)* }) => {
        $crate::MaskValue::Nested($crate::mask!($($inner)*))
    };
    ($other:expr) => {
        $crate::MaskValue::from($other)
    };
}
