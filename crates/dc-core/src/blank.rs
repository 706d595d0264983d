//! Blankness of scalar values.
//!
//! What counts as a blank scalar depends on the host types, so it is
//! expressed as a capability: scalar types implement [`Blank`], and a
//! [`Blankness`] classifier decides for the blank predicate. [`Standard`]
//! defers to [`Blank`]; any `Fn(&S) -> bool` can stand in for it.

use std::borrow::Cow;

/// Scalar types that know whether they are blank.
///
/// Strings are blank when empty or whitespace-only, `false` is blank,
/// numbers never are.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.chars().all(char::is_whitespace)
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl Blank for Cow<'_, str> {
    fn is_blank(&self) -> bool {
        self.as_ref().is_blank()
    }
}

impl Blank for bool {
    fn is_blank(&self) -> bool {
        !*self
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Blank::is_blank)
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for Box<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

macro_rules! never_blank {
    ($($t:ty),* $(,)?) => {
        $(
            impl Blank for $t {
                fn is_blank(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_blank!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Classifies scalars of type `S` for the blank predicate.
pub trait Blankness<S: ?Sized> {
    fn is_blank_scalar(&self, scalar: &S) -> bool;
}

/// Classifier that defers to the scalar's own [`Blank`] impl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Standard;

impl<S: Blank + ?Sized> Blankness<S> for Standard {
    fn is_blank_scalar(&self, scalar: &S) -> bool {
        scalar.is_blank()
    }
}

impl<S: ?Sized, F: Fn(&S) -> bool> Blankness<S> for F {
    fn is_blank_scalar(&self, scalar: &S) -> bool {
        self(scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strings() {
        assert!("".is_blank());
        assert!("   ".is_blank());
        assert!("\n\t  ".is_blank());
        assert!("\u{3000}".is_blank());
        assert!(!"John".is_blank());
        assert!(!" x ".is_blank());
        assert!(String::new().is_blank());
        assert!(Cow::Borrowed(" ").is_blank());
    }

    #[test]
    fn test_booleans() {
        assert!(false.is_blank());
        assert!(!true.is_blank());
    }

    #[test]
    fn test_numbers_never_blank() {
        assert!(!0i32.is_blank());
        assert!(!0u64.is_blank());
        assert!(!0.0f64.is_blank());
        assert!(!f64::NAN.is_blank());
    }

    #[test]
    fn test_option() {
        assert!(None::<i32>.is_blank());
        assert!(Some("").is_blank());
        assert!(!Some(0).is_blank());
    }

    #[test]
    fn test_standard_classifier() {
        assert!(Standard.is_blank_scalar(" "));
        assert!(!Standard.is_blank_scalar(&7u8));
    }

    #[test]
    fn test_closure_classifier() {
        let zero_is_blank = |n: &i64| *n == 0;
        assert!(zero_is_blank.is_blank_scalar(&0));
        assert!(!zero_is_blank.is_blank_scalar(&3));
    }
}
