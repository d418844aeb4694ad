//! Delegate trait - the value generator a tracker wraps

use std::fmt::Debug;
use std::hash::Hash;

/// Control operations handled by the tracker itself and never forwarded
pub const RESERVED_OPERATIONS: [&str; 4] = ["clear", "reset", "exclude", "repeatable"];

/// Check whether an operation name is reserved for tracker control
pub fn is_reserved(operation: &str) -> bool {
    RESERVED_OPERATIONS.contains(&operation)
}

/// A value generator exposing named operations
///
/// The tracker forwards any operation name it receives; the delegate decides
/// which names it accepts and reports the rest through its own error type.
pub trait Delegate {
    /// Argument type; argument lists are part of the history key
    type Arg: Clone + Eq + Hash + Debug + Send + 'static;

    /// Produced value; compared by equality for deduplication
    type Value: Clone + Eq + Hash + Send + 'static;

    /// Failure raised by the delegate, propagated unchanged
    type Error;

    /// Invoke `operation` with `args`
    fn invoke(&mut self, operation: &str, args: &[Self::Arg]) -> Result<Self::Value, Self::Error>;
}

impl<D: Delegate + ?Sized> Delegate for Box<D> {
    type Arg = D::Arg;
    type Value = D::Value;
    type Error = D::Error;

    fn invoke(&mut self, operation: &str, args: &[Self::Arg]) -> Result<Self::Value, Self::Error> {
        (**self).invoke(operation, args)
    }
}

impl<D: Delegate + ?Sized> Delegate for &mut D {
    type Arg = D::Arg;
    type Value = D::Value;
    type Error = D::Error;

    fn invoke(&mut self, operation: &str, args: &[Self::Arg]) -> Result<Self::Value, Self::Error> {
        (**self).invoke(operation, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Delegate for Echo {
        type Arg = u32;
        type Value = String;
        type Error = String;

        fn invoke(&mut self, operation: &str, args: &[u32]) -> Result<String, String> {
            Ok(format!("{}{:?}", operation, args))
        }
    }

    #[test]
    fn test_reserved_operations() {
        assert!(is_reserved("clear"));
        assert!(is_reserved("reset"));
        assert!(is_reserved("exclude"));
        assert!(is_reserved("repeatable"));
        assert!(!is_reserved("name"));
        assert!(!is_reserved("Clear"));
    }

    fn invoke_via<D: Delegate<Arg = u32>>(mut delegate: D, operation: &str, args: &[u32]) -> D::Value
    where
        D::Error: Debug,
    {
        delegate.invoke(operation, args).unwrap()
    }

    #[test]
    fn test_boxed_and_borrowed_delegates_forward() {
        assert_eq!(invoke_via(Box::new(Echo), "op", &[1, 2]), "op[1, 2]");

        let mut echo = Echo;
        assert_eq!(invoke_via(&mut echo, "other", &[]), "other[]");
    }
}
