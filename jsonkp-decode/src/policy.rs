//! Invalid item policies for collection decoding

use jsonkp_core::{CoercionFailure, CoercionReason};
use std::fmt;

/// Callback computing a substitute from the failure it replaces
pub type CalculateFn<T> =
    Box<dyn Fn(&CoercionFailure) -> Result<T, String> + Send + Sync + 'static>;

/// What to do when one element of a collection fails to convert
///
/// Policies only apply to elements. A container of the wrong shape is always
/// an error.
pub enum InvalidItemPolicy<T> {
    /// Abort the whole collection with the element's failure
    Fail,
    /// Drop the element, keeping the order of the rest (default)
    Remove,
    /// Put a clone of this value in each failed element's place
    ///
    /// One policy can cover many failures, which is why collection elements
    /// are `Clone`.
    Value(T),
    /// Put the callback's result in the element's place
    ///
    /// An `Err` from the callback aborts the collection.
    CalculateValue(CalculateFn<T>),
}

impl<T> InvalidItemPolicy<T> {
    /// Substitute with a callback that always succeeds
    pub fn calculate_value<F>(f: F) -> Self
    where
        F: Fn(&CoercionFailure) -> T + Send + Sync + 'static,
    {
        InvalidItemPolicy::CalculateValue(Box::new(move |failure| Ok(f(failure))))
    }

    /// Substitute with a callback that may itself fail
    pub fn try_calculate_value<F>(f: F) -> Self
    where
        F: Fn(&CoercionFailure) -> Result<T, String> + Send + Sync + 'static,
    {
        InvalidItemPolicy::CalculateValue(Box::new(f))
    }

    /// Short name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            InvalidItemPolicy::Fail => "fail",
            InvalidItemPolicy::Remove => "remove",
            InvalidItemPolicy::Value(_) => "value",
            InvalidItemPolicy::CalculateValue(_) => "calculate_value",
        }
    }
}

impl<T: Clone> InvalidItemPolicy<T> {
    /// Apply the policy to a failed element
    ///
    /// `Ok(None)` drops the element, `Ok(Some(v))` substitutes `v`, and `Err`
    /// aborts the collection.
    pub fn recover(&self, failure: CoercionFailure) -> Result<Option<T>, CoercionFailure> {
        match self {
            InvalidItemPolicy::Fail => Err(failure),
            InvalidItemPolicy::Remove => Ok(None),
            InvalidItemPolicy::Value(value) => Ok(Some(value.clone())),
            InvalidItemPolicy::CalculateValue(calculate) => match calculate(&failure) {
                Ok(value) => Ok(Some(value)),
                Err(message) => Err(CoercionFailure {
                    reason: CoercionReason::CustomConversionFailed(message),
                    ..failure
                }),
            },
        }
    }
}

impl<T> Default for InvalidItemPolicy<T> {
    fn default() -> Self {
        InvalidItemPolicy::Remove
    }
}

impl<T: fmt::Debug> fmt::Debug for InvalidItemPolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidItemPolicy::Fail => f.write_str("Fail"),
            InvalidItemPolicy::Remove => f.write_str("Remove"),
            InvalidItemPolicy::Value(value) => f.debug_tuple("Value").field(value).finish(),
            InvalidItemPolicy::CalculateValue(_) => f.write_str("CalculateValue(..)"),
        }
    }
}
