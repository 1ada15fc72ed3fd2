//! Raw JSON primitive targets
//!
//! A raw target accepts a node only when its tag matches and the value
//! survives the conversion unchanged. Numbers never turn into strings and
//! strings are never parsed as numbers. Integer targets take any integral
//! number in range, including floats such as `2.0`. Float targets reject
//! integers they cannot hold exactly and values that overflow to infinity.

use crate::coerce::{Coercion, Decode};
use serde_json::{Map, Value};

impl Decode for String {
    fn coercion() -> Coercion<Self> {
        Coercion::Raw(|node| node.as_str().map(str::to_owned))
    }
}

impl Decode for bool {
    fn coercion() -> Coercion<Self> {
        Coercion::Raw(Value::as_bool)
    }
}

impl Decode for f64 {
    fn coercion() -> Coercion<Self> {
        Coercion::Raw(float64)
    }
}

impl Decode for f32 {
    fn coercion() -> Coercion<Self> {
        Coercion::Raw(float32)
    }
}

impl Decode for Value {
    fn coercion() -> Coercion<Self> {
        Coercion::Raw(|node| Some(node.clone()))
    }
}

impl Decode for Map<String, Value> {
    fn coercion() -> Coercion<Self> {
        Coercion::Raw(|node| node.as_object().cloned())
    }
}

macro_rules! impl_decode_integer {
    ($($ty:ty),+) => {
        $(
            impl Decode for $ty {
                fn coercion() -> Coercion<Self> {
                    Coercion::Raw(|node| integral(node).and_then(|n| <$ty>::try_from(n).ok()))
                }
            }
        )+
    };
}

impl_decode_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// The node as a whole number, if it is a number without a fractional part
fn integral(node: &Value) -> Option<i128> {
    let Value::Number(number) = node else {
        return None;
    };

    if let Some(n) = number.as_i64() {
        return Some(i128::from(n));
    }
    if let Some(n) = number.as_u64() {
        return Some(i128::from(n));
    }

    let n = number.as_f64()?;
    // i128 bounds are exactly representable as f64
    if n.is_finite() && n.fract() == 0.0 && n >= i128::MIN as f64 && n < i128::MAX as f64 {
        Some(n as i128)
    } else {
        None
    }
}

/// The node as an `f64`, if the number is represented without loss
fn float64(node: &Value) -> Option<f64> {
    let Value::Number(number) = node else {
        return None;
    };

    if number.is_f64() {
        return number.as_f64();
    }

    // Compare in i128 so a cast that saturates at the integer bounds still
    // shows up as a mismatch
    let exact = integral(node)?;
    let n = number.as_f64()?;
    (n as i128 == exact).then_some(n)
}

/// The node as an `f32`, if it fits without overflow and whole numbers stay
/// whole
fn float32(node: &Value) -> Option<f32> {
    let n = float64(node)?;
    let narrowed = n as f32;
    if !narrowed.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && f64::from(narrowed) != n {
        return None;
    }
    Some(narrowed)
}
