//! Integer values
//!
//! Values are arbitrary-precision: literals of any length are accepted and
//! arithmetic never overflows.

use num_bigint::BigInt;
use serde::{Serialize, Serializer};

/// The integer type every expression evaluates to.
pub type Value = BigInt;

/// Serialize a value as a number when it fits in `i64`, otherwise as its
/// decimal string.
pub fn serialize<S: Serializer>(value: &Value, serializer: S) -> Result<S::Ok, S::Error> {
    match i64::try_from(value) {
        Ok(small) => serializer.serialize_i64(small),
        Err(_) => serializer.collect_str(value),
    }
}

/// Borrowed value that serializes through [`serialize`].
pub(crate) struct Json<'a>(pub(crate) &'a Value);

impl Serialize for Json<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize(self.0, serializer)
    }
}
