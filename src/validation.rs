//! Required-field checks shared by every payload type

use crate::{AzamPayError, Result};
use std::borrow::Cow;

/// A payload that declares which of its fields must be non-empty.
///
/// Implementations list `(wire name, value)` pairs in declaration order.
/// Optional fields are simply left out. Nested values are named by their
/// path, e.g. `cart.items[2].name`.
pub trait RequiredFields {
    fn required_fields(&self) -> Vec<(Cow<'static, str>, &str)>;
}

/// Fail on the first required field whose value is empty
pub fn check_required<P: RequiredFields + ?Sized>(operation: &'static str, payload: &P) -> Result<()> {
    match payload
        .required_fields()
        .into_iter()
        .find(|(_, value)| value.is_empty())
    {
        Some((field, _)) => Err(AzamPayError::MissingField {
            operation,
            field: field.into_owned(),
        }),
        None => Ok(()),
    }
}
