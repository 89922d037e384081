//! Inherited field layout.

use crate::class::{Field, ManagedClass};
use crate::error::ModelError;
use crate::model::ClassModel;

/// Returns every field of `class` including inherited ones, ordered from the
/// root class down to `class`, each class's own fields in declaration order.
///
/// # Errors
/// Returns `ModelError` if the ancestor chain cannot be resolved.
pub fn flatten_fields<'a>(
    model: &'a ClassModel,
    class: &'a ManagedClass,
) -> Result<Vec<&'a Field>, ModelError> {
    let mut stack = model.ancestry(class)?;
    let mut fields = Vec::new();
    while let Some(current) = stack.pop() {
        fields.extend(current.fields.iter());
    }
    Ok(fields)
}
