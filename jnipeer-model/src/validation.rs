//! Model validation utilities.
//!
//! This module checks a model for consistency before generation: resolvable
//! and acyclic inheritance, class types that name classes in the model,
//! well-formed namespaces and constants that match the fields carrying them.

use crate::class::ManagedClass;
use crate::error::ModelError;
use crate::model::ClassModel;

/// Validates a model for correctness.
///
/// Namespace presence on tagged classes is not checked here, since a
/// configured namespace override can supply it at generation time.
///
/// # Arguments
/// * `model` - The model to validate
///
/// # Errors
/// Returns `ModelError` describing the first problem found.
pub fn validate_model(model: &ClassModel) -> Result<(), ModelError> {
    for class in model.classes() {
        model.ancestry(class)?;
        validate_type_references(model, class)?;
        validate_namespace(class)?;
        validate_constants(class)?;
    }
    Ok(())
}

/// Validates that every field, parameter and return type naming a class
/// resolves within the model.
fn validate_type_references(model: &ClassModel, class: &ManagedClass) -> Result<(), ModelError> {
    let fields = class.fields.iter().map(|field| &field.ty);
    let signatures = class.methods.iter().flat_map(|method| {
        std::iter::once(&method.return_type).chain(method.parameters.iter().map(|param| &param.ty))
    });

    for ty in fields.chain(signatures) {
        if let Some(name) = ty.referenced_class() {
            if model.get(name).is_none() {
                return Err(ModelError::UnknownClass {
                    name: name.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Validates that namespace segments are usable as native identifiers.
fn validate_namespace(class: &ManagedClass) -> Result<(), ModelError> {
    match &class.namespace {
        Some(namespace) if !namespace.is_valid_identifier_path() => {
            Err(ModelError::InvalidNamespace {
                class: class.qualified_name.clone(),
                namespace: namespace.dotted(),
            })
        }
        _ => Ok(()),
    }
}

/// Validates that constants sit on static final fields of the same kind.
fn validate_constants(class: &ManagedClass) -> Result<(), ModelError> {
    for field in &class.fields {
        let Some(value) = &field.constant else {
            continue;
        };

        if !field.is_static_final() {
            return Err(ModelError::invalid_constant(
                &class.qualified_name,
                &field.name,
                "constant values require a static final field",
            ));
        }

        if field.ty.primitive() != Some(value.kind()) {
            return Err(ModelError::invalid_constant(
                &class.qualified_name,
                &field.name,
                format!(
                    "{} constant does not match the field type",
                    value.kind().java_name()
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::{Field, Method, NamespacePath};
    use crate::types::{ConstantValue, PrimitiveKind, TypeDescriptor};

    fn model_with(class: ManagedClass) -> ClassModel {
        let mut model = ClassModel::with_runtime_classes();
        model.add_class(class).expect("Failed to add class");
        model
    }

    #[test]
    fn test_validate_valid_model() {
        let class = ManagedClass::new("a.Car")
            .extends("java.lang.Object")
            .tagged(NamespacePath::parse("JNI.Test"))
            .field(Field::constant(
                "MAX",
                TypeDescriptor::Primitive(PrimitiveKind::Int),
                ConstantValue::Int(3),
            ));
        assert!(validate_model(&model_with(class)).is_ok());
    }

    #[test]
    fn test_validate_unknown_parent() {
        let class = ManagedClass::new("a.Car").extends("a.Missing");
        let err = validate_model(&model_with(class)).unwrap_err();
        assert!(matches!(err, ModelError::UnknownClass { .. }));
    }

    #[test]
    fn test_validate_invalid_namespace() {
        let class = ManagedClass::new("a.Car").tagged(NamespacePath::parse("JNI.2Test"));
        let err = validate_model(&model_with(class)).unwrap_err();
        assert!(matches!(err, ModelError::InvalidNamespace { .. }));
    }

    #[test]
    fn test_validate_constant_on_instance_field() {
        let mut field = Field::new("x", TypeDescriptor::Primitive(PrimitiveKind::Int));
        field.constant = Some(ConstantValue::Int(1));
        let class = ManagedClass::new("a.Car").field(field);
        let err = validate_model(&model_with(class)).unwrap_err();
        assert!(matches!(err, ModelError::InvalidConstant { .. }));
    }

    #[test]
    fn test_validate_constant_kind_mismatch() {
        let class = ManagedClass::new("a.Car").field(Field::constant(
            "x",
            TypeDescriptor::Primitive(PrimitiveKind::Long),
            ConstantValue::Int(1),
        ));
        let err = validate_model(&model_with(class)).unwrap_err();
        assert!(matches!(err, ModelError::InvalidConstant { .. }));
    }

    #[test]
    fn test_validate_unknown_return_class() {
        let class = ManagedClass::new("a.Car")
            .method(Method::new("engine", TypeDescriptor::class("a.Engine")).tagged());
        let err = validate_model(&model_with(class)).unwrap_err();
        assert!(matches!(err, ModelError::UnknownClass { name } if name == "a.Engine"));
    }

    #[test]
    fn test_validate_unknown_parameter_and_field_classes() {
        let param = ManagedClass::new("a.Car").method(
            Method::new("drive", TypeDescriptor::Void)
                .param("route", TypeDescriptor::array(TypeDescriptor::class("a.Road"), 1)),
        );
        let err = validate_model(&model_with(param)).unwrap_err();
        assert!(matches!(err, ModelError::UnknownClass { name } if name == "a.Road"));

        let field = ManagedClass::new("a.Car")
            .field(Field::new("owner", TypeDescriptor::class("a.Person")));
        let err = validate_model(&model_with(field)).unwrap_err();
        assert!(matches!(err, ModelError::UnknownClass { name } if name == "a.Person"));
    }

    #[test]
    fn test_validate_runtime_class_references() {
        let class = ManagedClass::new("a.Car")
            .field(Field::new("label", TypeDescriptor::String))
            .method(Method::new("failure", TypeDescriptor::class("java.lang.Throwable")));
        assert!(validate_model(&model_with(class)).is_ok());
    }
}
