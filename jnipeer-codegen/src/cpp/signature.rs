//! Runtime descriptor strings for types and methods.

use jnipeer_model::types::STRING_CLASS;
use jnipeer_model::{ManagedClass, Method, PrimitiveKind, TypeDescriptor};

/// Returns the descriptor code of a primitive kind.
#[must_use]
pub const fn primitive_code(kind: PrimitiveKind) -> char {
    match kind {
        PrimitiveKind::Boolean => 'Z',
        PrimitiveKind::Byte => 'B',
        PrimitiveKind::Char => 'C',
        PrimitiveKind::Short => 'S',
        PrimitiveKind::Int => 'I',
        PrimitiveKind::Long => 'J',
        PrimitiveKind::Float => 'F',
        PrimitiveKind::Double => 'D',
    }
}

/// Encodes a type as a descriptor string.
#[must_use]
pub fn type_descriptor(ty: &TypeDescriptor) -> String {
    let mut out = String::new();
    push_type(&mut out, ty);
    out
}

/// Encodes a method signature as `(<params>)<return>`.
#[must_use]
pub fn method_descriptor(method: &Method) -> String {
    let mut out = String::from("(");
    out.push_str(&parameters_descriptor(method));
    out.push(')');
    push_type(&mut out, &method.return_type);
    out
}

/// Encodes only the parameter list of a method, without parentheses.
#[must_use]
pub fn parameters_descriptor(method: &Method) -> String {
    let mut out = String::new();
    for param in &method.parameters {
        push_type(&mut out, &param.ty);
    }
    out
}

/// Encodes the class descriptor used to look up a class at runtime.
#[must_use]
pub fn class_descriptor(class: &ManagedClass) -> String {
    let mut out = String::new();
    push_object(&mut out, &class.qualified_name);
    out
}

fn push_type(out: &mut String, ty: &TypeDescriptor) {
    match ty {
        TypeDescriptor::Void => out.push('V'),
        TypeDescriptor::Primitive(kind) => out.push(primitive_code(*kind)),
        TypeDescriptor::String => push_object(out, STRING_CLASS),
        TypeDescriptor::Class(name) => push_object(out, name),
        TypeDescriptor::Array(array) => {
            for _ in 0..array.dimension {
                out.push('[');
            }
            push_type(out, &array.element);
        }
    }
}

fn push_object(out: &mut String, qualified_name: &str) {
    out.push('L');
    out.extend(qualified_name.chars().map(|c| if c == '.' { '/' } else { c }));
    out.push(';');
}
