//! Managed to native type mapping.
//!
//! Every [`TypeDescriptor`] maps to exactly one [`NativeTypeCategory`]; the
//! category decides the JNI type name, the invocation function used for a
//! return value, and whether that return value must be cast.

use crate::error::CodegenError;
use jnipeer_model::types::{CLASS_ROOT, THROWABLE_ROOT};
use jnipeer_model::{ClassModel, ModelError, PrimitiveKind, TypeDescriptor};

/// Native (JNI) type category of a managed type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeTypeCategory {
    /// `void`.
    Void,
    /// `jboolean` … `jdouble`.
    Primitive(PrimitiveKind),
    /// `jstring`.
    String,
    /// `jthrowable`.
    Throwable,
    /// `jclass`.
    Class,
    /// `jobject`.
    Object,
    /// `jbooleanArray` … `jdoubleArray`.
    PrimitiveArray(PrimitiveKind),
    /// `jobjectArray`.
    ObjectArray,
}

impl NativeTypeCategory {
    /// Maps a managed type to its native category.
    ///
    /// Class types are classified by walking their ancestry in `model`.
    ///
    /// # Errors
    /// Returns `ModelError::UnknownClass` for a class type not in `model`.
    /// Returns `CodegenError::Bug` for descriptors outside the mapping table
    /// (arrays of `void`, zero-dimension arrays) and propagates ancestry
    /// resolution errors.
    pub fn of(ty: &TypeDescriptor, model: &ClassModel) -> Result<Self, CodegenError> {
        match ty {
            TypeDescriptor::Void => Ok(Self::Void),
            TypeDescriptor::Primitive(kind) => Ok(Self::Primitive(*kind)),
            TypeDescriptor::String => Ok(Self::String),
            TypeDescriptor::Class(name) => {
                if model.get(name).is_none() {
                    return Err(ModelError::UnknownClass { name: name.clone() }.into());
                }
                if model.is_subclass_of(name, THROWABLE_ROOT)? {
                    Ok(Self::Throwable)
                } else if model.is_subclass_of(name, CLASS_ROOT)? {
                    Ok(Self::Class)
                } else {
                    Ok(Self::Object)
                }
            }
            TypeDescriptor::Array(array) => match (array.element.as_ref(), array.dimension) {
                (_, 0) => Err(CodegenError::bug("array type with zero dimensions")),
                (TypeDescriptor::Void, _) => {
                    Err(CodegenError::bug("array of void has no native type"))
                }
                (TypeDescriptor::Array(_), _) => {
                    Err(CodegenError::bug("nested array node in array element"))
                }
                (TypeDescriptor::Primitive(kind), 1) => Ok(Self::PrimitiveArray(*kind)),
                (TypeDescriptor::Primitive(_), _) => Ok(Self::ObjectArray),
                (TypeDescriptor::Class(name), _) if model.get(name).is_none() => {
                    Err(ModelError::UnknownClass { name: name.clone() }.into())
                }
                (TypeDescriptor::String | TypeDescriptor::Class(_), _) => Ok(Self::ObjectArray),
            },
        }
    }

    /// Returns the JNI type name.
    #[must_use]
    pub const fn native_name(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Primitive(kind) => match kind {
                PrimitiveKind::Boolean => "jboolean",
                PrimitiveKind::Byte => "jbyte",
                PrimitiveKind::Char => "jchar",
                PrimitiveKind::Short => "jshort",
                PrimitiveKind::Int => "jint",
                PrimitiveKind::Long => "jlong",
                PrimitiveKind::Float => "jfloat",
                PrimitiveKind::Double => "jdouble",
            },
            Self::String => "jstring",
            Self::Throwable => "jthrowable",
            Self::Class => "jclass",
            Self::Object => "jobject",
            Self::PrimitiveArray(kind) => match kind {
                PrimitiveKind::Boolean => "jbooleanArray",
                PrimitiveKind::Byte => "jbyteArray",
                PrimitiveKind::Char => "jcharArray",
                PrimitiveKind::Short => "jshortArray",
                PrimitiveKind::Int => "jintArray",
                PrimitiveKind::Long => "jlongArray",
                PrimitiveKind::Float => "jfloatArray",
                PrimitiveKind::Double => "jdoubleArray",
            },
            Self::ObjectArray => "jobjectArray",
        }
    }

    /// Returns the category used to select the invocation function.
    #[must_use]
    pub const fn return_category(&self) -> ReturnCategory {
        match self {
            Self::Void => ReturnCategory::Void,
            Self::Primitive(kind) => ReturnCategory::Primitive(*kind),
            Self::String
            | Self::Throwable
            | Self::Class
            | Self::Object
            | Self::PrimitiveArray(_)
            | Self::ObjectArray => ReturnCategory::Object,
        }
    }

    /// Returns true if an object-returning invocation must be cast to this
    /// type.
    #[must_use]
    pub const fn needs_cast(&self) -> bool {
        match self {
            Self::Class | Self::Throwable | Self::PrimitiveArray(_) | Self::ObjectArray => true,
            Self::Void | Self::Primitive(_) | Self::String | Self::Object => false,
        }
    }
}

/// Return value category selecting the runtime invocation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnCategory {
    /// No return value.
    Void,
    /// Primitive return value.
    Primitive(PrimitiveKind),
    /// Any reference return value.
    Object,
}

impl ReturnCategory {
    /// Returns the `JNIEnv` member invoking a method of this category.
    #[must_use]
    pub const fn call_function(&self, is_static: bool) -> &'static str {
        match (self, is_static) {
            (Self::Void, false) => "CallVoidMethod",
            (Self::Void, true) => "CallStaticVoidMethod",
            (Self::Primitive(PrimitiveKind::Boolean), false) => "CallBooleanMethod",
            (Self::Primitive(PrimitiveKind::Boolean), true) => "CallStaticBooleanMethod",
            (Self::Primitive(PrimitiveKind::Byte), false) => "CallByteMethod",
            (Self::Primitive(PrimitiveKind::Byte), true) => "CallStaticByteMethod",
            (Self::Primitive(PrimitiveKind::Char), false) => "CallCharMethod",
            (Self::Primitive(PrimitiveKind::Char), true) => "CallStaticCharMethod",
            (Self::Primitive(PrimitiveKind::Short), false) => "CallShortMethod",
            (Self::Primitive(PrimitiveKind::Short), true) => "CallStaticShortMethod",
            (Self::Primitive(PrimitiveKind::Int), false) => "CallIntMethod",
            (Self::Primitive(PrimitiveKind::Int), true) => "CallStaticIntMethod",
            (Self::Primitive(PrimitiveKind::Long), false) => "CallLongMethod",
            (Self::Primitive(PrimitiveKind::Long), true) => "CallStaticLongMethod",
            (Self::Primitive(PrimitiveKind::Float), false) => "CallFloatMethod",
            (Self::Primitive(PrimitiveKind::Float), true) => "CallStaticFloatMethod",
            (Self::Primitive(PrimitiveKind::Double), false) => "CallDoubleMethod",
            (Self::Primitive(PrimitiveKind::Double), true) => "CallStaticDoubleMethod",
            (Self::Object, false) => "CallObjectMethod",
            (Self::Object, true) => "CallStaticObjectMethod",
        }
    }

    /// Returns true if the invocation result is returned to the caller.
    #[must_use]
    pub const fn returns_value(&self) -> bool {
        !matches!(self, Self::Void)
    }
}
