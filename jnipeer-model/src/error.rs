//! Error types for model parsing and validation.

use thiserror::Error;

/// Error type for model parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (class, field, parameter).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Invalid document structure.
    #[error("invalid model structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for model consistency problems.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Class not found in the registry.
    #[error("class '{name}' not found")]
    UnknownClass {
        /// Qualified class name.
        name: String,
    },

    /// Circular inheritance.
    #[error("circular inheritance detected: {path}")]
    CircularInheritance {
        /// Chain of classes forming the cycle.
        path: String,
    },

    /// Tagged class without a namespace.
    #[error("tagged class '{class}' does not define a namespace")]
    MissingNamespace {
        /// Qualified class name.
        class: String,
    },

    /// Namespace segment that is not a native identifier.
    #[error("invalid namespace '{namespace}' on class '{class}'")]
    InvalidNamespace {
        /// Qualified class name.
        class: String,
        /// Offending namespace text.
        namespace: String,
    },

    /// Constant attached to a field that cannot carry it.
    #[error("invalid constant on field '{field}' of class '{class}': {message}")]
    InvalidConstant {
        /// Qualified class name.
        class: String,
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl ModelError {
    /// Creates an invalid constant error.
    pub fn invalid_constant(
        class: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidConstant {
            class: class.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}
