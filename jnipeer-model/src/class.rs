//! Class, field and method definitions.
//!
//! This module contains the data structures describing one managed class as
//! delivered by the metadata front end.

use crate::types::{ConstantValue, TypeDescriptor};

/// Native namespace a peer class is generated into.
///
/// Always holds at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    /// Creates a namespace from its segments.
    ///
    /// Returns `None` if there are no segments or any segment is empty.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        Some(Self { segments })
    }

    /// Parses a dotted namespace such as `JNI.Test`.
    #[must_use]
    pub fn parse(dotted: &str) -> Option<Self> {
        Self::new(dotted.trim().split('.'))
    }

    /// Returns the segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the namespace in dotted form.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }

    /// Returns true if every segment is a valid native identifier.
    #[must_use]
    pub fn is_valid_identifier_path(&self) -> bool {
        self.segments.iter().all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
    }
}

/// Field of a managed class.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: TypeDescriptor,
    /// Whether the field is static.
    pub is_static: bool,
    /// Whether the field is final.
    pub is_final: bool,
    /// Compile-time constant (static final fields only).
    pub constant: Option<ConstantValue>,
}

impl Field {
    /// Creates a new instance field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
            is_final: false,
            constant: None,
        }
    }

    /// Creates a static final field holding a compile-time constant.
    #[must_use]
    pub fn constant(name: impl Into<String>, ty: TypeDescriptor, value: ConstantValue) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: true,
            is_final: true,
            constant: Some(value),
        }
    }

    /// Returns true if the field is both static and final.
    #[must_use]
    pub const fn is_static_final(&self) -> bool {
        self.is_static && self.is_final
    }
}

/// Method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeDescriptor,
}

impl Parameter {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Method of a managed class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Method name.
    pub name: String,
    /// Return type.
    pub return_type: TypeDescriptor,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Whether the method is static.
    pub is_static: bool,
    /// Whether the method is tagged for peer generation.
    pub is_tagged: bool,
}

impl Method {
    /// Creates a new untagged instance method without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
            is_static: false,
            is_tagged: false,
        }
    }

    /// Marks the method as tagged for generation.
    #[must_use]
    pub fn tagged(mut self) -> Self {
        self.is_tagged = true;
        self
    }

    /// Marks the method as static.
    #[must_use]
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }
}

/// Managed class definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedClass {
    /// Qualified binary name (`com.example.Outer$Inner`).
    pub qualified_name: String,
    /// Simple name used for the generated file and peer type.
    pub simple_name: String,
    /// Whether the class is tagged for peer generation.
    pub is_tagged: bool,
    /// Namespace given by the tag.
    pub namespace: Option<NamespacePath>,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// Methods in declaration order.
    pub methods: Vec<Method>,
    /// Qualified name of the parent class.
    pub parent: Option<String>,
}

impl ManagedClass {
    /// Creates an untagged class; the simple name is the last dotted segment.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let simple_name = qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&qualified_name)
            .to_string();
        Self {
            qualified_name,
            simple_name,
            is_tagged: false,
            namespace: None,
            fields: Vec::new(),
            methods: Vec::new(),
            parent: None,
        }
    }

    /// Tags the class for generation into the given namespace.
    #[must_use]
    pub fn tagged(mut self, namespace: Option<NamespacePath>) -> Self {
        self.is_tagged = true;
        self.namespace = namespace;
        self
    }

    /// Sets the parent class.
    #[must_use]
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends a method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Returns the tagged methods in declaration order.
    pub fn tagged_methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter().filter(|m| m.is_tagged)
    }
}
