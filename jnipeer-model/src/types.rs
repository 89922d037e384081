//! Managed type descriptors.
//!
//! This module contains the closed set of types a field, parameter or return
//! value can have, plus the typed compile-time constants that static final
//! fields may carry.

/// Qualified name of the runtime string class.
pub const STRING_CLASS: &str = "java.lang.String";

/// Qualified name of the runtime reflective class root.
pub const CLASS_ROOT: &str = "java.lang.Class";

/// Qualified name of the runtime exception root.
pub const THROWABLE_ROOT: &str = "java.lang.Throwable";

/// Qualified name of the root of every class hierarchy.
pub const OBJECT_ROOT: &str = "java.lang.Object";

/// Managed primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `boolean`.
    Boolean,
    /// Signed 8-bit integer.
    Byte,
    /// UTF-16 code unit.
    Char,
    /// Signed 16-bit integer.
    Short,
    /// Signed 32-bit integer.
    Int,
    /// Signed 64-bit integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
}

impl PrimitiveKind {
    /// All primitive kinds in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Char,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    /// Returns the source-level name of the primitive.
    #[must_use]
    pub const fn java_name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Parses a primitive kind from its source-level name.
    #[must_use]
    pub fn from_java_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Self::Boolean),
            "byte" => Some(Self::Byte),
            "char" => Some(Self::Char),
            "short" => Some(Self::Short),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            _ => None,
        }
    }
}

/// Array type: an element type and the number of dimensions.
///
/// The element is never itself an array; nested arrays are folded into
/// `dimension` by [`TypeDescriptor::array`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayType {
    /// Innermost element type.
    pub element: Box<TypeDescriptor>,
    /// Number of dimensions.
    pub dimension: usize,
}

/// Type of a field, parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// No value (return types only).
    Void,
    /// Primitive value.
    Primitive(PrimitiveKind),
    /// The runtime string class.
    String,
    /// Any other class, by qualified (binary) name.
    Class(String),
    /// Array of any of the above.
    Array(ArrayType),
}

impl TypeDescriptor {
    /// Creates an array type, folding nested arrays into one node.
    #[must_use]
    pub fn array(element: TypeDescriptor, dimension: usize) -> Self {
        match element {
            Self::Array(inner) => Self::Array(ArrayType {
                element: inner.element,
                dimension: inner.dimension + dimension,
            }),
            element => Self::Array(ArrayType {
                element: Box::new(element),
                dimension,
            }),
        }
    }

    /// Creates a class type.
    #[must_use]
    pub fn class(qualified_name: impl Into<String>) -> Self {
        Self::Class(qualified_name.into())
    }

    /// Parses a source-level type spelling such as `int`, `String`,
    /// `java.util.List` or `long[][]`.
    ///
    /// Returns `None` for empty names, malformed brackets and arrays of `void`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut base = text.trim();
        let mut dimension = 0;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped.trim_end();
            dimension += 1;
        }

        if base.is_empty() || base.contains(['[', ']', ' ', '\t', '<', '>']) {
            return None;
        }

        let element = match base {
            "void" if dimension > 0 => return None,
            "void" => Self::Void,
            "String" | STRING_CLASS => Self::String,
            other => match PrimitiveKind::from_java_name(other) {
                Some(kind) => Self::Primitive(kind),
                None => Self::Class(other.to_string()),
            },
        };

        if dimension == 0 {
            Some(element)
        } else {
            Some(Self::array(element, dimension))
        }
    }

    /// Returns the class named by this type, looking through arrays.
    ///
    /// `String` is not reported; it is always known to the runtime.
    #[must_use]
    pub fn referenced_class(&self) -> Option<&str> {
        match self {
            Self::Class(name) => Some(name),
            Self::Array(array) => array.element.referenced_class(),
            Self::Void | Self::Primitive(_) | Self::String => None,
        }
    }

    /// Returns true for `void`.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Returns the primitive kind if this is a primitive type.
    #[must_use]
    pub const fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Compile-time constant value of a static final field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstantValue {
    /// `boolean` constant.
    Boolean(bool),
    /// `byte` constant.
    Byte(i8),
    /// `char` constant, as its UTF-16 code unit.
    Char(u16),
    /// `short` constant.
    Short(i16),
    /// `int` constant.
    Int(i32),
    /// `long` constant.
    Long(i64),
    /// `float` constant.
    Float(f32),
    /// `double` constant.
    Double(f64),
}

impl ConstantValue {
    /// Returns the primitive kind of the constant.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Boolean(_) => PrimitiveKind::Boolean,
            Self::Byte(_) => PrimitiveKind::Byte,
            Self::Char(_) => PrimitiveKind::Char,
            Self::Short(_) => PrimitiveKind::Short,
            Self::Int(_) => PrimitiveKind::Int,
            Self::Long(_) => PrimitiveKind::Long,
            Self::Float(_) => PrimitiveKind::Float,
            Self::Double(_) => PrimitiveKind::Double,
        }
    }

    /// Parses constant text for the given primitive kind.
    ///
    /// `char` accepts either a numeric code unit or a single character;
    /// floating point accepts `Infinity`, `-Infinity` and `NaN`.
    #[must_use]
    pub fn parse(kind: PrimitiveKind, text: &str) -> Option<Self> {
        let text = text.trim();
        match kind {
            PrimitiveKind::Boolean => match text {
                "true" => Some(Self::Boolean(true)),
                "false" => Some(Self::Boolean(false)),
                _ => None,
            },
            PrimitiveKind::Byte => text.parse().ok().map(Self::Byte),
            PrimitiveKind::Char => parse_char(text).map(Self::Char),
            PrimitiveKind::Short => text.parse().ok().map(Self::Short),
            PrimitiveKind::Int => text.parse().ok().map(Self::Int),
            PrimitiveKind::Long => text.parse().ok().map(Self::Long),
            PrimitiveKind::Float => text.parse().ok().map(Self::Float),
            PrimitiveKind::Double => text.parse().ok().map(Self::Double),
        }
    }
}

fn parse_char(text: &str) -> Option<u16> {
    if let Ok(code) = text.parse::<u16>() {
        return Some(code);
    }
    let mut chars = text.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let mut units = [0u16; 2];
    match ch.encode_utf16(&mut units) {
        [unit] => Some(*unit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_names_round_trip() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_java_name(kind.java_name()), Some(kind));
        }
        assert_eq!(PrimitiveKind::from_java_name("Integer"), None);
    }

    #[test]
    fn test_parse_scalar_types() {
        assert_eq!(TypeDescriptor::parse("void"), Some(TypeDescriptor::Void));
        assert_eq!(
            TypeDescriptor::parse("int"),
            Some(TypeDescriptor::Primitive(PrimitiveKind::Int))
        );
        assert_eq!(TypeDescriptor::parse("String"), Some(TypeDescriptor::String));
        assert_eq!(
            TypeDescriptor::parse("java.lang.String"),
            Some(TypeDescriptor::String)
        );
        assert_eq!(
            TypeDescriptor::parse("com.example.Engine"),
            Some(TypeDescriptor::class("com.example.Engine"))
        );
    }

    #[test]
    fn test_parse_array_types() {
        let parsed = TypeDescriptor::parse("long[][]").expect("Failed to parse");
        assert_eq!(
            parsed,
            TypeDescriptor::Array(ArrayType {
                element: Box::new(TypeDescriptor::Primitive(PrimitiveKind::Long)),
                dimension: 2,
            })
        );

        let spaced = TypeDescriptor::parse("java.lang.Object [] ").expect("Failed to parse");
        assert_eq!(
            spaced,
            TypeDescriptor::array(TypeDescriptor::class("java.lang.Object"), 1)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(TypeDescriptor::parse(""), None);
        assert_eq!(TypeDescriptor::parse("[]"), None);
        assert_eq!(TypeDescriptor::parse("void[]"), None);
        assert_eq!(TypeDescriptor::parse("int["), None);
        assert_eq!(TypeDescriptor::parse("List<String>"), None);
    }

    #[test]
    fn test_array_constructor_folds_nesting() {
        let inner = TypeDescriptor::array(TypeDescriptor::Primitive(PrimitiveKind::Byte), 1);
        let outer = TypeDescriptor::array(inner, 2);
        match outer {
            TypeDescriptor::Array(array) => {
                assert_eq!(array.dimension, 3);
                assert_eq!(
                    *array.element,
                    TypeDescriptor::Primitive(PrimitiveKind::Byte)
                );
            }
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_constant_parse() {
        assert_eq!(
            ConstantValue::parse(PrimitiveKind::Boolean, "true"),
            Some(ConstantValue::Boolean(true))
        );
        assert_eq!(
            ConstantValue::parse(PrimitiveKind::Byte, "-128"),
            Some(ConstantValue::Byte(-128))
        );
        assert_eq!(ConstantValue::parse(PrimitiveKind::Byte, "128"), None);
        assert_eq!(
            ConstantValue::parse(PrimitiveKind::Char, "A"),
            Some(ConstantValue::Char(65))
        );
        assert_eq!(
            ConstantValue::parse(PrimitiveKind::Char, "7"),
            Some(ConstantValue::Char(7))
        );
        assert_eq!(
            ConstantValue::parse(PrimitiveKind::Long, "5"),
            Some(ConstantValue::Long(5))
        );
        assert_eq!(
            ConstantValue::parse(PrimitiveKind::Float, "-Infinity"),
            Some(ConstantValue::Float(f32::NEG_INFINITY))
        );
        assert_eq!(ConstantValue::parse(PrimitiveKind::Int, "four"), None);
    }

    #[test]
    fn test_referenced_class() {
        let grid = TypeDescriptor::array(TypeDescriptor::class("a.Cell"), 2);
        assert_eq!(grid.referenced_class(), Some("a.Cell"));
        assert_eq!(TypeDescriptor::class("a.Car").referenced_class(), Some("a.Car"));
        assert_eq!(TypeDescriptor::String.referenced_class(), None);
        let ints = TypeDescriptor::array(TypeDescriptor::Primitive(PrimitiveKind::Int), 1);
        assert_eq!(ints.referenced_class(), None);
    }

    #[test]
    fn test_constant_kind() {
        assert_eq!(ConstantValue::Double(1.5).kind(), PrimitiveKind::Double);
        assert_eq!(ConstantValue::Char(0).kind(), PrimitiveKind::Char);
    }
}
