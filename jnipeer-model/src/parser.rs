//! XML model reader.
//!
//! This module reads a model document describing managed classes into a
//! [`ClassModel`]. It is one possible metadata front end; anything that builds
//! a `ClassModel` can replace it.

use crate::class::{Field, ManagedClass, Method, NamespacePath, Parameter};
use crate::error::ParseError;
use crate::model::ClassModel;
use crate::types::{ConstantValue, TypeDescriptor};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses a model document from a string.
///
/// The returned model is seeded with the runtime root classes.
///
/// # Arguments
/// * `xml` - Model document content
///
/// # Returns
/// Parsed model or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or describes an invalid model.
pub fn parse_model(xml: &str) -> Result<ClassModel, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut model: Option<ClassModel> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match element_name(e)?.as_str() {
                "model" => model = Some(ClassModel::with_runtime_classes()),
                "class" => {
                    let target = model.as_mut().ok_or_else(class_outside_model)?;
                    let mut class = parse_class_attributes(e)?;
                    parse_class_body(&mut reader, &mut class)?;
                    target.add_class(class)?;
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match element_name(e)?.as_str() {
                "model" => model = Some(ClassModel::with_runtime_classes()),
                "class" => {
                    let target = model.as_mut().ok_or_else(class_outside_model)?;
                    target.add_class(parse_class_attributes(e)?)?;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    model.ok_or_else(|| ParseError::InvalidStructure {
        message: "No model element found".to_string(),
    })
}

/// Parses a model document from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_model_file(path: &std::path::Path) -> Result<ClassModel, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_model(&xml)
}

fn class_outside_model() -> ParseError {
    ParseError::InvalidStructure {
        message: "class element outside of model".to_string(),
    }
}

fn element_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(e.name().as_ref())?.to_string())
}

fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

fn parse_type(element: &str, attribute: &str, value: &str) -> Result<TypeDescriptor, ParseError> {
    TypeDescriptor::parse(value).ok_or_else(|| ParseError::invalid_attr(element, attribute, value))
}

/// Parses the class element attributes.
fn parse_class_attributes(e: &BytesStart<'_>) -> Result<ManagedClass, ParseError> {
    let mut name = None;
    let mut simple = None;
    let mut parent = None;
    let mut tagged = None;
    let mut namespace = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "simple" => simple = Some(value.to_string()),
            "extends" => parent = Some(value.to_string()),
            "tagged" => tagged = Some(parse_bool("class", "tagged", value)?),
            "namespace" => {
                namespace = Some(
                    NamespacePath::parse(value)
                        .ok_or_else(|| ParseError::invalid_attr("class", "namespace", value))?,
                )
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("class", "name"))?;
    if name.is_empty() {
        return Err(ParseError::invalid_attr("class", "name", name));
    }

    let mut class = ManagedClass::new(name);
    if let Some(simple) = simple {
        class.simple_name = simple;
    }
    class.parent = parent;
    class.is_tagged = tagged.unwrap_or(namespace.is_some());
    class.namespace = namespace;

    Ok(class)
}

/// Parses the fields and methods of a class up to its end tag.
fn parse_class_body(
    reader: &mut Reader<&[u8]>,
    class: &mut ManagedClass,
) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = element_name(e)?;
                match name.as_str() {
                    "method" if depth == 1 => {
                        let mut method = parse_method_attributes(e)?;
                        parse_parameters(reader, &mut method)?;
                        class.methods.push(method);
                    }
                    "field" if depth == 1 => {
                        add_field(class, parse_field(e)?)?;
                        depth += 1;
                    }
                    _ => depth += 1,
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = element_name(e)?;
                match name.as_str() {
                    "method" if depth == 1 => class.methods.push(parse_method_attributes(e)?),
                    "field" if depth == 1 => add_field(class, parse_field(e)?)?,
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated class '{}'", class.qualified_name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn add_field(class: &mut ManagedClass, field: Field) -> Result<(), ParseError> {
    if class.fields.iter().any(|f| f.name == field.name) {
        return Err(ParseError::duplicate(
            "field",
            format!("{}.{}", class.qualified_name, field.name),
        ));
    }
    class.fields.push(field);
    Ok(())
}

/// Parses a field element.
fn parse_field(e: &BytesStart<'_>) -> Result<Field, ParseError> {
    let mut name = None;
    let mut ty = None;
    let mut is_static = false;
    let mut is_final = false;
    let mut value = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let text = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(text.to_string()),
            "type" => ty = Some(parse_type("field", "type", text)?),
            "static" => is_static = parse_bool("field", "static", text)?,
            "final" => is_final = parse_bool("field", "final", text)?,
            "value" => value = Some(text.to_string()),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("field", "name"))?;
    let ty = ty.ok_or_else(|| ParseError::missing_attr("field", "type"))?;

    let constant = match value {
        None => None,
        Some(text) => {
            let kind = ty
                .primitive()
                .ok_or_else(|| ParseError::invalid_attr("field", "value", text.as_str()))?;
            Some(
                ConstantValue::parse(kind, &text)
                    .ok_or_else(|| ParseError::invalid_attr("field", "value", text.as_str()))?,
            )
        }
    };

    Ok(Field {
        name,
        ty,
        is_static,
        is_final,
        constant,
    })
}

/// Parses the method element attributes.
fn parse_method_attributes(e: &BytesStart<'_>) -> Result<Method, ParseError> {
    let mut name = None;
    let mut return_type = None;
    let mut is_static = false;
    let mut is_tagged = false;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "returns" => return_type = Some(parse_type("method", "returns", value)?),
            "static" => is_static = parse_bool("method", "static", value)?,
            "tagged" => is_tagged = parse_bool("method", "tagged", value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("method", "name"))?;
    let return_type = return_type.ok_or_else(|| ParseError::missing_attr("method", "returns"))?;

    Ok(Method {
        name,
        return_type,
        parameters: Vec::new(),
        is_static,
        is_tagged,
    })
}

/// Parses the parameters of a method up to its end tag.
fn parse_parameters(reader: &mut Reader<&[u8]>, method: &mut Method) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if depth == 1 && element_name(e)? == "param" {
                    add_parameter(method, parse_parameter(e)?)?;
                }
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 1 && element_name(e)? == "param" {
                    add_parameter(method, parse_parameter(e)?)?;
                }
            }
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => {
                return Err(ParseError::InvalidStructure {
                    message: format!("unterminated method '{}'", method.name),
                });
            }
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn add_parameter(method: &mut Method, param: Parameter) -> Result<(), ParseError> {
    if method.parameters.iter().any(|p| p.name == param.name) {
        return Err(ParseError::duplicate(
            "parameter",
            format!("{}({})", method.name, param.name),
        ));
    }
    method.parameters.push(param);
    Ok(())
}

/// Parses a param element.
fn parse_parameter(e: &BytesStart<'_>) -> Result<Parameter, ParseError> {
    let mut name = None;
    let mut ty = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;

        match key {
            "name" => name = Some(value.to_string()),
            "type" => ty = Some(parse_type("param", "type", value)?),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("param", "name"))?;
    let ty = ty.ok_or_else(|| ParseError::missing_attr("param", "type"))?;
    if ty.is_void() {
        return Err(ParseError::invalid_attr("param", "type", "void"));
    }

    Ok(Parameter { name, ty })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveKind;

    const CAR_MODEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model>
    <class name="com.jnitest.Car" extends="java.lang.Object" tagged="true" namespace="JNI.Test">
        <field name="mName" type="String"/>
        <field name="mCost" type="double"/>
        <field name="WHEELS" type="int" static="true" final="true" value="4"/>
        <method name="getCost" returns="double" tagged="true"/>
        <method name="setCost" returns="void" tagged="true">
            <param name="cost" type="double"/>
        </method>
        <method name="getWheels" returns="int"/>
        <method name="getName" returns="java.lang.String" tagged="true"/>
        <method name="getCount" returns="int" static="true" tagged="true"/>
    </class>
</model>"#;

    #[test]
    fn test_parse_car_model() {
        let model = parse_model(CAR_MODEL).expect("Failed to parse");
        let car = model.get("com.jnitest.Car").expect("missing Car");

        assert!(car.is_tagged);
        assert_eq!(car.simple_name, "Car");
        assert_eq!(car.parent.as_deref(), Some("java.lang.Object"));
        assert_eq!(
            car.namespace.as_ref().map(NamespacePath::dotted).as_deref(),
            Some("JNI.Test")
        );
        assert_eq!(car.fields.len(), 3);
        assert_eq!(car.methods.len(), 5);
        assert_eq!(car.tagged_methods().count(), 4);

        let set_cost = &car.methods[1];
        assert_eq!(set_cost.parameters.len(), 1);
        assert_eq!(set_cost.parameters[0].name, "cost");
        assert_eq!(
            set_cost.parameters[0].ty,
            TypeDescriptor::Primitive(PrimitiveKind::Double)
        );

        let count = &car.methods[4];
        assert!(count.is_static);
        assert_eq!(car.fields[2].constant, Some(ConstantValue::Int(4)));
    }

    #[test]
    fn test_parse_seeds_runtime_classes() {
        let model = parse_model(CAR_MODEL).expect("Failed to parse");
        assert!(model.get("java.lang.Throwable").is_some());
        assert_eq!(model.tagged_classes().count(), 1);
    }

    #[test]
    fn test_namespace_implies_tag() {
        let xml = r#"<model><class name="a.B" namespace="X"/></model>"#;
        let model = parse_model(xml).expect("Failed to parse");
        assert!(model.get("a.B").expect("missing class").is_tagged);
    }

    #[test]
    fn test_tagged_without_namespace_parses() {
        let xml = r#"<model><class name="a.B" tagged="true"/></model>"#;
        let model = parse_model(xml).expect("Failed to parse");
        let class = model.get("a.B").expect("missing class");
        assert!(class.is_tagged);
        assert!(class.namespace.is_none());
    }

    #[test]
    fn test_missing_model_element() {
        let err = parse_model("<classes/>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_missing_class_name() {
        let err = parse_model(r#"<model><class tagged="true"/></model>"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute { .. }));
    }

    #[test]
    fn test_invalid_type() {
        let xml = r#"<model><class name="a.B"><field name="x" type="int[" /></class></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_constant_on_reference_field_rejected() {
        let xml = r#"<model><class name="a.B">
            <field name="NAME" type="String" static="true" final="true" value="car"/>
        </class></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let xml = r#"<model><class name="a.B">
            <field name="x" type="int"/>
            <field name="x" type="long"/>
        </class></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateDefinition { .. }));
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let xml = r#"<model><class name="a.B"/><class name="a.B"/></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateDefinition { .. }));
    }

    #[test]
    fn test_void_parameter_rejected() {
        let xml = r#"<model><class name="a.B">
            <method name="m" returns="void"><param name="p" type="void"/></method>
        </class></model>"#;
        let err = parse_model(xml).unwrap_err();
        assert!(matches!(err, ParseError::InvalidAttribute { .. }));
    }

    #[test]
    fn test_unknown_elements_ignored() {
        let xml = r#"<model><class name="a.B">
            <doc><field name="hidden" type="int"/></doc>
            <field name="visible" type="int"/>
        </class></model>"#;
        let model = parse_model(xml).expect("Failed to parse");
        let class = model.get("a.B").expect("missing class");
        assert_eq!(class.fields.len(), 1);
        assert_eq!(class.fields[0].name, "visible");
    }

    #[test]
    fn test_parse_model_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("car.xml");
        std::fs::write(&path, CAR_MODEL).expect("Failed to write");
        let model = parse_model_file(&path).expect("Failed to parse");
        assert!(model.get("com.jnitest.Car").is_some());
    }
}
