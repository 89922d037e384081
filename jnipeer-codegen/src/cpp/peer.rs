//! Native peer declaration and definition generation.

use super::constants::define_for_static;
use super::mangle::{MangleContext, mangle};
use super::signature::{class_descriptor, method_descriptor, parameters_descriptor};
use super::types::NativeTypeCategory;
use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use jnipeer_model::{ClassModel, ManagedClass, Method, ModelError, NamespacePath, flatten_fields};
use std::collections::HashMap;

/// Suffix appended to the mangled simple name of every generated peer.
pub const PEER_SUFFIX: &str = "ManagedPeer";

/// Members inherited from `JNI::ManagedPeer` that a generated method must not hide.
const BASE_MEMBERS: [&str; 4] = ["GetClass", "GetMethodID", "Env", "Object"];

/// Names visible inside a generated method body besides its parameters.
const BODY_LOCALS: [&str; 2] = ["once", "methodID"];

const FILE_TOP: &str = "/* DO NOT EDIT THIS FILE - it is machine generated */";

/// Generated sources for one tagged class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerSource {
    /// Qualified name of the managed class.
    pub class_name: String,
    /// Artifact base name, also the name of the generated peer type.
    pub base_name: String,
    /// Encoded declaration file.
    pub header: Vec<u8>,
    /// Encoded definition file.
    pub source: Vec<u8>,
}

/// Tagged method with its native symbol and types resolved.
struct MethodBinding<'m> {
    method: &'m Method,
    symbol: String,
    return_type: NativeTypeCategory,
    parameters: Vec<(&'static str, String)>,
    descriptor: String,
}

impl MethodBinding<'_> {
    fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|(ty, name)| format!("{ty} {name}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn prototype(&self, owner: Option<&str>) -> String {
        let scope = owner.map(|o| format!("{o}::")).unwrap_or_default();
        format!(
            "{} {scope}{}({})",
            self.return_type.native_name(),
            self.symbol,
            self.parameter_list()
        )
    }

    fn invocation(&self) -> String {
        let category = self.return_type.return_category();
        let mut line = String::new();
        if category.returns_value() {
            line.push_str("return ");
        }
        if self.return_type.needs_cast() {
            line.push_str(&format!("({})", self.return_type.native_name()));
        }
        line.push_str(&format!(
            "Env().{}(",
            category.call_function(self.method.is_static)
        ));
        if !self.method.is_static {
            line.push_str("Object(), ");
        }
        line.push_str("methodID");
        for (_, name) in &self.parameters {
            line.push_str(", ");
            line.push_str(name);
        }
        line.push_str(");");
        line
    }
}

/// Generator for native peer sources.
pub struct PeerGenerator<'a> {
    model: &'a ClassModel,
    config: &'a GeneratorConfig,
}

impl<'a> PeerGenerator<'a> {
    /// Creates a new peer generator.
    #[must_use]
    pub fn new(model: &'a ClassModel, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Returns the artifact base name of a class.
    #[must_use]
    pub fn base_name(class: &ManagedClass) -> String {
        format!("{}{PEER_SUFFIX}", mangle(&class.simple_name, MangleContext::Class))
    }

    /// Generates the declaration and definition of a tagged class.
    ///
    /// # Errors
    /// Returns an error if the class has no namespace and no override is
    /// configured, if two member names mangle to the same symbol, if the
    /// model cannot be resolved, or if the class is not tagged.
    pub fn generate(&self, class: &ManagedClass) -> Result<PeerSource, CodegenError> {
        if !class.is_tagged {
            return Err(CodegenError::bug(format!(
                "tried to generate a peer for untagged class '{}'",
                class.qualified_name
            )));
        }

        let base_name = Self::base_name(class);
        let namespace = self.namespace_for(class)?;
        let methods = self.bind_methods(class, &base_name)?;

        let header = self.generate_declaration(class, &base_name, namespace, &methods)?;
        let source = self.generate_definition(class, &base_name, namespace, &methods);

        let host = self.config.host_family();
        Ok(PeerSource {
            class_name: class.qualified_name.clone(),
            base_name,
            header: encode(&header, host.line_separator()),
            source: encode(&source, host.line_separator()),
        })
    }

    fn namespace_for<'c>(
        &'c self,
        class: &'c ManagedClass,
    ) -> Result<&'c NamespacePath, ModelError> {
        self.config
            .namespace()
            .or(class.namespace.as_ref())
            .ok_or_else(|| ModelError::MissingNamespace {
                class: class.qualified_name.clone(),
            })
    }

    fn bind_methods<'m>(
        &self,
        class: &'m ManagedClass,
        base_name: &str,
    ) -> Result<Vec<MethodBinding<'m>>, CodegenError> {
        let mut overloads: HashMap<&str, usize> = HashMap::new();
        for method in class.tagged_methods() {
            *overloads.entry(method.name.as_str()).or_default() += 1;
        }

        let mut symbols = SymbolTable::new(&class.qualified_name);
        for member in BASE_MEMBERS {
            symbols.reserve(member, &format!("ManagedPeer::{member}"));
        }
        symbols.reserve(base_name, &format!("{base_name} constructor"));

        let mut bindings = Vec::new();
        for method in class.tagged_methods() {
            let overloaded = overloads.get(method.name.as_str()).is_some_and(|n| *n > 1);
            let mut symbol = mangle(&method.name, MangleContext::FieldStub);
            let identity = if overloaded && self.config.disambiguates_overloads() {
                let params = parameters_descriptor(method);
                symbol.push_str("__");
                symbol.push_str(&mangle(&params, MangleContext::Jni));
                format!("{}({params})", method.name)
            } else {
                if overloaded && !symbols.contains(&symbol) {
                    tracing::warn!(
                        class = %class.qualified_name,
                        method = %method.name,
                        "overloaded tagged methods share one native symbol"
                    );
                }
                method.name.clone()
            };
            symbols.insert(&symbol, &identity)?;

            let scope = format!("{}.{}", class.qualified_name, method.name);
            let mut locals = SymbolTable::new(&scope);
            for name in BASE_MEMBERS.iter().chain(&BODY_LOCALS) {
                locals.reserve(name, &format!("{base_name} body '{name}'"));
            }

            let mut parameters = Vec::with_capacity(method.parameters.len());
            for param in &method.parameters {
                let ty = NativeTypeCategory::of(&param.ty, self.model)?;
                let name = mangle(&param.name, MangleContext::FieldStub);
                locals.insert(&name, &param.name)?;
                parameters.push((ty.native_name(), name));
            }

            bindings.push(MethodBinding {
                method,
                symbol,
                return_type: NativeTypeCategory::of(&method.return_type, self.model)?,
                parameters,
                descriptor: method_descriptor(method),
            });
        }
        Ok(bindings)
    }

    fn generate_constants(&self, class: &ManagedClass) -> Result<String, CodegenError> {
        let mut output = String::new();
        let mut symbols = SymbolTable::new(&class.qualified_name);
        let host = self.config.host_family();

        for field in flatten_fields(self.model, class)? {
            if !field.is_static_final() {
                continue;
            }
            if let Some(define) = define_for_static(&class.qualified_name, field, host)? {
                symbols.insert(&mangle(&field.name, MangleContext::FieldStub), &field.name)?;
                output.push_str(&define);
                output.push('\n');
            }
        }

        if !output.is_empty() {
            output.push('\n');
        }
        Ok(output)
    }

    fn generate_declaration(
        &self,
        class: &ManagedClass,
        base_name: &str,
        namespace: &NamespacePath,
        methods: &[MethodBinding<'_>],
    ) -> Result<String, CodegenError> {
        let mut output = String::new();

        output.push_str(&format!("{FILE_TOP}\n"));
        output.push_str("#pragma once\n\n");
        output.push_str("#include <JNIManagedPeer.h>\n");
        output.push_str("#include <jni.h>\n\n");

        if self.config.emits_constants() {
            output.push_str(&self.generate_constants(class)?);
        }

        output.push_str(&format!("{}\n\n", namespace_begin(namespace)));

        output.push_str(&format!("class {base_name} : public ::JNI::ManagedPeer\n"));
        output.push_str("{\n");
        output.push_str("public:\n");
        output.push_str(&format!("\texplicit {base_name}(jobject object);\n"));
        output.push_str(&format!("\t~{base_name}();\n\n"));
        output.push_str("\tstatic jclass GetClass();\n\n");

        for binding in methods {
            let modifier = if binding.method.is_static { "static " } else { "" };
            output.push_str(&format!("\t{modifier}{};\n", binding.prototype(None)));
        }

        output.push_str("};\n\n");
        output.push_str(&format!("{}\n", namespace_end(namespace)));

        Ok(output)
    }

    fn generate_definition(
        &self,
        class: &ManagedClass,
        base_name: &str,
        namespace: &NamespacePath,
        methods: &[MethodBinding<'_>],
    ) -> String {
        let mut output = String::new();

        output.push_str(&format!("{FILE_TOP}\n"));
        if let Some(pch) = self.config.pch() {
            output.push_str(&format!("#include \"{pch}\"\n"));
        }
        output.push_str(&format!("#include \"{base_name}.h\"\n"));
        output.push_str("#include <mutex>\n\n");

        output.push_str(&format!("{}\n\n", namespace_begin(namespace)));

        // Constructor
        output.push_str(&format!("{base_name}::{base_name}(jobject object)\n"));
        output.push_str("\t: ::JNI::ManagedPeer(object)\n");
        output.push_str("{\n}\n\n");

        // Destructor
        output.push_str(&format!("{base_name}::~{base_name}()\n"));
        output.push_str("{\n}\n\n");

        output.push_str(&format!("jclass {base_name}::GetClass()\n"));
        output.push_str("{\n");
        output.push_str("\tstatic std::once_flag once;\n");
        output.push_str("\tstatic ::JNI::JClass* clazz = nullptr;\n");
        output.push_str(&format!(
            "\tstd::call_once(once, [] {{ clazz = new ::JNI::JClass(\"{}\"); }});\n",
            class_descriptor(class)
        ));
        output.push_str("\treturn *clazz;\n");
        output.push_str("}\n\n");

        for binding in methods {
            output.push_str(&format!("{}\n", binding.prototype(Some(base_name))));
            output.push_str("{\n");
            output.push_str("\tstatic std::once_flag once;\n");
            output.push_str("\tstatic jmethodID methodID = nullptr;\n");
            output.push_str(&format!(
                concat!(
                    "\tstd::call_once(once, [] {{ ",
                    "methodID = GetMethodID(GetClass(), \"{}\", \"{}\"); }});\n"
                ),
                binding.method.name, binding.descriptor
            ));
            output.push_str(&format!("\t{}\n", binding.invocation()));
            output.push_str("}\n\n");
        }

        output.push_str(&format!("{}\n", namespace_end(namespace)));
        output
    }
}

/// Native symbols of one scope, keyed to the identifier that produced them.
struct SymbolTable<'s> {
    scope: &'s str,
    symbols: HashMap<String, String>,
}

impl<'s> SymbolTable<'s> {
    fn new(scope: &'s str) -> Self {
        Self {
            scope,
            symbols: HashMap::new(),
        }
    }

    fn reserve(&mut self, symbol: &str, identity: &str) {
        self.symbols.insert(symbol.to_string(), identity.to_string());
    }

    fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains_key(symbol)
    }

    fn insert(&mut self, symbol: &str, identity: &str) -> Result<(), CodegenError> {
        match self.symbols.get(symbol) {
            Some(first) if first != identity => Err(CodegenError::SymbolCollision {
                scope: self.scope.to_string(),
                symbol: symbol.to_string(),
                first: first.clone(),
                second: identity.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.symbols.insert(symbol.to_string(), identity.to_string());
                Ok(())
            }
        }
    }
}

fn namespace_begin(namespace: &NamespacePath) -> String {
    namespace
        .segments()
        .iter()
        .map(|segment| format!("namespace {segment} {{ "))
        .collect()
}

fn namespace_end(namespace: &NamespacePath) -> String {
    let closing = "}".repeat(namespace.segments().len());
    format!("{closing} // namespace {}", namespace.dotted())
}

/// Encodes generated text as ISO-8859-1 with the given line separator.
///
/// Characters outside the Latin-1 range are written as `?`.
fn encode(text: &str, line_separator: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\n' {
            out.extend_from_slice(line_separator.as_bytes());
        } else {
            out.push(u8::try_from(ch).unwrap_or(b'?'));
        }
    }
    out
}
