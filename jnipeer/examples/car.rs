//! Example generating native peers for a small model built in code.
//!
//! Run with: `cargo run --example car`

use jnipeer::prelude::*;

fn car_model() -> Result<ClassModel, ParseError> {
    let mut model = ClassModel::with_runtime_classes();

    model.add_class(ManagedClass::new("com.jnitest.CarException").extends("java.lang.Exception"))?;
    model.add_class(
        ManagedClass::new("com.jnitest.Car")
            .extends("java.lang.Object")
            .tagged(NamespacePath::parse("JNI.Test"))
            .field(Field::constant(
                "WHEELS",
                TypeDescriptor::Primitive(PrimitiveKind::Int),
                ConstantValue::Int(4),
            ))
            .method(
                Method::new("getCost", TypeDescriptor::Primitive(PrimitiveKind::Double)).tagged(),
            )
            .method(
                Method::new("setCost", TypeDescriptor::Void)
                    .tagged()
                    .param("cost", TypeDescriptor::Primitive(PrimitiveKind::Double)),
            )
            .method(
                Method::new("getCount", TypeDescriptor::Primitive(PrimitiveKind::Int))
                    .tagged()
                    .with_static(),
            )
            .method(
                Method::new("lastFailure", TypeDescriptor::class("com.jnitest.CarException"))
                    .tagged(),
            ),
    )?;

    Ok(model)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let model = car_model()?;
    let output = std::env::temp_dir().join("jnipeer-car");
    std::fs::create_dir_all(&output)?;

    let config = GeneratorConfig::new(&output).emit_constants(true).verbose(true);
    let report = Generator::new(&model, &config).generate()?;

    for artifact in &report.artifacts {
        println!("[Car] {:?}: {}", artifact.outcome, artifact.path.display());
    }

    let header = std::fs::read_to_string(output.join("CarManagedPeer.h"))?;
    println!("\n{header}");

    Ok(())
}
