//! Identifier mangling for native symbols.
//!
//! ASCII letters and digits pass through unchanged in every context. Every
//! other UTF-16 code unit without a context-specific replacement is written
//! as `_0` followed by four lower-case hex digits.

use std::fmt::Write;

/// Context an identifier is mangled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MangleContext {
    /// Qualified class names used as symbol prefixes.
    Class,
    /// Member names (methods, fields, parameters).
    FieldStub,
    /// JNI long names and descriptors.
    Jni,
}

/// Mangles `identifier` into a native symbol for `context`.
#[must_use]
pub fn mangle(identifier: &str, context: MangleContext) -> String {
    let mut out = String::with_capacity(identifier.len());
    for unit in identifier.encode_utf16() {
        match replacement(unit, context) {
            Some(Replacement::Keep(ch)) => out.push(ch),
            Some(Replacement::Text(text)) => out.push_str(text),
            None => {
                // Writing to a String cannot fail.
                let _ = write!(out, "_0{unit:04x}");
            }
        }
    }
    out
}

enum Replacement {
    Keep(char),
    Text(&'static str),
}

fn replacement(unit: u16, context: MangleContext) -> Option<Replacement> {
    let ch = char::from_u32(u32::from(unit)).filter(char::is_ascii)?;
    if ch.is_ascii_alphanumeric() {
        return Some(Replacement::Keep(ch));
    }
    let text = match (context, ch) {
        (MangleContext::Class, '.') => "_",
        (MangleContext::Class, '$') => "__",
        (MangleContext::Class | MangleContext::FieldStub, '_') => "_",
        (MangleContext::Jni, '.' | '/') => "_",
        (MangleContext::Jni, '_') => "_1",
        (MangleContext::Jni, ';') => "_2",
        (MangleContext::Jni, '[') => "_3",
        _ => return None,
    };
    Some(Replacement::Text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alphanumerics_pass_through() {
        for context in [MangleContext::Class, MangleContext::FieldStub, MangleContext::Jni] {
            assert_eq!(mangle("getCost2", context), "getCost2");
        }
    }

    #[test]
    fn test_class_context() {
        assert_eq!(mangle("com.jnitest.Car", MangleContext::Class), "com_jnitest_Car");
        assert_eq!(mangle("a.Outer$Inner", MangleContext::Class), "a_Outer__Inner");
        assert_eq!(mangle("a.my_type", MangleContext::Class), "a_my_type");
    }

    #[test]
    fn test_field_stub_context() {
        assert_eq!(mangle("MAX_SPEED", MangleContext::FieldStub), "MAX_SPEED");
        assert_eq!(mangle("a$b", MangleContext::FieldStub), "a_00024b");
        assert_eq!(mangle("a.b", MangleContext::FieldStub), "a_0002eb");
    }

    #[test]
    fn test_jni_context() {
        assert_eq!(mangle("com/jnitest/Car", MangleContext::Jni), "com_jnitest_Car");
        assert_eq!(mangle("set_cost", MangleContext::Jni), "set_1cost");
        assert_eq!(
            mangle("Ljava/lang/String;[I", MangleContext::Jni),
            "Ljava_lang_String_2_3I"
        );
        assert_eq!(mangle("a$b", MangleContext::Jni), "a_00024b");
    }

    #[test]
    fn test_non_ascii_escaped_per_code_unit() {
        assert_eq!(mangle("é", MangleContext::FieldStub), "_000e9");
        // U+1F600 is a surrogate pair.
        assert_eq!(mangle("\u{1F600}", MangleContext::Jni), "_0d83d_0de00");
    }

    proptest! {
        #[test]
        fn test_mangle_is_deterministic(input in "\\PC{0,16}") {
            for context in [MangleContext::Class, MangleContext::FieldStub, MangleContext::Jni] {
                prop_assert_eq!(mangle(&input, context), mangle(&input, context));
            }
        }

        #[test]
        fn test_jni_context_is_injective(
            a in "[A-Za-z_$][A-Za-z0-9_$]{0,8}",
            b in "[A-Za-z_$][A-Za-z0-9_$]{0,8}",
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(mangle(&a, MangleContext::Jni), mangle(&b, MangleContext::Jni));
        }

        #[test]
        fn test_output_is_a_c_identifier_tail(input in "\\PC{0,16}") {
            let out = mangle(&input, MangleContext::FieldStub);
            prop_assert!(out.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }
}
