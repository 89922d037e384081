//! Constant literal formatting for `#define` blocks.

use super::mangle::{MangleContext, mangle};
use crate::config::HostFamily;
use crate::error::CodegenError;
use jnipeer_model::{ConstantValue, Field};

/// Formats a constant as a native literal.
#[must_use]
pub fn format_constant(value: &ConstantValue, host: HostFamily) -> String {
    match value {
        ConstantValue::Boolean(true) => "1L".to_string(),
        ConstantValue::Boolean(false) => "0L".to_string(),
        ConstantValue::Byte(v) => format!("{v}L"),
        ConstantValue::Char(v) => format!("{v}L"),
        ConstantValue::Short(v) => format!("{v}L"),
        ConstantValue::Int(v) => format!("{v}L"),
        ConstantValue::Long(v) => format!("{v}{}", host.long_suffix()),
        ConstantValue::Float(v) => format_float(*v),
        ConstantValue::Double(v) => format_double(*v),
    }
}

fn format_float(value: f32) -> String {
    if value.is_infinite() {
        return if value.is_sign_negative() { "-Inff" } else { "Inff" }.to_string();
    }
    if value.is_nan() {
        return "NaNf".to_string();
    }
    let text = java_decimal(&format!("{:e}", value.abs()), value.is_sign_negative());
    format!("{text}f")
}

fn format_double(value: f64) -> String {
    if value.is_infinite() {
        return if value.is_sign_negative() { "-InfD" } else { "InfD" }.to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    java_decimal(&format!("{:e}", value.abs()), value.is_sign_negative())
}

/// Renders shortest scientific digits (`d.ddde-n`) the way the managed
/// runtime prints floating point values: plain decimal for magnitudes in
/// `[1e-3, 1e7)`, otherwise `d.dddEn`, always with a fraction digit.
fn java_decimal(scientific: &str, negative: bool) -> String {
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let mut out = String::new();
    if negative {
        out.push('-');
    }

    if (-3..7).contains(&exponent) {
        if exponent >= 0 {
            let int_len = usize::try_from(exponent).unwrap_or(0) + 1;
            if digits.len() <= int_len {
                out.push_str(&digits);
                out.extend(std::iter::repeat_n('0', int_len - digits.len()));
                out.push_str(".0");
            } else {
                out.push_str(&digits[..int_len]);
                out.push('.');
                out.push_str(&digits[int_len..]);
            }
        } else {
            let zeros = usize::try_from(-exponent - 1).unwrap_or(0);
            out.push_str("0.");
            out.extend(std::iter::repeat_n('0', zeros));
            out.push_str(&digits);
        }
    } else {
        out.push_str(&digits[..1]);
        out.push('.');
        if digits.len() > 1 {
            out.push_str(&digits[1..]);
        } else {
            out.push('0');
        }
        out.push('E');
        out.push_str(&exponent.to_string());
    }
    out
}

/// Builds the `#undef`/`#define` pair for a static final field.
///
/// `class_name` is the qualified name of the class the definition is
/// generated for. Returns `Ok(None)` for fields without a constant value.
///
/// # Errors
/// Returns `CodegenError::Bug` if the field is not both static and final.
pub fn define_for_static(
    class_name: &str,
    field: &Field,
    host: HostFamily,
) -> Result<Option<String>, CodegenError> {
    if !field.is_static_final() {
        return Err(CodegenError::bug(format!(
            "constant requested for non-static or non-final field '{class_name}.{}'",
            field.name
        )));
    }
    let Some(value) = &field.constant else {
        return Ok(None);
    };

    let symbol = format!(
        "{}_{}",
        mangle(class_name, MangleContext::Class),
        mangle(&field.name, MangleContext::FieldStub)
    );
    Ok(Some(format!(
        "#undef {symbol}\n#define {symbol} {}",
        format_constant(value, host)
    )))
}
