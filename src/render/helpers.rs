use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate};
use tera::{try_get_value, Value};

use super::case;

/// `{{ createdAt | formatDate }}` -> `YYYY-MM-DD`.
pub fn format_date(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = try_get_value!("formatDate", "value", String, value);

    let date = if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        ts.date_naive()
    } else if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        date
    } else {
        return Err(tera::Error::msg(format!(
            "Filter `formatDate` expects an ISO-8601 date or timestamp, got `{raw}`"
        )));
    };

    Ok(Value::String(date.format("%Y-%m-%d").to_string()))
}

/// `{{ currentYear() }}`
pub fn current_year(_: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::from(chrono::Local::now().year()))
}

pub fn capitalize(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(case::capitalize(&as_text(value))))
}

pub fn kebab_case(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(case::kebab_case(&as_text(value))))
}

pub fn camel_case(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(case::camel_case(&as_text(value))))
}

pub fn pascal_case(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(case::pascal_case(&as_text(value))))
}

/// `{% if projectType is eq("frontend-demo") %}`
pub fn eq_test(value: Option<&Value>, args: &[Value]) -> tera::Result<bool> {
    let [expected] = args else {
        return Err(tera::Error::msg(
            "Tester `eq` takes exactly one argument to compare against",
        ));
    };
    Ok(value == Some(expected))
}

/// `{{ eq(a=projectType, b="cli-tool") }}`
pub fn eq_fn(args: &HashMap<String, Value>) -> tera::Result<Value> {
    match (args.get("a"), args.get("b")) {
        (Some(a), Some(b)) => Ok(Value::Bool(a == b)),
        _ => Err(tera::Error::msg("Function `eq` requires arguments `a` and `b`")),
    }
}

/// `{{ features | json }}`, `{{ features | json(indent=4) }}`
pub fn json(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    use serde::Serialize;

    let indent = match args.get("indent") {
        Some(v) => try_get_value!("json", "indent", usize, v),
        None => 2,
    };

    let pad = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(pad.as_bytes());
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| tera::Error::msg(format!("Filter `json` failed: {e}")))?;

    let text = String::from_utf8(out)
        .map_err(|e| tera::Error::msg(format!("Filter `json` produced invalid UTF-8: {e}")))?;
    Ok(Value::String(text))
}

/// Falsy values render as the empty string, everything else by its display form.
fn as_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
