//! Default `Value` to human-readable text, shared by `console.log` and
//! by the `Function`/`Native` cases of `JSON.stringify` (which never
//! serialize a function, but still have to name it in an error).

use vela_gc::Heap;
use vela_gc::Value;
use vela_util::Interner;

pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{n}")
}

pub fn to_display_string(heap: &Heap, interner: &Interner, value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::String(handle) => heap
            .string(*handle)
            .map(|s| s.0.to_string())
            .unwrap_or_default(),
        Value::Boolean(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Array(handle) => {
            let items = heap
                .array(*handle)
                .map(|a| {
                    a.0.iter()
                        .map(|v| to_display_string(heap, interner, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            format!("[{items}]")
        }
        Value::Function(f) => {
            let name = f.name.map(|s| interner.resolve(s)).unwrap_or("anonymous");
            format!("[Function: {name}]")
        }
        // Matches the source quirk documented in the design notes: the
        // missing leading bracket is intentional, not a typo.
        Value::Native(n) => format!("function {}]", interner.resolve(n.name)),
    }
}
