//! `ToInt32`/`ToUint32`-style numeric coercions for the bitwise and
//! shift operators, plus small combinators so `evaluator.rs` doesn't
//! repeat the "both operands must be Number, else Undefined" match
//! fifteen times over.

use vela_gc::Value;

const TWO_32: f64 = 4294967296.0;

pub fn to_i32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    let modulo = n.trunc().rem_euclid(TWO_32);
    if modulo >= 2147483648.0 {
        (modulo - TWO_32) as i32
    } else {
        modulo as i32
    }
}

pub fn to_u32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(TWO_32) as u32
}

pub fn numeric_op(left: &Value, right: &Value, f: impl Fn(f64, f64) -> f64) -> Value {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Value::Number(f(*a, *b)),
        _ => Value::Undefined,
    }
}

pub fn numeric_cmp(left: &Value, right: &Value, f: impl Fn(f64, f64) -> bool) -> Value {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Value::Boolean(f(*a, *b)),
        _ => Value::Undefined,
    }
}

pub fn int32_op(left: &Value, right: &Value, f: impl Fn(i32, i32) -> i32) -> Value {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Value::Number(f(to_i32(*a), to_i32(*b)) as f64),
        _ => Value::Undefined,
    }
}

pub fn shift_op(left: &Value, right: &Value, f: impl Fn(i32, u32) -> i32) -> Value {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let shift = to_u32(*b) & 0x1f;
            Value::Number(f(to_i32(*a), shift) as f64)
        }
        _ => Value::Undefined,
    }
}

pub fn ushift_op(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let shift = to_u32(*b) & 0x1f;
            Value::Number((to_u32(*a) >> shift) as f64)
        }
        _ => Value::Undefined,
    }
}
