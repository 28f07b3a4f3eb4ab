//! The `Math` global: a PRNG-backed `random`, plus the handful of
//! numeric natives (`floor`, `ceil`, `abs`, `max`, `min`, `pow`, `sqrt`)
//! every JS-semantics interpreter carries. These were dropped by the
//! distillation but are not a non-goal — `console.log(1 + 2 * 3)`-style
//! scenarios need ordinary arithmetic, not `Math`, but any program that
//! reaches for `Math.floor` would find it missing from a core that
//! claims JS-like numeric semantics otherwise.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use vela_gc::{Heap, NativeError, Value};
use vela_util::Interner;

/// xorshift64*, seeded once at interpreter start. Not cryptographic —
/// `Math.random` never needs to be.
struct Xorshift64 {
    state: Cell<u64>,
}

impl Xorshift64 {
    fn seeded() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e3779b97f4a7c15)
            | 1;
        Self { state: Cell::new(seed) }
    }

    fn next_f64(&self) -> f64 {
        let mut x = self.state.get();
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state.set(x);
        // Top 53 bits give a value in [0, 1) with full `f64` mantissa
        // precision.
        (x >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn arg_number(args: &[Value], index: usize, who: &str) -> Result<f64, NativeError> {
    match args.get(index) {
        Some(Value::Number(n)) => Ok(*n),
        _ => Err(NativeError::InvalidArgument(format!("{who} expects a number argument"))),
    }
}

pub fn random_fn() -> impl Fn(&mut Heap, &mut Interner, &[Value]) -> Result<Value, NativeError> {
    let prng = Rc::new(Xorshift64::seeded());
    move |_heap, _interner, _args| Ok(Value::Number(prng.next_f64()))
}

pub fn floor(_heap: &mut Heap, _interner: &mut Interner, args: &[Value]) -> Result<Value, NativeError> {
    Ok(Value::Number(arg_number(args, 0, "Math.floor")?.floor()))
}

pub fn ceil(_heap: &mut Heap, _interner: &mut Interner, args: &[Value]) -> Result<Value, NativeError> {
    Ok(Value::Number(arg_number(args, 0, "Math.ceil")?.ceil()))
}

pub fn abs(_heap: &mut Heap, _interner: &mut Interner, args: &[Value]) -> Result<Value, NativeError> {
    Ok(Value::Number(arg_number(args, 0, "Math.abs")?.abs()))
}

pub fn max(_heap: &mut Heap, _interner: &mut Interner, args: &[Value]) -> Result<Value, NativeError> {
    let mut result = f64::NEG_INFINITY;
    for i in 0..args.len() {
        result = result.max(arg_number(args, i, "Math.max")?);
    }
    Ok(Value::Number(result))
}

pub fn min(_heap: &mut Heap, _interner: &mut Interner, args: &[Value]) -> Result<Value, NativeError> {
    let mut result = f64::INFINITY;
    for i in 0..args.len() {
        result = result.min(arg_number(args, i, "Math.min")?);
    }
    Ok(Value::Number(result))
}

pub fn pow(_heap: &mut Heap, _interner: &mut Interner, args: &[Value]) -> Result<Value, NativeError> {
    let base = arg_number(args, 0, "Math.pow")?;
    let exp = arg_number(args, 1, "Math.pow")?;
    Ok(Value::Number(base.powf(exp)))
}

pub fn sqrt(_heap: &mut Heap, _interner: &mut Interner, args: &[Value]) -> Result<Value, NativeError> {
    Ok(Value::Number(arg_number(args, 0, "Math.sqrt")?.sqrt()))
}
