//! Tree-walking evaluation of a parsed program.
//!
//! One `Evaluator` owns the heap, the interner, and the environment
//! it is currently executing in. Statement evaluation returns a
//! [`Completion`] so `break`/`continue`/`return` can unwind through
//! nested blocks without exceptions; expression evaluation returns a
//! plain `Result<Value, EvalError>` since expressions never produce
//! non-local control flow on their own.
//!
//! Failure is not recovered mid-program: the first `Err` bubbles
//! straight out of `run_program` to the driver, which is the one
//! place that turns it into a diagnostic.

use std::rc::Rc;

use vela_gc::{BindingKind, FunctionValue, Heap, JSArray, JSObject, Value};
use vela_par::ast::*;
use vela_util::{Interner, Span, Symbol};

use crate::completion::Completion;
use crate::environment::Environment;
use crate::error::{EvalError, EvalResult};
use crate::numeric::{int32_op, numeric_cmp, numeric_op, shift_op, ushift_op};
use crate::stringify::to_display_string;

pub struct Evaluator<'a> {
    pub heap: &'a mut Heap,
    pub interner: &'a mut Interner,
    pub env: Environment,
}

impl<'a> Evaluator<'a> {
    pub fn new(heap: &'a mut Heap, interner: &'a mut Interner, env: Environment) -> Self {
        heap.set_current_env(env.handle());
        Self { heap, interner, env }
    }

    pub fn run_program(&mut self, program: &Program) -> EvalResult<()> {
        for stmt in program {
            self.eval_stmt(stmt)?;
        }
        Ok(())
    }

    // --- Statements -----------------------------------------------------

    fn eval_stmt(&mut self, stmt: &Stmt) -> EvalResult<Completion> {
        match stmt {
            Stmt::ExprStmt(s) => Ok(Completion::Normal(self.eval_expr(&s.expr)?)),
            Stmt::Block(b) => self.eval_block_scoped(b),
            Stmt::VarDecl(decl) => self.eval_var_decl(decl),
            Stmt::FuncDecl(decl) => self.eval_func_decl(decl),
            Stmt::If(s) => self.eval_if(s),
            Stmt::While(s) => self.eval_while(s),
            Stmt::For(s) => self.eval_for(s),
            Stmt::Return(s) => {
                let value = match &s.value {
                    Some(e) => self.eval_expr(e)?,
                    None => Value::Undefined,
                };
                Ok(Completion::Return(value))
            }
            Stmt::Break(_) => Ok(Completion::Break),
            Stmt::Continue(_) => Ok(Completion::Continue),
        }
    }

    fn eval_block_scoped(&mut self, block: &Block) -> EvalResult<Completion> {
        let previous_env = self.env;
        self.env = previous_env.child(self.heap, false);
        let prev_gc_env = self.heap.set_current_env(self.env.handle());

        let completion = self.eval_block_stmts(&block.stmts);

        self.heap.restore_current_env(prev_gc_env);
        self.env = previous_env;
        completion
    }

    /// Runs a statement list in the *current* environment (no new scope
    /// pushed) — used both by `eval_block_scoped` after it has already
    /// pushed a scope, and by function calls whose parameter scope was
    /// pushed by the caller.
    fn eval_block_stmts(&mut self, stmts: &[Stmt]) -> EvalResult<Completion> {
        let mut last = Value::Undefined;
        for stmt in stmts {
            match self.eval_stmt(stmt)? {
                Completion::Normal(v) => last = v,
                other => return Ok(other),
            }
        }
        Ok(Completion::Normal(last))
    }

    fn eval_var_decl(&mut self, decl: &VarDecl) -> EvalResult<Completion> {
        let value = match &decl.init {
            Some(e) => self.eval_expr(e)?,
            None => Value::Undefined,
        };
        self.env.define(self.heap, decl.name, value, decl.kind);
        Ok(Completion::Normal(Value::Undefined))
    }

    fn eval_func_decl(&mut self, decl: &FuncDecl) -> EvalResult<Completion> {
        let func = Rc::new(FunctionValue {
            name: Some(decl.name),
            params: decl.params.clone(),
            body: decl.body.clone(),
            closure: self.env.handle(),
        });
        self.env.define(self.heap, decl.name, Value::Function(func), BindingKind::Var);
        Ok(Completion::Normal(Value::Undefined))
    }

    fn eval_if(&mut self, stmt: &IfStmt) -> EvalResult<Completion> {
        let cond = self.eval_expr(&stmt.cond)?;
        if cond.is_truthy(self.heap) {
            self.eval_stmt(&stmt.then_branch)
        } else if let Some(else_branch) = &stmt.else_branch {
            self.eval_stmt(else_branch)
        } else {
            Ok(Completion::Normal(Value::Undefined))
        }
    }

    fn eval_while(&mut self, stmt: &WhileStmt) -> EvalResult<Completion> {
        loop {
            let cond = self.eval_expr(&stmt.cond)?;
            if !cond.is_truthy(self.heap) {
                break;
            }
            match self.eval_stmt(&stmt.body)? {
                Completion::Break => break,
                Completion::Continue | Completion::Normal(_) => {}
                Completion::Return(v) => return Ok(Completion::Return(v)),
            }
        }
        Ok(Completion::Normal(Value::Undefined))
    }

    fn eval_for(&mut self, stmt: &ForStmt) -> EvalResult<Completion> {
        let previous_env = self.env;
        self.env = previous_env.child(self.heap, false);
        let prev_gc_env = self.heap.set_current_env(self.env.handle());

        let completion = self.run_for_body(stmt);

        self.heap.restore_current_env(prev_gc_env);
        self.env = previous_env;
        completion
    }

    fn run_for_body(&mut self, stmt: &ForStmt) -> EvalResult<Completion> {
        if let Some(init) = &stmt.init {
            self.eval_stmt(init)?;
        }
        loop {
            if let Some(cond) = &stmt.cond {
                let v = self.eval_expr(cond)?;
                if !v.is_truthy(self.heap) {
                    break;
                }
            }
            match self.eval_stmt(&stmt.body)? {
                Completion::Break => break,
                Completion::Continue | Completion::Normal(_) => {}
                Completion::Return(v) => return Ok(Completion::Return(v)),
            }
            if let Some(update) = &stmt.update {
                self.eval_expr(update)?;
            }
        }
        Ok(Completion::Normal(Value::Undefined))
    }

    // --- Expressions ------------------------------------------------------

    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Number(n, _) => Ok(Value::Number(*n)),
            Expr::String(sym, _) => {
                let text = self.interner.resolve(*sym).to_string();
                Ok(Value::String(self.heap.alloc_string(text)))
            }
            Expr::Boolean(b, _) => Ok(Value::Boolean(*b)),
            Expr::Null(_) => Ok(Value::Null),
            Expr::Undefined(_) => Ok(Value::Undefined),
            Expr::Identifier(sym, span) => self.env.get(self.heap, *sym).ok_or_else(|| {
                EvalError::UndefinedVariable {
                    name: self.interner.resolve(*sym).to_string(),
                    span: *span,
                }
            }),
            Expr::Unary(u) => self.eval_unary(u),
            Expr::Binary(b) => self.eval_binary(b),
            Expr::Logical(l) => self.eval_logical(l),
            Expr::Assignment(a) => self.eval_assignment(a),
            Expr::Ternary(t) => {
                let cond = self.eval_expr(&t.cond)?;
                if cond.is_truthy(self.heap) {
                    self.eval_expr(&t.then_branch)
                } else {
                    self.eval_expr(&t.else_branch)
                }
            }
            Expr::Call(c) => self.eval_call(c),
            Expr::Member(m) => self.eval_member(m),
            Expr::Index(i) => self.eval_index(i),
            Expr::Template(t) => self.eval_template(t),
            Expr::ArrayLit(a) => self.eval_array_lit(a),
            Expr::ObjectLit(o) => self.eval_object_lit(o),
            Expr::FunctionExpr(f) => Ok(Value::Function(Rc::new(FunctionValue {
                name: f.name,
                params: f.params.clone(),
                body: f.body.clone(),
                closure: self.env.handle(),
            }))),
        }
    }

    fn eval_unary(&mut self, u: &UnaryExpr) -> EvalResult<Value> {
        match u.op {
            UnOp::Typeof => {
                // `typeof` of an unbound identifier yields "undefined"
                // rather than raising `UndefinedVariable`, unlike every
                // other use of an identifier.
                let value = if let Expr::Identifier(sym, _) = u.operand.as_ref() {
                    self.env.get(self.heap, *sym).unwrap_or(Value::Undefined)
                } else {
                    self.eval_expr(&u.operand)?
                };
                Ok(self.alloc_str(value.type_name()))
            }
            UnOp::Void => {
                self.eval_expr(&u.operand)?;
                Ok(Value::Undefined)
            }
            UnOp::Delete => self.eval_delete(&u.operand),
            UnOp::Neg => {
                let v = self.eval_expr(&u.operand)?;
                Ok(match v {
                    Value::Number(n) => Value::Number(-n),
                    _ => Value::Undefined,
                })
            }
            UnOp::Not => {
                let v = self.eval_expr(&u.operand)?;
                Ok(Value::Boolean(!v.is_truthy(self.heap)))
            }
            UnOp::BitNot => {
                let v = self.eval_expr(&u.operand)?;
                Ok(match v {
                    Value::Number(n) => Value::Number(!crate::numeric::to_i32(n) as f64),
                    _ => Value::Undefined,
                })
            }
        }
    }

    fn eval_delete(&mut self, operand: &Expr) -> EvalResult<Value> {
        match operand {
            Expr::Member(m) => {
                let object = self.eval_expr(&m.object)?;
                if let Value::Object(handle) = object {
                    if let Some(obj) = self.heap.object_mut(handle) {
                        obj.0.shift_remove(&m.property);
                    }
                }
                Ok(Value::Boolean(true))
            }
            Expr::Index(idx) => {
                let object = self.eval_expr(&idx.object)?;
                let index_value = self.eval_expr(&idx.index)?;
                match object {
                    Value::Object(handle) => {
                        let key = self.value_to_symbol(&index_value);
                        if let Some(obj) = self.heap.object_mut(handle) {
                            obj.0.shift_remove(&key);
                        }
                    }
                    Value::Array(handle) => {
                        if let Value::Number(n) = index_value {
                            if n >= 0.0 {
                                let i = n.floor() as usize;
                                if let Some(arr) = self.heap.array_mut(handle) {
                                    if i < arr.0.len() {
                                        arr.0[i] = Value::Undefined;
                                    }
                                }
                            }
                        }
                    }
                    _ => {}
                }
                Ok(Value::Boolean(true))
            }
            // Deleting anything that isn't a property reference is a
            // no-op in JS and always reports success.
            _ => Ok(Value::Boolean(true)),
        }
    }

    fn eval_binary(&mut self, b: &BinaryExpr) -> EvalResult<Value> {
        let left = self.eval_expr(&b.left)?;
        self.heap.push_value_root(left.clone());
        // Captured rather than propagated with `?` directly so the root
        // pushed above is always popped, even if the right operand's
        // evaluation fails.
        let right = self.eval_expr(&b.right);
        self.heap.pop_value_root();
        let right = right?;

        let result = match b.op {
            BinOp::Add => self.eval_add(left, right)?,
            BinOp::Sub => numeric_op(&left, &right, |a, c| a - c),
            BinOp::Mul => numeric_op(&left, &right, |a, c| a * c),
            BinOp::Div => numeric_op(&left, &right, |a, c| a / c),
            BinOp::Mod => numeric_op(&left, &right, |a, c| a % c),
            BinOp::Pow => numeric_op(&left, &right, |a, c| a.powf(c)),
            BinOp::Eq | BinOp::StrictEq => Value::Boolean(self.values_equal(&left, &right)),
            BinOp::NotEq | BinOp::StrictNotEq => Value::Boolean(!self.values_equal(&left, &right)),
            BinOp::Lt => numeric_cmp(&left, &right, |a, c| a < c),
            BinOp::LtEq => numeric_cmp(&left, &right, |a, c| a <= c),
            BinOp::Gt => numeric_cmp(&left, &right, |a, c| a > c),
            BinOp::GtEq => numeric_cmp(&left, &right, |a, c| a >= c),
            BinOp::BitAnd => int32_op(&left, &right, |a, c| a & c),
            BinOp::BitOr => int32_op(&left, &right, |a, c| a | c),
            BinOp::BitXor => int32_op(&left, &right, |a, c| a ^ c),
            BinOp::Shl => shift_op(&left, &right, |a, s| a << s),
            BinOp::Shr => shift_op(&left, &right, |a, s| a >> s),
            BinOp::UShr => ushift_op(&left, &right),
            // No `new`, no classes, no prototype chain in this language
            // (explicit non-goal) — there is nothing `instanceof` could
            // meaningfully test, so it always reports false.
            BinOp::Instanceof => Value::Boolean(false),
            BinOp::In => self.eval_in(&left, &right, b.span)?,
        };
        Ok(result)
    }

    fn eval_add(&mut self, left: Value, right: Value) -> EvalResult<Value> {
        match (&left, &right) {
            (Value::Number(a), Value::Number(c)) => Ok(Value::Number(a + c)),
            (Value::String(_), Value::String(_)) => {
                let a = self.display_value(&left);
                let c = self.display_value(&right);
                Ok(Value::String(self.heap.alloc_string(format!("{a}{c}"))))
            }
            _ => Ok(Value::Undefined),
        }
    }

    fn values_equal(&self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::String(x), Value::String(y)) => self.heap.string(*x) == self.heap.string(*y),
            (Value::Boolean(x), Value::Boolean(y)) => x == y,
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            (Value::Object(x), Value::Object(y)) => x == y,
            (Value::Array(x), Value::Array(y)) => x == y,
            (Value::Function(x), Value::Function(y)) => Rc::ptr_eq(x, y),
            (Value::Native(x), Value::Native(y)) => Rc::ptr_eq(x, y),
            _ => false,
        }
    }

    fn eval_in(&mut self, left: &Value, right: &Value, span: Span) -> EvalResult<Value> {
        match right {
            Value::Object(handle) => {
                let key = self.value_to_symbol(left);
                let obj = self.heap.object(*handle).ok_or(EvalError::NotAnObject { span })?;
                Ok(Value::Boolean(obj.0.contains_key(&key)))
            }
            Value::Array(handle) => {
                let arr = self.heap.array(*handle).ok_or(EvalError::NotAnArray { span })?;
                match left {
                    Value::Number(n) if *n >= 0.0 => Ok(Value::Boolean((*n as usize) < arr.0.len())),
                    _ => Ok(Value::Boolean(false)),
                }
            }
            _ => Err(EvalError::NotAnObject { span }),
        }
    }

    fn eval_logical(&mut self, l: &LogicalExpr) -> EvalResult<Value> {
        let left = self.eval_expr(&l.left)?;
        match l.op {
            LogicalOp::And => {
                if left.is_truthy(self.heap) {
                    self.eval_expr(&l.right)
                } else {
                    Ok(left)
                }
            }
            LogicalOp::Or => {
                if left.is_truthy(self.heap) {
                    Ok(left)
                } else {
                    self.eval_expr(&l.right)
                }
            }
            LogicalOp::NullishCoalesce => {
                if left.is_nullish() {
                    self.eval_expr(&l.right)
                } else {
                    Ok(left)
                }
            }
        }
    }

    fn eval_assignment(&mut self, a: &AssignmentExpr) -> EvalResult<Value> {
        match a.target.as_ref() {
            Expr::Identifier(name, span) => {
                let new_value = if a.op == AssignOp::Assign {
                    self.eval_expr(&a.value)?
                } else {
                    let current = self.env.get(self.heap, *name).ok_or_else(|| {
                        EvalError::UndefinedVariable {
                            name: self.interner.resolve(*name).to_string(),
                            span: *span,
                        }
                    })?;
                    let rhs = self.eval_expr(&a.value)?;
                    self.apply_compound(a.op, &current, &rhs)?
                };
                self.env
                    .set(self.heap, *name, new_value.clone())
                    .map_err(|e| EvalError::from_assign(e, self.interner.resolve(*name), *span))?;
                Ok(new_value)
            }
            Expr::Member(m) => {
                let object = self.eval_expr(&m.object)?;
                let handle = match object {
                    Value::Object(h) => h,
                    _ => return Err(EvalError::NotAnObject { span: m.span }),
                };
                let new_value = if a.op == AssignOp::Assign {
                    self.eval_expr(&a.value)?
                } else {
                    let current = self
                        .heap
                        .object(handle)
                        .and_then(|o| o.0.get(&m.property).cloned())
                        .unwrap_or(Value::Undefined);
                    let rhs = self.eval_expr(&a.value)?;
                    self.apply_compound(a.op, &current, &rhs)?
                };
                if let Some(obj) = self.heap.object_mut(handle) {
                    obj.0.insert(m.property, new_value.clone());
                }
                Ok(new_value)
            }
            Expr::Index(idx) => {
                let object = self.eval_expr(&idx.object)?;
                let index_value = self.eval_expr(&idx.index)?;
                match object {
                    Value::Array(handle) => {
                        if !matches!(index_value, Value::Number(n) if n >= 0.0) {
                            return Err(EvalError::IndexOutOfBounds { span: idx.span });
                        }
                        let i = match index_value {
                            Value::Number(n) => n.floor() as usize,
                            _ => unreachable!(),
                        };
                        let new_value = if a.op == AssignOp::Assign {
                            self.eval_expr(&a.value)?
                        } else {
                            let current = self
                                .heap
                                .array(handle)
                                .and_then(|arr| arr.0.get(i).cloned())
                                .unwrap_or(Value::Undefined);
                            let rhs = self.eval_expr(&a.value)?;
                            self.apply_compound(a.op, &current, &rhs)?
                        };
                        if let Some(arr) = self.heap.array_mut(handle) {
                            if i >= arr.0.len() {
                                arr.0.resize(i + 1, Value::Undefined);
                            }
                            arr.0[i] = new_value.clone();
                        }
                        Ok(new_value)
                    }
                    Value::Object(handle) => {
                        let key = self.value_to_symbol(&index_value);
                        let new_value = if a.op == AssignOp::Assign {
                            self.eval_expr(&a.value)?
                        } else {
                            let current = self
                                .heap
                                .object(handle)
                                .and_then(|o| o.0.get(&key).cloned())
                                .unwrap_or(Value::Undefined);
                            let rhs = self.eval_expr(&a.value)?;
                            self.apply_compound(a.op, &current, &rhs)?
                        };
                        if let Some(obj) = self.heap.object_mut(handle) {
                            obj.0.insert(key, new_value.clone());
                        }
                        Ok(new_value)
                    }
                    _ => Err(EvalError::NotAnObject { span: idx.span }),
                }
            }
            _ => unreachable!("parser rejects non-lvalue assignment targets"),
        }
    }

    fn apply_compound(&mut self, op: AssignOp, current: &Value, rhs: &Value) -> EvalResult<Value> {
        Ok(match op {
            AssignOp::Assign => unreachable!("Assign is handled by the caller directly"),
            AssignOp::AddAssign => self.eval_add(current.clone(), rhs.clone())?,
            AssignOp::SubAssign => numeric_op(current, rhs, |a, b| a - b),
            AssignOp::MulAssign => numeric_op(current, rhs, |a, b| a * b),
            AssignOp::DivAssign => numeric_op(current, rhs, |a, b| a / b),
            AssignOp::ModAssign => numeric_op(current, rhs, |a, b| a % b),
            AssignOp::PowAssign => numeric_op(current, rhs, |a, b| a.powf(b)),
            AssignOp::AndAssign => int32_op(current, rhs, |a, b| a & b),
            AssignOp::OrAssign => int32_op(current, rhs, |a, b| a | b),
            AssignOp::XorAssign => int32_op(current, rhs, |a, b| a ^ b),
            AssignOp::ShlAssign => shift_op(current, rhs, |a, s| a << s),
            AssignOp::ShrAssign => shift_op(current, rhs, |a, s| a >> s),
            AssignOp::UShrAssign => ushift_op(current, rhs),
            AssignOp::NullishAssign => {
                if current.is_nullish() {
                    rhs.clone()
                } else {
                    current.clone()
                }
            }
        })
    }

    fn eval_call(&mut self, c: &CallExpr) -> EvalResult<Value> {
        let callee = self.eval_expr(&c.callee)?;
        self.heap.push_value_root(callee.clone());

        let mut args = Vec::with_capacity(c.args.len());
        for arg_expr in &c.args {
            // A later argument's evaluation can fail after earlier ones
            // already pushed a root — pop everything pushed so far
            // (callee included) before propagating the error.
            match self.eval_expr(arg_expr) {
                Ok(v) => {
                    self.heap.push_value_root(v.clone());
                    args.push(v);
                }
                Err(e) => {
                    self.pop_value_roots(args.len() + 1);
                    return Err(e);
                }
            }
        }

        let result = self.call_value(&callee, &args, c.span);
        self.pop_value_roots(args.len() + 1);
        result
    }

    fn call_value(&mut self, callee: &Value, args: &[Value], span: Span) -> EvalResult<Value> {
        match callee {
            Value::Function(func) => self.call_function(func, args, span),
            Value::Native(native) => {
                let func = native.func.clone();
                func(self.heap, self.interner, args).map_err(|e| EvalError::from_native(e, span))
            }
            _ => Err(EvalError::NotCallable { span }),
        }
    }

    fn call_function(&mut self, func: &Rc<FunctionValue>, args: &[Value], span: Span) -> EvalResult<Value> {
        if args.len() > func.params.len() {
            return Err(EvalError::TooManyArguments { span });
        }

        let previous_env = self.env;
        let call_env = Environment(func.closure).child(self.heap, true);
        for (i, param) in func.params.iter().enumerate() {
            let value = args.get(i).cloned().unwrap_or(Value::Undefined);
            call_env.define(self.heap, *param, value, BindingKind::Let);
        }

        self.env = call_env;
        let prev_gc_env = self.heap.set_current_env(call_env.handle());

        let result = self.eval_block_stmts(&func.body.stmts);

        self.heap.restore_current_env(prev_gc_env);
        self.env = previous_env;

        result.map(Completion::into_value)
    }

    fn eval_member(&mut self, m: &MemberExpr) -> EvalResult<Value> {
        let object = self.eval_expr(&m.object)?;
        if m.optional && object.is_nullish() {
            return Ok(Value::Undefined);
        }
        match object {
            Value::Object(handle) => {
                let obj = self.heap.object(handle).ok_or(EvalError::NotAnObject { span: m.span })?;
                Ok(obj.0.get(&m.property).cloned().unwrap_or(Value::Undefined))
            }
            // `.length` is direct property lookup, not prototype-chain
            // walking, so it stays in scope even under the "no
            // prototype chain" non-goal.
            Value::Array(handle) if self.interner.resolve(m.property) == "length" => {
                let len = self.heap.array(handle).map(|a| a.0.len()).unwrap_or(0);
                Ok(Value::Number(len as f64))
            }
            _ => Err(EvalError::NotAnObject { span: m.span }),
        }
    }

    fn eval_index(&mut self, idx: &IndexExpr) -> EvalResult<Value> {
        let object = self.eval_expr(&idx.object)?;
        let index_value = self.eval_expr(&idx.index)?;
        match (&object, &index_value) {
            (Value::Array(handle), Value::Number(n)) => {
                if *n < 0.0 {
                    return Ok(Value::Undefined);
                }
                let i = n.floor() as usize;
                Ok(self.heap.array(*handle).and_then(|a| a.0.get(i).cloned()).unwrap_or(Value::Undefined))
            }
            (Value::Object(handle), _) => {
                let key = self.value_to_symbol(&index_value);
                Ok(self.heap.object(*handle).and_then(|o| o.0.get(&key).cloned()).unwrap_or(Value::Undefined))
            }
            (Value::Array(handle), Value::String(s)) if self.heap.string(*s).map(|s| &*s.0 == "length").unwrap_or(false) => {
                let len = self.heap.array(*handle).map(|a| a.0.len()).unwrap_or(0);
                Ok(Value::Number(len as f64))
            }
            _ => Ok(Value::Undefined),
        }
    }

    fn eval_template(&mut self, t: &TemplateExpr) -> EvalResult<Value> {
        let mut result = String::new();
        for (i, quasi) in t.quasis.iter().enumerate() {
            result.push_str(self.interner.resolve(*quasi));
            if let Some(expr) = t.exprs.get(i) {
                let v = self.eval_expr(expr)?;
                result.push_str(&self.display_value(&v));
            }
        }
        Ok(Value::String(self.heap.alloc_string(result)))
    }

    fn eval_array_lit(&mut self, a: &ArrayLitExpr) -> EvalResult<Value> {
        let mut elements = Vec::with_capacity(a.elements.len());
        for el in &a.elements {
            match self.eval_expr(el) {
                Ok(v) => {
                    self.heap.push_value_root(v.clone());
                    elements.push(v);
                }
                Err(e) => {
                    self.pop_value_roots(elements.len());
                    return Err(e);
                }
            }
        }
        let count = elements.len();
        let handle = self.heap.alloc_array(JSArray(elements));
        self.pop_value_roots(count);
        Ok(Value::Array(handle))
    }

    fn eval_object_lit(&mut self, o: &ObjectLitExpr) -> EvalResult<Value> {
        let mut object = JSObject::default();
        let mut pushed = 0;
        for prop in &o.properties {
            let key = match prop.key {
                PropertyKey::Identifier(s) | PropertyKey::String(s) => s,
            };
            match self.eval_expr(&prop.value) {
                Ok(value) => {
                    self.heap.push_value_root(value.clone());
                    pushed += 1;
                    object.0.insert(key, value);
                }
                Err(e) => {
                    self.pop_value_roots(pushed);
                    return Err(e);
                }
            }
        }
        let handle = self.heap.alloc_object(object);
        self.pop_value_roots(pushed);
        Ok(Value::Object(handle))
    }

    // --- Shared helpers ---------------------------------------------------

    /// Pops `n` value roots — the error path of every root-bracketed
    /// sub-evaluation above needs to unwind exactly as many roots as it
    /// had already pushed before the failure.
    fn pop_value_roots(&mut self, n: usize) {
        for _ in 0..n {
            self.heap.pop_value_root();
        }
    }

    fn alloc_str(&mut self, text: &str) -> Value {
        Value::String(self.heap.alloc_string(text.to_string()))
    }

    fn display_value(&self, v: &Value) -> String {
        to_display_string(self.heap, self.interner, v)
    }

    fn value_to_symbol(&mut self, v: &Value) -> Symbol {
        let text = self.display_value(v);
        self.interner.intern(&text)
    }
}
