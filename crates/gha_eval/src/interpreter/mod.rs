//! Tree-walking interpreter.
//!
//! `exec` runs a program's statements in order on the interpreter's thread.
//! The thread's run status is checked before every statement and after every
//! call; once a native function has requested cancellation the current
//! statement unwinds and no further statement runs.

mod builder;

use gha_stack::ensure_sufficient_stack;
use gha_syntax::{BinaryOp, CallArg, Expr, ExprKind, Program, Stmt, StmtKind};
use gha_value::errors::{
    cancelled, immutable_attr, index_out_of_bounds, key_not_found, not_callable, type_mismatch,
    undefined_attr, undefined_name,
};
use gha_value::{Args, DictKey, EvalError, EvalResult, Thread, Value};
use num_traits::ToPrimitive;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

pub use builder::InterpreterBuilder;

use crate::environment::Environment;
use crate::methods;
use crate::operators::{evaluate_binary, evaluate_unary};

/// How a run ended when it did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Every statement ran.
    Completed,
    /// A native function cancelled the run.
    Cancelled { reason: String },
}

pub struct Interpreter {
    env: Environment,
    thread: Thread,
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    /// A global assigned by the script.
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.env.globals().get(name)
    }

    pub fn globals(&self) -> &FxHashMap<String, Value> {
        self.env.globals()
    }

    /// Run `program`.
    ///
    /// Ordinary failures come back as `Err`; cancellation is not an error and
    /// comes back as `Ok(ExecOutcome::Cancelled)`.
    #[tracing::instrument(level = "debug", skip_all, fields(thread = %self.thread.name()))]
    pub fn exec(&mut self, program: &Program) -> Result<ExecOutcome, EvalError> {
        for stmt in &program.statements {
            if let Some(reason) = self.thread.cancellation() {
                debug!(%reason, "run cancelled");
                return Ok(ExecOutcome::Cancelled { reason });
            }
            if let Err(err) = self.exec_stmt(stmt) {
                if let Some(reason) = err.cancellation() {
                    debug!(%reason, "run cancelled");
                    return Ok(ExecOutcome::Cancelled {
                        reason: reason.to_string(),
                    });
                }
                debug!(error = %err, "run failed");
                return Err(err);
            }
        }
        if let Some(reason) = self.thread.cancellation() {
            return Ok(ExecOutcome::Cancelled { reason });
        }
        self.thread.complete();
        debug!(statements = program.statements.len(), "run completed");
        Ok(ExecOutcome::Completed)
    }

    /// Call a value with already-evaluated arguments, as a script call would.
    pub fn call(&self, callee: &Value, args: Args) -> EvalResult {
        let Value::Builtin(builtin) = callee else {
            return Err(not_callable(callee.type_name()));
        };
        trace!(function = builtin.name(), "call");
        let result = builtin.call(&self.thread, args);
        if let Some(reason) = self.thread.cancellation() {
            return Err(cancelled(reason));
        }
        result
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), EvalError> {
        let result = match &stmt.kind {
            StmtKind::Expr(expr) => self.eval(expr).map(drop),
            StmtKind::Assign { target, value } => self
                .eval(value)
                .and_then(|value| self.assign(target, value)),
            StmtKind::Pass => Ok(()),
        };
        result.map_err(|err| err.or_span(stmt.span))
    }

    fn assign(&mut self, target: &Expr, value: Value) -> Result<(), EvalError> {
        let result = match &target.kind {
            ExprKind::Name(name) => {
                self.env.assign(name, value);
                Ok(())
            }
            ExprKind::Index { object, index } => {
                let container = self.eval(object)?;
                let index = self.eval(index)?;
                match &container {
                    Value::List(list) => {
                        let slot = resolve_index(&index, list.len())?;
                        list.set(slot, value)
                    }
                    Value::Dict(dict) => dict.insert(DictKey::from_value(&index)?, value),
                    other => Err(type_mismatch("list or dict", other.type_name())),
                }
            }
            ExprKind::Attr { object, name } => {
                let object = self.eval(object)?;
                Err(immutable_attr(object.type_name(), name))
            }
            _ => Err(EvalError::new("invalid assignment target")),
        };
        result.map_err(|err| err.or_span(target.span))
    }

    fn eval(&self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr)).map_err(|err| err.or_span(expr.span))
    }

    fn eval_inner(&self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::None => Ok(Value::None),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Int(n) => Ok(Value::big_int(n.clone())),
            ExprKind::Float(f) => Ok(Value::float(*f)),
            ExprKind::Str(s) => Ok(Value::string(s.as_str())),
            ExprKind::Name(name) => self
                .env
                .lookup(name)
                .cloned()
                .ok_or_else(|| undefined_name(name)),
            ExprKind::List(items) => {
                let items = items
                    .iter()
                    .map(|item| self.eval(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(items))
            }
            ExprKind::Dict(entries) => {
                let mut pairs = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = DictKey::from_value(&self.eval(key)?)?;
                    pairs.push((key, self.eval(value)?));
                }
                Ok(Value::dict(pairs))
            }
            ExprKind::Attr { object, name } => {
                let object = self.eval(object)?;
                attribute(&object, name)
            }
            ExprKind::Index { object, index } => {
                let object = self.eval(object)?;
                let index = self.eval(index)?;
                subscript(&object, &index)
            }
            ExprKind::Call { callee, args } => {
                let callee = self.eval(callee)?;
                let args = self.eval_args(args)?;
                self.call(&callee, args)
            }
            ExprKind::Unary { op, operand } => evaluate_unary(*op, &self.eval(operand)?),
            ExprKind::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => {
                let left = self.eval(left)?;
                if left.truth() {
                    self.eval(right)
                } else {
                    Ok(left)
                }
            }
            ExprKind::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => {
                let left = self.eval(left)?;
                if left.truth() {
                    Ok(left)
                } else {
                    self.eval(right)
                }
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                evaluate_binary(*op, &left, &right)
            }
        }
    }

    fn eval_args(&self, args: &[CallArg]) -> Result<Args, EvalError> {
        let mut out = Args::default();
        for arg in args {
            match arg {
                CallArg::Positional(expr) => out.positional.push(self.eval(expr)?),
                CallArg::Named { name, value, .. } => {
                    out.named.push((name.clone(), self.eval(value)?));
                }
            }
        }
        Ok(out)
    }
}

/// `object.name`: struct fields, module members, and bound built-in methods.
fn attribute(object: &Value, name: &str) -> EvalResult {
    match object {
        Value::Struct(record) => record
            .field(name)
            .cloned()
            .ok_or_else(|| undefined_attr(record.name(), name)),
        Value::Module(module) => module
            .member(name)
            .cloned()
            .ok_or_else(|| undefined_attr(&format!("module {}", module.name()), name)),
        receiver if methods::has_method(receiver, name) => {
            let bound = receiver.clone();
            let method = name.to_string();
            Ok(Value::builtin(
                format!("{}.{name}", receiver.type_name()),
                move |_, args| methods::call_method(&bound, &method, args),
            ))
        }
        other => Err(undefined_attr(other.type_name(), name)),
    }
}

/// `object[index]`.
fn subscript(object: &Value, index: &Value) -> EvalResult {
    match object {
        Value::List(list) => {
            let slot = resolve_index(index, list.len())?;
            list.get(slot)
                .ok_or_else(|| index_out_of_bounds(slot, list.len()))
        }
        Value::Dict(dict) => {
            let key = DictKey::from_value(index)?;
            dict.get(&key).ok_or_else(|| key_not_found(index))
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let slot = resolve_index(index, chars.len())?;
            Ok(Value::string(chars[slot].to_string()))
        }
        other => Err(type_mismatch("list, dict or string", other.type_name())),
    }
}

/// Resolve a possibly negative index against `len`.
fn resolve_index(index: &Value, len: usize) -> Result<usize, EvalError> {
    let Value::Int(n) = index else {
        return Err(type_mismatch("int", index.type_name()));
    };
    let signed_len = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = n
        .to_i64()
        .map(|i| if i < 0 { i + signed_len } else { i })
        .filter(|i| (0..signed_len).contains(i))
        .and_then(|i| usize::try_from(i).ok());
    resolved.ok_or_else(|| index_out_of_bounds(n, len))
}
