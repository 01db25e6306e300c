//! Call arguments and per-function parameter contracts.
//!
//! Every native function declares a `Signature`: an ordered list of
//! parameters, each with a name, an expected kind and a required flag.
//! `Signature::unpack` checks a call's raw arguments eagerly, before the
//! function body runs, in a fixed order:
//!
//! 1. too many positional arguments
//! 2. unknown keyword
//! 3. a parameter given twice
//! 4. value kind
//! 5. missing required parameter
//!
//! The first violation found is reported.

use smallvec::SmallVec;

use crate::errors::{argument_contract, ContractViolation, EvalError};
use crate::value::Value;

/// Raw arguments from a call site, in source order.
#[derive(Clone, Debug, Default)]
pub struct Args {
    pub positional: SmallVec<[Value; 4]>,
    pub named: Vec<(String, Value)>,
}

impl Args {
    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Args {
            positional: values.into_iter().collect(),
            named: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, value: Value) -> Self {
        self.named.push((name.into(), value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Value kind a parameter accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Str,
    Int,
    Bool,
    Any,
}

impl ParamKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            ParamKind::Str => matches!(value, Value::Str(_)),
            ParamKind::Int => matches!(value, Value::Int(_)),
            ParamKind::Bool => matches!(value, Value::Bool(_)),
            ParamKind::Any => true,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            ParamKind::Str => "string",
            ParamKind::Int => "int",
            ParamKind::Bool => "bool",
            ParamKind::Any => "value",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl Param {
    pub const fn required(name: &'static str, kind: ParamKind) -> Self {
        Param {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Param {
            name,
            kind,
            required: false,
        }
    }
}

/// Ordered parameter list of a native function.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    params: &'static [Param],
}

impl Signature {
    pub const EMPTY: Signature = Signature { params: &[] };

    pub const fn new(params: &'static [Param]) -> Self {
        Signature { params }
    }

    pub fn params(&self) -> &'static [Param] {
        self.params
    }

    /// Check `args` against this signature. `function` names the callee in
    /// error messages.
    pub fn unpack(&self, function: &str, args: Args) -> Result<Unpacked, EvalError> {
        let params = self.params;

        if args.positional.len() > params.len() {
            return Err(argument_contract(
                function,
                "",
                ContractViolation::TooManyPositional {
                    max: params.len(),
                    got: args.positional.len(),
                },
            ));
        }

        let mut slots: SmallVec<[Option<Value>; 4]> = SmallVec::new();
        slots.resize(params.len(), None);
        for (slot, value) in slots.iter_mut().zip(args.positional) {
            *slot = Some(value);
        }

        for (name, value) in args.named {
            let Some(index) = params.iter().position(|p| p.name == name) else {
                return Err(argument_contract(
                    function,
                    &name,
                    ContractViolation::UnknownKeyword,
                ));
            };
            if slots[index].is_some() {
                return Err(argument_contract(
                    function,
                    &name,
                    ContractViolation::Duplicate,
                ));
            }
            slots[index] = Some(value);
        }

        for (param, slot) in params.iter().zip(&slots) {
            if let Some(value) = slot {
                if !param.kind.accepts(value) {
                    return Err(argument_contract(
                        function,
                        param.name,
                        ContractViolation::WrongKind {
                            expected: param.kind.describe(),
                            got: value.type_name().to_string(),
                        },
                    ));
                }
            }
        }

        if let Some(param) = params
            .iter()
            .zip(&slots)
            .find_map(|(param, slot)| (param.required && slot.is_none()).then_some(param))
        {
            return Err(argument_contract(
                function,
                param.name,
                ContractViolation::Missing,
            ));
        }

        Ok(Unpacked { slots })
    }
}

/// Arguments that passed a signature check, indexed by parameter position.
#[derive(Debug)]
pub struct Unpacked {
    slots: SmallVec<[Option<Value>; 4]>,
}

impl Unpacked {
    /// The value at `index`, or `None` for an absent optional parameter.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// The string at `index`. Absent optional parameters read as `""`.
    pub fn str(&self, index: usize) -> &str {
        self.get(index).and_then(Value::as_str).unwrap_or("")
    }

    /// Take ownership of the value at `index`.
    pub fn take(&mut self, index: usize) -> Option<Value> {
        self.slots.get_mut(index).and_then(Option::take)
    }
}
