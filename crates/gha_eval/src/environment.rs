//! Name resolution for a script run.
//!
//! Three layers, searched innermost first: the script's own globals, names
//! predeclared by the embedder (modules such as `githubactions`), and the
//! universal builtins. Scripts have no functions, so there are no local
//! scopes.

use rustc_hash::FxHashMap;

use gha_value::Value;

use crate::universe::universe;

#[derive(Clone, Debug)]
pub struct Environment {
    globals: FxHashMap<String, Value>,
    predeclared: FxHashMap<String, Value>,
    universe: FxHashMap<String, Value>,
}

impl Environment {
    pub fn new(predeclared: FxHashMap<String, Value>) -> Self {
        Environment {
            globals: FxHashMap::default(),
            predeclared,
            universe: universe(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.globals
            .get(name)
            .or_else(|| self.predeclared.get(name))
            .or_else(|| self.universe.get(name))
    }

    /// Bind a global. Predeclared and universal names may be shadowed.
    pub fn assign(&mut self, name: &str, value: Value) {
        self.globals.insert(name.to_string(), value);
    }

    /// Globals assigned by the script so far.
    pub fn globals(&self) -> &FxHashMap<String, Value> {
        &self.globals
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(FxHashMap::default())
    }
}
