use crate::ast::{Ident, Term};
use crate::machine::MachineError;
use crate::value::VTerm;
use std::collections::HashMap;
use std::rc::Rc;

/// Machine environment: a pure association list from identifiers to machine
/// terms. Extension shadows older bindings; lookup compares identifiers with
/// their structural equality, never by pointer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
    bindings: Vec<(Ident, Rc<VTerm>)>,
}

impl Env {
    pub fn new() -> Self {
        Env::default()
    }

    /// Returns the environment extended with `id ↦ value`. The newest
    /// binding wins on lookup.
    pub fn add(&self, id: Ident, value: Rc<VTerm>) -> Env {
        let mut bindings = self.bindings.clone();
        bindings.push((id, value));
        Env { bindings }
    }

    pub fn lookup(&self, id: &Ident) -> Option<&Rc<VTerm>> {
        self.bindings
            .iter()
            .rev()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v)
    }

    /// Returns the environment without the newest binding for `id`. Older
    /// shadowed bindings for the same identifier become visible again.
    pub fn remove(&self, id: &Ident) -> Env {
        let mut bindings = self.bindings.clone();
        if let Some(pos) = bindings.iter().rposition(|(k, _)| k == id) {
            bindings.remove(pos);
        }
        Env { bindings }
    }

    /// Lays `inner` over `self`: bindings of `inner` shadow bindings of
    /// `self`. Substitution uses this to put a closure context in front of
    /// an outer substitution.
    pub fn append(&self, inner: &Env) -> Env {
        let mut bindings = self.bindings.clone();
        bindings.extend(inner.bindings.iter().cloned());
        Env { bindings }
    }

    pub fn bindings(&self) -> &[(Ident, Rc<VTerm>)] {
        &self.bindings
    }

    pub fn from_bindings(bindings: Vec<(Ident, Rc<VTerm>)>) -> Env {
        Env { bindings }
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

/// Global declarations backing `Const` resolution. Initialized once by the
/// surrounding layers; the machine only reads it during a reduction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Globals {
    decls: HashMap<Ident, Rc<Term>>,
}

impl Globals {
    pub fn new() -> Self {
        Globals::default()
    }

    pub fn declare(&mut self, id: Ident, body: Rc<Term>) -> Result<(), MachineError> {
        if self.decls.contains_key(&id) {
            return Err(MachineError::Redeclared(id));
        }
        self.decls.insert(id, body);
        Ok(())
    }

    pub fn get(&self, id: &Ident) -> Option<&Rc<Term>> {
        self.decls.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
