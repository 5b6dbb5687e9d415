use crate::ast::{Ident, Level, Term};
use crate::env::Env;
use std::rc::Rc;

/// Binder payload shared by lambdas and products: the bound identifier, the
/// (possibly already reduced) domain annotation, and the raw body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunInfo {
    pub id: Ident,
    pub dom: Rc<VTerm>,
    pub body: Rc<VTerm>,
}

/// Machine terms: the source grammar plus closure-carrying value forms.
///
/// The raw constructors survive inside the machine until their redex fires
/// or they self-tag. `VLambda`/`VProd` capture the environment they were
/// reduced in; their bodies stay raw and are only entered on application
/// or through substitution.
#[derive(Debug, Clone, PartialEq)]
pub enum VTerm {
    Var(Ident),
    Universe(Level),
    App(Rc<VTerm>, Rc<VTerm>),
    Lambda(FunInfo),
    Prod(FunInfo),
    Unknown(Rc<VTerm>),
    Err(Rc<VTerm>),
    Cast {
        source: Rc<VTerm>,
        target: Rc<VTerm>,
        term: Rc<VTerm>,
    },
    Const(Ident),

    /// Lambda value closing over its environment
    VLambda(FunInfo, Env),
    /// Product value closing over its environment
    VProd(FunInfo, Env),
    /// Unknown whose type annotation is reduced
    VUnknown(Rc<VTerm>),
    /// Error whose type annotation is reduced
    VErr(Rc<VTerm>),
    /// Canonical injection of a value into the unknown type
    VCast {
        source: Rc<VTerm>,
        target: Rc<VTerm>,
        term: Rc<VTerm>,
    },
}

/// Injects a source term into the machine grammar. No tagging happens here;
/// the machine discovers values as it reduces.
pub fn to_vterm(t: &Term) -> Rc<VTerm> {
    Rc::new(match t {
        Term::Var(id) => VTerm::Var(id.clone()),
        Term::Universe(i) => VTerm::Universe(*i),
        Term::App(f, a) => VTerm::App(to_vterm(f), to_vterm(a)),
        Term::Lambda { id, dom, body } => VTerm::Lambda(FunInfo {
            id: id.clone(),
            dom: to_vterm(dom),
            body: to_vterm(body),
        }),
        Term::Prod { id, dom, body } => VTerm::Prod(FunInfo {
            id: id.clone(),
            dom: to_vterm(dom),
            body: to_vterm(body),
        }),
        Term::Unknown(ty) => VTerm::Unknown(to_vterm(ty)),
        Term::Err(ty) => VTerm::Err(to_vterm(ty)),
        Term::Cast {
            source,
            target,
            term,
        } => VTerm::Cast {
            source: to_vterm(source),
            target: to_vterm(target),
            term: to_vterm(term),
        },
        Term::Const(id) => VTerm::Const(id.clone()),
    })
}

/// Reads a machine term back into the source grammar, stripping every tag.
/// Captured environments are discarded: closures come back as their open
/// lambda form.
pub fn of_vterm(v: &VTerm) -> Rc<Term> {
    match v {
        VTerm::Var(id) => Term::var(id.clone()),
        VTerm::Universe(i) => Term::universe(*i),
        VTerm::App(f, a) => Term::app(of_vterm(f), of_vterm(a)),
        VTerm::Lambda(fi) | VTerm::VLambda(fi, _) => {
            Term::lambda(fi.id.clone(), of_vterm(&fi.dom), of_vterm(&fi.body))
        }
        VTerm::Prod(fi) | VTerm::VProd(fi, _) => {
            Term::prod(fi.id.clone(), of_vterm(&fi.dom), of_vterm(&fi.body))
        }
        VTerm::Unknown(ty) | VTerm::VUnknown(ty) => Term::unknown(of_vterm(ty)),
        VTerm::Err(ty) | VTerm::VErr(ty) => Term::err(of_vterm(ty)),
        VTerm::Cast {
            source,
            target,
            term,
        }
        | VTerm::VCast {
            source,
            target,
            term,
        } => Term::cast(of_vterm(source), of_vterm(target), of_vterm(term)),
        VTerm::Const(id) => Term::constant(id.clone()),
    }
}
