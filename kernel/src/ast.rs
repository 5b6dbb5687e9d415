use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Universe levels
pub type Level = u32;

static FRESH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifiers are nominal: two identifiers are equal iff they were written
/// the same way or drawn from the same call to [`Ident::fresh`]. Fresh
/// identifiers can never collide with named ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ident {
    Named(String),
    Fresh(u64),
}

impl Ident {
    pub fn named(name: impl Into<String>) -> Self {
        Ident::Named(name.into())
    }

    /// Draws a globally unique identifier from the process-wide counter.
    /// The counter is monotone and never reset, so freshness holds across
    /// concurrent reductions as well.
    pub fn fresh() -> Self {
        Ident::Fresh(FRESH_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for Ident {
    /// The `_` sentinel used for binders whose variable is never referenced.
    fn default() -> Self {
        Ident::Named("_".to_string())
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::named(name)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ident::Named(name) => write!(f, "{}", name),
            Ident::Fresh(n) => write!(f, "x{}", n),
        }
    }
}

/// The source terms of the cast calculus.
///
/// `Unknown` and `Err` carry the type they inhabit, never a bare level.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Variable occurrence
    Var(Ident),
    /// Universe at a given level
    Universe(Level),
    /// Application: (f a)
    App(Rc<Term>, Rc<Term>),
    /// Function abstraction with an explicit domain annotation
    Lambda {
        id: Ident,
        dom: Rc<Term>,
        body: Rc<Term>,
    },
    /// Dependent product type
    Prod {
        id: Ident,
        dom: Rc<Term>,
        body: Rc<Term>,
    },
    /// The canonical imprecise inhabitant of its type
    Unknown(Rc<Term>),
    /// The failure inhabitant of its type
    Err(Rc<Term>),
    /// Explicit cast of `term : source` to `target`
    Cast {
        source: Rc<Term>,
        target: Rc<Term>,
        term: Rc<Term>,
    },
    /// Reference to a global declaration
    Const(Ident),
}

// Helper constructors for convenience
impl Term {
    pub fn var(id: impl Into<Ident>) -> Rc<Self> {
        Rc::new(Term::Var(id.into()))
    }

    pub fn universe(level: Level) -> Rc<Self> {
        Rc::new(Term::Universe(level))
    }

    pub fn app(f: Rc<Term>, a: Rc<Term>) -> Rc<Self> {
        Rc::new(Term::App(f, a))
    }

    pub fn lambda(id: impl Into<Ident>, dom: Rc<Term>, body: Rc<Term>) -> Rc<Self> {
        Rc::new(Term::Lambda {
            id: id.into(),
            dom,
            body,
        })
    }

    pub fn prod(id: impl Into<Ident>, dom: Rc<Term>, body: Rc<Term>) -> Rc<Self> {
        Rc::new(Term::Prod {
            id: id.into(),
            dom,
            body,
        })
    }

    pub fn unknown(ty: Rc<Term>) -> Rc<Self> {
        Rc::new(Term::Unknown(ty))
    }

    pub fn err(ty: Rc<Term>) -> Rc<Self> {
        Rc::new(Term::Err(ty))
    }

    pub fn cast(source: Rc<Term>, target: Rc<Term>, term: Rc<Term>) -> Rc<Self> {
        Rc::new(Term::Cast {
            source,
            target,
            term,
        })
    }

    pub fn constant(id: impl Into<Ident>) -> Rc<Self> {
        Rc::new(Term::Const(id.into()))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(id) => write!(f, "{}", id),
            Term::Universe(i) => write!(f, "▢{}", i),
            Term::App(fun, arg) => write!(f, "({} {})", fun, arg),
            Term::Lambda { id, dom, body } => write!(f, "fun {} : {}. {}", id, dom, body),
            Term::Prod { id, dom, body } => write!(f, "Π {} : {}. {}", id, dom, body),
            Term::Unknown(ty) => write!(f, "?_{}", ty),
            Term::Err(ty) => write!(f, "err_{}", ty),
            Term::Cast {
                source,
                target,
                term,
            } => write!(f, "⟨{} ⇐ {}⟩ {}", target, source, term),
            Term::Const(id) => write!(f, "{}", id),
        }
    }
}

/// Canonical forms: terms that are values at the root. Unknowns and errors
/// at a product type are excluded because they still eta-expand, and a cast
/// is canonical only as an injection into the unknown type.
pub fn is_canonical(t: &Term) -> bool {
    match t {
        Term::Universe(_) | Term::Lambda { .. } | Term::Prod { .. } => true,
        Term::Unknown(ty) | Term::Err(ty) => !matches!(&**ty, Term::Prod { .. }),
        Term::Cast { target, .. } => {
            matches!(&**target, Term::Unknown(u) if matches!(&**u, Term::Universe(_)))
        }
        _ => false,
    }
}

/// Neutral terms are stuck on an unresolved variable at the head.
pub fn is_neutral(t: &Term) -> bool {
    match t {
        Term::Var(_) => true,
        Term::App(fun, _) => is_neutral(fun),
        _ => false,
    }
}

/// Free identifiers of a term. `Const` references are globals, not
/// variables, and are not collected.
pub fn free_vars(t: &Term) -> HashSet<Ident> {
    let mut acc = HashSet::new();
    collect_free(t, &mut Vec::new(), &mut acc);
    acc
}

fn collect_free(t: &Term, bound: &mut Vec<Ident>, acc: &mut HashSet<Ident>) {
    match t {
        Term::Var(id) => {
            if !bound.contains(id) {
                acc.insert(id.clone());
            }
        }
        Term::Universe(_) | Term::Const(_) => {}
        Term::App(fun, arg) => {
            collect_free(fun, bound, acc);
            collect_free(arg, bound, acc);
        }
        Term::Lambda { id, dom, body } | Term::Prod { id, dom, body } => {
            collect_free(dom, bound, acc);
            bound.push(id.clone());
            collect_free(body, bound, acc);
            bound.pop();
        }
        Term::Unknown(ty) | Term::Err(ty) => collect_free(ty, bound, acc),
        Term::Cast {
            source,
            target,
            term,
        } => {
            collect_free(source, bound, acc);
            collect_free(target, bound, acc);
            collect_free(term, bound, acc);
        }
    }
}

/// α-equivalence on source terms. Reduction outputs are compared with this,
/// never with raw identifier equality, because fresh binder names depend on
/// the global counter state.
pub fn alpha_eq(a: &Term, b: &Term) -> bool {
    alpha_eq_in(a, b, &mut Vec::new())
}

fn alpha_eq_in(a: &Term, b: &Term, pairs: &mut Vec<(Ident, Ident)>) -> bool {
    match (a, b) {
        (Term::Var(x), Term::Var(y)) => {
            // newest binder pair wins, matching shadowing
            for (bx, by) in pairs.iter().rev() {
                let hit_left = bx == x;
                let hit_right = by == y;
                if hit_left || hit_right {
                    return hit_left && hit_right;
                }
            }
            x == y
        }
        (Term::Universe(i), Term::Universe(j)) => i == j,
        (Term::Const(x), Term::Const(y)) => x == y,
        (Term::App(f1, a1), Term::App(f2, a2)) => {
            alpha_eq_in(f1, f2, pairs) && alpha_eq_in(a1, a2, pairs)
        }
        (
            Term::Lambda {
                id: id1,
                dom: dom1,
                body: body1,
            },
            Term::Lambda {
                id: id2,
                dom: dom2,
                body: body2,
            },
        )
        | (
            Term::Prod {
                id: id1,
                dom: dom1,
                body: body1,
            },
            Term::Prod {
                id: id2,
                dom: dom2,
                body: body2,
            },
        ) => {
            if !alpha_eq_in(dom1, dom2, pairs) {
                return false;
            }
            pairs.push((id1.clone(), id2.clone()));
            let eq = alpha_eq_in(body1, body2, pairs);
            pairs.pop();
            eq
        }
        (Term::Unknown(t1), Term::Unknown(t2)) | (Term::Err(t1), Term::Err(t2)) => {
            alpha_eq_in(t1, t2, pairs)
        }
        (
            Term::Cast {
                source: s1,
                target: t1,
                term: u1,
            },
            Term::Cast {
                source: s2,
                target: t2,
                term: u2,
            },
        ) => {
            alpha_eq_in(s1, s2, pairs) && alpha_eq_in(t1, t2, pairs) && alpha_eq_in(u1, u2, pairs)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_identifiers_are_distinct() {
        let a = Ident::fresh();
        let b = Ident::fresh();
        assert_ne!(a, b);
        assert_ne!(a, Ident::named("x0"));
    }

    #[test]
    fn named_identifiers_compare_structurally() {
        assert_eq!(Ident::named("x"), Ident::named("x"));
        assert_ne!(Ident::named("x"), Ident::named("y"));
        assert_eq!(Ident::default(), Ident::named("_"));
    }

    #[test]
    fn display_matches_surface_syntax() {
        let id = Term::lambda("x", Term::universe(0), Term::var("x"));
        assert_eq!(id.to_string(), "fun x : ▢0. x");

        let pi = Term::prod("x", Term::universe(0), Term::var("x"));
        assert_eq!(pi.to_string(), "Π x : ▢0. x");

        let cast = Term::cast(
            Term::universe(1),
            Term::unknown(Term::universe(0)),
            Term::err(Term::universe(0)),
        );
        assert_eq!(cast.to_string(), "⟨?_▢0 ⇐ ▢1⟩ err_▢0");

        let app = Term::app(Term::var("f"), Term::var("x"));
        assert_eq!(app.to_string(), "(f x)");
    }

    #[test]
    fn alpha_eq_ignores_binder_names() {
        let a = Term::lambda("x", Term::universe(0), Term::var("x"));
        let b = Term::lambda("y", Term::universe(0), Term::var("y"));
        assert!(alpha_eq(&a, &b));
    }

    #[test]
    fn alpha_eq_respects_shadowing() {
        // fun x. fun x. x  vs  fun x. fun y. x : the first body refers to the
        // inner binder, the second to the outer one.
        let inner_ref = Term::lambda(
            "x",
            Term::universe(0),
            Term::lambda("x", Term::universe(0), Term::var("x")),
        );
        let outer_ref = Term::lambda(
            "x",
            Term::universe(0),
            Term::lambda("y", Term::universe(0), Term::var("x")),
        );
        assert!(!alpha_eq(&inner_ref, &outer_ref));
    }

    #[test]
    fn alpha_eq_distinguishes_free_variables() {
        assert!(!alpha_eq(&Term::Var("x".into()), &Term::Var("y".into())));
        assert!(alpha_eq(&Term::Var("x".into()), &Term::Var("x".into())));
    }

    #[test]
    fn free_vars_skips_bound_occurrences() {
        let t = Term::lambda(
            "x",
            Term::universe(0),
            Term::app(Term::var("x"), Term::var("y")),
        );
        let fv = free_vars(&t);
        assert!(fv.contains(&Ident::named("y")));
        assert!(!fv.contains(&Ident::named("x")));
    }

    #[test]
    fn canonical_forms() {
        assert!(is_canonical(&Term::Universe(3)));
        assert!(is_canonical(&Term::Unknown(Term::universe(0))));
        // unknowns at a product type still eta-expand
        let unk_prod = Term::Unknown(Term::prod("x", Term::universe(0), Term::universe(0)));
        assert!(!is_canonical(&unk_prod));
        assert!(!is_canonical(&Term::Var("x".into())));
    }

    #[test]
    fn neutral_spines() {
        let spine = Term::app(Term::app(Term::var("f"), Term::var("a")), Term::var("b"));
        assert!(is_neutral(&spine));
        let headed = Term::app(
            Term::lambda("x", Term::universe(0), Term::var("x")),
            Term::var("a"),
        );
        assert!(!is_neutral(&headed));
    }
}
