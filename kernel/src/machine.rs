//! CEK machine for the cast calculus.
//!
//! A state is a control term under focus, the environment it reduces in,
//! and an explicit continuation. Continuations are ordinary data so that a
//! single step can be rendered back into a source term for inspection.

use crate::ast::{Ident, Level, Term};
use crate::env::{Env, Globals};
use crate::subst::subst;
use crate::typing::{
    cast_universe_level, germ, germ_level, head, is_germ, is_germ_for_gte_level, is_value, Head,
};
use crate::value::{of_vterm, to_vterm, FunInfo, VTerm};
use crate::{Variant, DEFAULT_FUEL};
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MachineError {
    /// Control and continuation match no rule.
    #[error("stuck_term")]
    StuckTerm,
    /// A variable with no binding reached the head position. Well-typed
    /// input never does this; elaboration is responsible for closing terms.
    #[error("unbound variable: {0}")]
    UnboundVariable(Ident),
    /// A constant with no global declaration reached the head position.
    #[error("unknown constant: {0}")]
    UnknownConst(Ident),
    /// `Globals::declare` was called twice for the same name.
    #[error("constant already declared: {0}")]
    Redeclared(Ident),
    /// The driver ran out of its step budget on a non-value.
    #[error("reduction exhausted its fuel budget of {fuel} steps")]
    OutOfFuel { fuel: usize },
}

/// Evaluation contexts, one frame per hole position. The frame under
/// construction is the head; `next` is the rest of the context.
#[derive(Debug, Clone, PartialEq)]
pub enum Cont {
    /// Empty context, terminal
    Hole,
    /// `[·] u`, reducing the function
    AppL {
        arg: Rc<VTerm>,
        env: Env,
        next: Box<Cont>,
    },
    /// `(fun fi) [·]`, reducing the argument with the function captured
    AppR {
        fun: FunInfo,
        env: Env,
        next: Box<Cont>,
    },
    /// `fun id : [·]. body`, reducing the domain annotation
    Lambda {
        id: Ident,
        body: Rc<VTerm>,
        env: Env,
        next: Box<Cont>,
    },
    /// `Π id : [·]. body`, reducing the domain annotation
    Prod {
        id: Ident,
        body: Rc<VTerm>,
        env: Env,
        next: Box<Cont>,
    },
    /// `?_[·]`, reducing the type annotation
    Unknown { env: Env, next: Box<Cont> },
    /// `err_[·]`, reducing the type annotation
    Err { env: Env, next: Box<Cont> },
    /// Reducing the target type of a cast
    CastTarget {
        source: Rc<VTerm>,
        term: Rc<VTerm>,
        env: Env,
        next: Box<Cont>,
    },
    /// Reducing the source type of a cast, target already reduced
    CastSource {
        target: Rc<VTerm>,
        term: Rc<VTerm>,
        env: Env,
        next: Box<Cont>,
    },
    /// Reducing the payload of a cast, both types reduced
    CastTerm {
        source: Rc<VTerm>,
        target: Rc<VTerm>,
        env: Env,
        next: Box<Cont>,
    },
}

/// A machine state: control, environment, continuation.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub control: Rc<VTerm>,
    pub env: Env,
    pub cont: Cont,
}

impl State {
    pub fn new(control: Rc<VTerm>, env: Env) -> Self {
        State {
            control,
            env,
            cont: Cont::Hole,
        }
    }

    /// A value in the empty context cannot step any further.
    pub fn is_final(&self) -> bool {
        is_value(&self.control) && matches!(self.cont, Cont::Hole)
    }
}

/// Level `i` of a reduced unknown type `?_▢i`.
fn as_unknown_universe(v: &VTerm) -> Option<Level> {
    if let VTerm::VUnknown(inner) = v {
        if let VTerm::Universe(i) = &**inner {
            return Some(*i);
        }
    }
    None
}

fn is_err_universe(v: &VTerm) -> bool {
    matches!(v, VTerm::VErr(inner) if matches!(&**inner, VTerm::Universe(_)))
}

/// Rebuilds the source term represented by plugging `t` into the context.
pub fn fill_hole(t: Rc<Term>, cont: &Cont) -> Rc<Term> {
    match cont {
        Cont::Hole => t,
        Cont::AppL { arg, next, .. } => fill_hole(Term::app(t, of_vterm(arg)), next),
        Cont::AppR { fun, next, .. } => {
            let lam = Term::lambda(fun.id.clone(), of_vterm(&fun.dom), of_vterm(&fun.body));
            fill_hole(Term::app(lam, t), next)
        }
        Cont::Lambda { id, body, next, .. } => {
            fill_hole(Term::lambda(id.clone(), t, of_vterm(body)), next)
        }
        Cont::Prod { id, body, next, .. } => {
            fill_hole(Term::prod(id.clone(), t, of_vterm(body)), next)
        }
        Cont::Unknown { next, .. } => fill_hole(Term::unknown(t), next),
        Cont::Err { next, .. } => fill_hole(Term::err(t), next),
        Cont::CastTarget {
            source, term, next, ..
        } => fill_hole(Term::cast(of_vterm(source), t, of_vterm(term)), next),
        Cont::CastSource {
            target, term, next, ..
        } => fill_hole(Term::cast(t, of_vterm(target), of_vterm(term)), next),
        Cont::CastTerm {
            source, target, next, ..
        } => fill_hole(Term::cast(of_vterm(source), of_vterm(target), t), next),
    }
}

/// Reduction driver: a GCIC variant, a fuel budget, and the global
/// declarations `Const` resolves through.
#[derive(Debug, Clone)]
pub struct Reducer {
    variant: Variant,
    fuel: usize,
    globals: Globals,
}

impl Default for Reducer {
    fn default() -> Self {
        Reducer::new(Variant::default())
    }
}

impl Reducer {
    pub fn new(variant: Variant) -> Self {
        Reducer {
            variant,
            fuel: DEFAULT_FUEL,
            globals: Globals::new(),
        }
    }

    pub fn with_fuel(mut self, fuel: usize) -> Self {
        self.fuel = fuel;
        self
    }

    pub fn with_globals(mut self, globals: Globals) -> Self {
        self.globals = globals;
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn fuel(&self) -> usize {
        self.fuel
    }

    /// Reduces `t` in the empty environment to a source normal form.
    pub fn reduce(&self, t: &Term) -> Result<Rc<Term>, MachineError> {
        self.reduce_in(&Env::new(), t)
    }

    /// Reduces `t` in `env` to a source normal form, or fails on a stuck
    /// term, an unbound name, or fuel exhaustion.
    pub fn reduce_in(&self, env: &Env, t: &Term) -> Result<Rc<Term>, MachineError> {
        let state = State::new(to_vterm(t), env.clone());
        let done = self.run(state)?;
        Ok(of_vterm(&done.control))
    }

    /// Performs exactly one transition and renders the resulting state back
    /// into a source term by plugging the continuation.
    pub fn step(&self, env: &Env, t: &Term) -> Result<Rc<Term>, MachineError> {
        let state = State::new(to_vterm(t), env.clone());
        let next = self.step_state(state)?;
        Ok(fill_hole(of_vterm(&next.control), &next.cont))
    }

    fn run(&self, mut state: State) -> Result<State, MachineError> {
        for _ in 0..self.fuel {
            if state.is_final() {
                return Ok(state);
            }
            state = self.step_state(state)?;
        }
        if state.is_final() {
            Ok(state)
        } else {
            Err(MachineError::OutOfFuel { fuel: self.fuel })
        }
    }

    /// The single-step transition relation. Deterministic: the first
    /// matching rule fires. A final state steps to itself.
    pub fn step_state(&self, state: State) -> Result<State, MachineError> {
        let State { control, env, cont } = state;

        match &*control {
            // delta
            VTerm::Var(x) => {
                let bound = env.lookup(x).cloned();
                return match bound {
                    Some(value) => Ok(State {
                        control: value,
                        env,
                        cont,
                    }),
                    None => Err(MachineError::UnboundVariable(x.clone())),
                };
            }
            // delta through the global declarations
            VTerm::Const(c) => {
                return match self.globals.get(c) {
                    Some(body) => Ok(State {
                        control: to_vterm(body),
                        env,
                        cont,
                    }),
                    None => Err(MachineError::UnknownConst(c.clone())),
                };
            }
            // the unknown at a product type eta-expands to a lambda
            // returning the unknown at the codomain
            VTerm::VUnknown(inner) => {
                if let VTerm::VProd(fi, ctx) = &**inner {
                    let expanded = VTerm::VLambda(
                        FunInfo {
                            id: fi.id.clone(),
                            dom: fi.dom.clone(),
                            body: Rc::new(VTerm::Unknown(fi.body.clone())),
                        },
                        ctx.clone(),
                    );
                    return Ok(State {
                        control: Rc::new(expanded),
                        env,
                        cont,
                    });
                }
            }
            // same for the error at a product type
            VTerm::VErr(inner) => {
                if let VTerm::VProd(fi, ctx) = &**inner {
                    let expanded = VTerm::VLambda(
                        FunInfo {
                            id: fi.id.clone(),
                            dom: fi.dom.clone(),
                            body: Rc::new(VTerm::Err(fi.body.clone())),
                        },
                        ctx.clone(),
                    );
                    return Ok(State {
                        control: Rc::new(expanded),
                        env,
                        cont,
                    });
                }
            }
            _ => {}
        }

        if is_value(&control) {
            return self.resume(control, env, cont);
        }

        // no redex at the root: descend into the leftmost unreduced
        // position, pushing the surrounding frame
        match &*control {
            VTerm::App(f, a) => Ok(State {
                control: f.clone(),
                env: env.clone(),
                cont: Cont::AppL {
                    arg: a.clone(),
                    env,
                    next: Box::new(cont),
                },
            }),
            VTerm::Lambda(fi) => Ok(State {
                control: fi.dom.clone(),
                env: env.clone(),
                cont: Cont::Lambda {
                    id: fi.id.clone(),
                    body: fi.body.clone(),
                    env,
                    next: Box::new(cont),
                },
            }),
            VTerm::Prod(fi) => Ok(State {
                control: fi.dom.clone(),
                env: env.clone(),
                cont: Cont::Prod {
                    id: fi.id.clone(),
                    body: fi.body.clone(),
                    env,
                    next: Box::new(cont),
                },
            }),
            VTerm::Unknown(ty) => Ok(State {
                control: ty.clone(),
                env: env.clone(),
                cont: Cont::Unknown {
                    env,
                    next: Box::new(cont),
                },
            }),
            VTerm::Err(ty) => Ok(State {
                control: ty.clone(),
                env: env.clone(),
                cont: Cont::Err {
                    env,
                    next: Box::new(cont),
                },
            }),
            // casts reduce target first, then source, then payload
            VTerm::Cast {
                source,
                target,
                term,
            } => Ok(State {
                control: target.clone(),
                env: env.clone(),
                cont: Cont::CastTarget {
                    source: source.clone(),
                    term: term.clone(),
                    env,
                    next: Box::new(cont),
                },
            }),
            _ => Err(MachineError::StuckTerm),
        }
    }

    /// A value met its continuation frame: fire the redex the frame
    /// completes, or plug the value and move to the next frame.
    fn resume(&self, v: Rc<VTerm>, env: Env, cont: Cont) -> Result<State, MachineError> {
        match cont {
            Cont::Hole => Ok(State {
                control: v,
                env,
                cont: Cont::Hole,
            }),
            // beta: jump into the function body under its own environment
            Cont::AppR {
                fun,
                env: fun_env,
                next,
            } => Ok(State {
                control: fun.body.clone(),
                env: fun_env.add(fun.id, v),
                cont: *next,
            }),
            // call by value: function first, then argument
            Cont::AppL { arg, env: _, next } => match &*v {
                VTerm::VLambda(fi, fun_env) => Ok(State {
                    control: arg,
                    env,
                    cont: Cont::AppR {
                        fun: fi.clone(),
                        env: fun_env.clone(),
                        next,
                    },
                }),
                _ => Err(MachineError::StuckTerm),
            },
            Cont::Lambda {
                id,
                body,
                env: _,
                next,
            } => {
                let closure = VTerm::VLambda(FunInfo { id, dom: v, body }, env.clone());
                Ok(State {
                    control: Rc::new(closure),
                    env,
                    cont: *next,
                })
            }
            Cont::Prod {
                id,
                body,
                env: _,
                next,
            } => {
                let closure = VTerm::VProd(FunInfo { id, dom: v, body }, env.clone());
                Ok(State {
                    control: Rc::new(closure),
                    env,
                    cont: *next,
                })
            }
            Cont::Unknown { env: _, next } => Ok(State {
                control: Rc::new(VTerm::VUnknown(v)),
                env,
                cont: *next,
            }),
            Cont::Err { env: _, next } => Ok(State {
                control: Rc::new(VTerm::VErr(v)),
                env,
                cont: *next,
            }),
            Cont::CastTarget {
                source,
                term,
                env: _,
                next,
            } => Ok(State {
                control: source,
                env: env.clone(),
                cont: Cont::CastSource {
                    target: v,
                    term,
                    env,
                    next,
                },
            }),
            Cont::CastSource {
                target,
                term,
                env: _,
                next,
            } => Ok(State {
                control: term,
                env: env.clone(),
                cont: Cont::CastTerm {
                    source: v,
                    target,
                    env,
                    next,
                },
            }),
            Cont::CastTerm {
                source,
                target,
                env: _,
                next,
            } => self.cast_step(v, source, target, env, *next),
        }
    }

    /// All cast redexes: the payload `v`, the reduced `source` and `target`
    /// types, in priority order.
    fn cast_step(
        &self,
        v: Rc<VTerm>,
        source: Rc<VTerm>,
        target: Rc<VTerm>,
        env: Env,
        next: Cont,
    ) -> Result<State, MachineError> {
        // casting out of the unknown type collapses unknown and error
        // payloads directly to the target
        if as_unknown_universe(&source).is_some() {
            match &*v {
                VTerm::VUnknown(inner) if as_unknown_universe(inner).is_some() => {
                    return Ok(State {
                        control: Rc::new(VTerm::VUnknown(target)),
                        env,
                        cont: next,
                    });
                }
                VTerm::VErr(inner) if as_unknown_universe(inner).is_some() => {
                    return Ok(State {
                        control: Rc::new(VTerm::VErr(target)),
                        env,
                        cont: next,
                    });
                }
                _ => {}
            }
        }

        // a function cast between product types wraps argument and result
        // in the dual casts
        if let (VTerm::VLambda(fun, fun_env), VTerm::VProd(src, src_env), VTerm::VProd(tgt, tgt_env)) =
            (&*v, &*source, &*target)
        {
            let wrapped = cast_prod_prod(fun, fun_env, src, src_env, tgt, tgt_env);
            return Ok(State {
                control: Rc::new(wrapped),
                env,
                cont: next,
            });
        }

        // a cast between equal universes is the identity
        if let (VTerm::Universe(i), VTerm::Universe(j)) = (&*source, &*target) {
            if i == j {
                return Ok(State {
                    control: v,
                    env,
                    cont: next,
                });
            }
        }

        // distinct canonical heads never cast into each other
        if let (Some(h_src), Some(h_tgt)) = (head(&source), head(&target)) {
            if h_src != h_tgt {
                return Ok(State {
                    control: Rc::new(VTerm::VErr(target)),
                    env,
                    cont: next,
                });
            }
        }

        // an error in source or target position absorbs the cast
        if is_err_universe(&source) || is_err_universe(&target) {
            return Ok(State {
                control: Rc::new(VTerm::VErr(target)),
                env,
                cont: next,
            });
        }

        // a function type that is not a germ reaches the unknown type in
        // two steps, through the germ of its level
        if let Some(i) = as_unknown_universe(&target) {
            if matches!(&*source, VTerm::VProd(_, _))
                && !is_germ_for_gte_level(self.variant, i, &source)
            {
                let middle = Rc::new(germ(self.variant, i, Head::Prod));
                let through = VTerm::Cast {
                    source: middle.clone(),
                    target: target.clone(),
                    term: Rc::new(VTerm::Cast {
                        source,
                        target: middle,
                        term: v,
                    }),
                };
                return Ok(State {
                    control: Rc::new(through),
                    env,
                    cont: next,
                });
            }
        }

        // a round trip through the unknown type cancels: the stored
        // injection resumes as a direct cast to the new target
        if let Some(j) = as_unknown_universe(&source) {
            if let VTerm::VCast {
                source: inj_source,
                target: inj_target,
                term,
            } = &*v
            {
                if as_unknown_universe(inj_target) == Some(j)
                    && is_germ(self.variant, j, inj_source)
                {
                    let resumed = VTerm::Cast {
                        source: inj_source.clone(),
                        target,
                        term: term.clone(),
                    };
                    return Ok(State {
                        control: Rc::new(resumed),
                        env,
                        cont: next,
                    });
                }
            }
        }

        if let Some(i) = as_unknown_universe(&target) {
            // a universe at or above the target level does not fit
            if let VTerm::Universe(j) = &*source {
                if *j >= i {
                    return Ok(State {
                        control: Rc::new(VTerm::VErr(target)),
                        env,
                        cont: next,
                    });
                }
            }
            // a product germ above the target's germ level does not fit
            if let Some(c) = germ_level(&source) {
                let fits = matches!(cast_universe_level(self.variant, i), Some(ci) if c <= ci);
                if !fits {
                    return Ok(State {
                        control: Rc::new(VTerm::VErr(target)),
                        env,
                        cont: next,
                    });
                }
            }
            // canonical injection: the value sits under its germ
            if is_germ(self.variant, i, &source) {
                return Ok(State {
                    control: Rc::new(VTerm::VCast {
                        source,
                        target,
                        term: v,
                    }),
                    env,
                    cont: next,
                });
            }
        }

        Err(MachineError::StuckTerm)
    }
}

/// Builds the lambda that realizes a cast between two product types:
/// the argument is cast backwards into the function's domain, the result
/// forwards between the refined codomains.
fn cast_prod_prod(
    fun: &FunInfo,
    fun_env: &Env,
    src: &FunInfo,
    src_env: &Env,
    tgt: &FunInfo,
    tgt_env: &Env,
) -> VTerm {
    let fresh = Ident::fresh();
    let var: Rc<VTerm> = Rc::new(VTerm::Var(fresh.clone()));

    let arg_cast = Rc::new(VTerm::Cast {
        source: tgt.dom.clone(),
        target: fun.dom.clone(),
        term: var.clone(),
    });
    let body = subst(&fun_env.add(fun.id.clone(), arg_cast), &fun.body);

    let src_arg = Rc::new(VTerm::Cast {
        source: tgt.dom.clone(),
        target: src.dom.clone(),
        term: var.clone(),
    });
    let src_cod = subst(&src_env.add(src.id.clone(), src_arg), &src.body);
    let tgt_cod = subst(&tgt_env.add(tgt.id.clone(), var), &tgt.body);

    let cast_body = Rc::new(VTerm::Cast {
        source: src_cod,
        target: tgt_cod,
        term: body,
    });
    VTerm::VLambda(
        FunInfo {
            id: fresh,
            dom: tgt.dom.clone(),
            body: cast_body,
        },
        fun_env.clone(),
    )
}

/// Reduces `t` in the empty environment with the default configuration.
pub fn reduce(t: &Term) -> Result<Rc<Term>, MachineError> {
    Reducer::default().reduce(t)
}

/// Reduces `t` in `env` with the default configuration.
pub fn reduce_in(env: &Env, t: &Term) -> Result<Rc<Term>, MachineError> {
    Reducer::default().reduce_in(env, t)
}

/// One transition of `t` in `env` with the default configuration.
pub fn step(env: &Env, t: &Term) -> Result<Rc<Term>, MachineError> {
    Reducer::default().step(env, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::alpha_eq;

    fn run(t: &Rc<Term>) -> Rc<Term> {
        reduce(t).expect("reduction should succeed")
    }

    #[test]
    fn universes_are_terminal() {
        let reducer = Reducer::default();
        let state = State::new(to_vterm(&Term::universe(4)), Env::new());
        assert!(state.is_final());
        let stepped = reducer.step_state(state.clone()).expect("value steps");
        assert_eq!(stepped, state);
    }

    #[test]
    fn lambda_values_are_terminal() {
        let reducer = Reducer::default();
        let fi = FunInfo {
            id: "x".into(),
            dom: Rc::new(VTerm::Universe(0)),
            body: Rc::new(VTerm::Var("x".into())),
        };
        let state = State::new(Rc::new(VTerm::VLambda(fi, Env::new())), Env::new());
        assert!(state.is_final());
        let stepped = reducer.step_state(state.clone()).expect("value steps");
        assert_eq!(stepped, state);
    }

    #[test]
    fn delta_reads_the_environment() {
        let env = Env::new().add("x".into(), to_vterm(&Term::universe(1)));
        let out = reduce_in(&env, &Term::var("x")).expect("bound variable reduces");
        assert_eq!(*out, Term::Universe(1));
    }

    #[test]
    fn delta_fails_on_free_variables() {
        let out = reduce(&Term::var("ghost"));
        assert!(matches!(out, Err(MachineError::UnboundVariable(_))));
    }

    #[test]
    fn const_resolves_through_globals() {
        let mut globals = Globals::new();
        globals
            .declare(
                "id0".into(),
                Term::lambda("x", Term::universe(0), Term::var("x")),
            )
            .expect("declare id0");
        let reducer = Reducer::default().with_globals(globals);

        let out = reducer
            .reduce(&Term::app(Term::constant("id0"), Term::universe(0)))
            .expect("constant application reduces");
        assert_eq!(*out, Term::Universe(0));
    }

    #[test]
    fn const_fails_without_declaration() {
        let out = reduce(&Term::constant("missing"));
        assert!(matches!(out, Err(MachineError::UnknownConst(_))));
    }

    #[test]
    fn beta_is_call_by_value() {
        // (fun x : ▢0. x) ((fun y : ▢0. y) ▢0) needs the argument reduced
        // before the outer body runs
        let inner = Term::app(
            Term::lambda("y", Term::universe(0), Term::var("y")),
            Term::universe(0),
        );
        let outer = Term::app(Term::lambda("x", Term::universe(0), Term::var("x")), inner);
        assert_eq!(*run(&outer), Term::Universe(0));
    }

    #[test]
    fn step_renders_the_descent_into_an_application() {
        // the first transition of (fun x. x) ▢0 focuses the function;
        // plugging the context back reproduces the whole application
        let t = Term::app(
            Term::lambda("x", Term::universe(0), Term::var("x")),
            Term::universe(0),
        );
        let rendered = step(&Env::new(), &t).expect("one step");
        assert!(alpha_eq(&rendered, &t), "got {}", rendered);
    }

    #[test]
    fn step_reports_stuck_terms() {
        // a universe applied to a universe has no rule
        let t = Term::app(Term::universe(0), Term::universe(0));
        let reducer = Reducer::default();
        let mut state = State::new(to_vterm(&t), Env::new());
        let err = loop {
            match reducer.step_state(state) {
                Ok(next) => state = next,
                Err(e) => break e,
            }
        };
        assert_eq!(err, MachineError::StuckTerm);
    }

    #[test]
    fn cast_order_is_target_then_source_then_term() {
        let reducer = Reducer::default();
        let t = Term::cast(Term::universe(0), Term::universe(0), Term::universe(0));
        let state = State::new(to_vterm(&t), Env::new());

        let s1 = reducer.step_state(state).expect("descend");
        assert!(matches!(s1.cont, Cont::CastTarget { .. }));
        let s2 = reducer.step_state(s1).expect("target done");
        assert!(matches!(s2.cont, Cont::CastSource { .. }));
        let s3 = reducer.step_state(s2).expect("source done");
        assert!(matches!(s3.cont, Cont::CastTerm { .. }));
    }

    #[test]
    fn fill_hole_reconstructs_nested_contexts() {
        let inner = Cont::AppL {
            arg: to_vterm(&Term::universe(0)),
            env: Env::new(),
            next: Box::new(Cont::Unknown {
                env: Env::new(),
                next: Box::new(Cont::Hole),
            }),
        };
        let plugged = fill_hole(Term::var("f"), &inner);
        assert_eq!(
            *plugged,
            *Term::unknown(Term::app(Term::var("f"), Term::universe(0)))
        );
    }

    #[test]
    fn unknown_at_product_applies_like_a_function() {
        // ?_(Π x : ▢0. ▢0) applied to ▢0 gives ?_▢0
        let t = Term::app(
            Term::unknown(Term::prod("x", Term::universe(0), Term::universe(0))),
            Term::universe(0),
        );
        assert_eq!(*run(&t), *Term::unknown(Term::universe(0)));
    }

    #[test]
    fn err_at_product_applies_like_a_function() {
        let t = Term::app(
            Term::err(Term::prod("x", Term::universe(0), Term::universe(0))),
            Term::universe(0),
        );
        assert_eq!(*run(&t), *Term::err(Term::universe(0)));
    }

    #[test]
    fn dependent_codomain_sees_the_argument() {
        // ?_(Π x : ▢1. x) applied to ▢0 gives ?_▢0
        let t = Term::app(
            Term::unknown(Term::prod("x", Term::universe(1), Term::var("x"))),
            Term::universe(0),
        );
        assert_eq!(*run(&t), *Term::unknown(Term::universe(0)));
    }
}
