use crate::ast::Ident;
use crate::env::Env;
use crate::value::{FunInfo, VTerm};
use std::rc::Rc;

/// Replaces every free occurrence of the identifiers bound in `env` by their
/// values. Every binder passed on the way is α-renamed to a fresh
/// identifier, so the result never captures a variable of the substituted
/// values. Closure values are untagged back to their raw form with their
/// captured context folded into the substitution; they re-acquire closure
/// status when the machine reduces them again.
pub fn subst(env: &Env, v: &Rc<VTerm>) -> Rc<VTerm> {
    match &**v {
        VTerm::Var(x) => match env.lookup(x) {
            Some(value) => value.clone(),
            None => v.clone(),
        },
        VTerm::Universe(_) | VTerm::Const(_) => v.clone(),
        VTerm::App(f, a) => Rc::new(VTerm::App(subst(env, f), subst(env, a))),
        VTerm::Lambda(fi) => Rc::new(VTerm::Lambda(subst_binder(env, fi))),
        VTerm::Prod(fi) => Rc::new(VTerm::Prod(subst_binder(env, fi))),
        VTerm::Unknown(ty) => Rc::new(VTerm::Unknown(subst(env, ty))),
        VTerm::Err(ty) => Rc::new(VTerm::Err(subst(env, ty))),
        VTerm::Cast {
            source,
            target,
            term,
        } => Rc::new(VTerm::Cast {
            source: subst(env, source),
            target: subst(env, target),
            term: subst(env, term),
        }),
        // closures are untagged: their context may still hold terms that
        // are not fully reduced, so it flows into the substitution instead
        // of surviving as a captured environment
        VTerm::VLambda(fi, ctx) => Rc::new(VTerm::Lambda(subst_binder(&env.append(ctx), fi))),
        VTerm::VProd(fi, ctx) => Rc::new(VTerm::Prod(subst_binder(&env.append(ctx), fi))),
        VTerm::VUnknown(ty) => Rc::new(VTerm::VUnknown(subst(env, ty))),
        VTerm::VErr(ty) => Rc::new(VTerm::VErr(subst(env, ty))),
        VTerm::VCast {
            source,
            target,
            term,
        } => Rc::new(VTerm::VCast {
            source: subst(env, source),
            target: subst(env, target),
            term: subst(env, term),
        }),
    }
}

fn subst_binder(env: &Env, fi: &FunInfo) -> FunInfo {
    let fresh = Ident::fresh();
    let dom = subst(env, &fi.dom);
    let renamed = env.add(fi.id.clone(), Rc::new(VTerm::Var(fresh.clone())));
    let body = subst(&renamed, &fi.body);
    FunInfo {
        id: fresh,
        dom,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{alpha_eq, free_vars, Term};
    use crate::value::{of_vterm, to_vterm};

    fn env_of(pairs: &[(&str, Rc<Term>)]) -> Env {
        let mut env = Env::new();
        for (name, t) in pairs {
            env = env.add((*name).into(), to_vterm(t));
        }
        env
    }

    #[test]
    fn replaces_free_occurrences() {
        let env = env_of(&[("x", Term::universe(0))]);
        let out = subst(&env, &to_vterm(&Term::var("x")));
        assert_eq!(*of_vterm(&out), Term::Universe(0));
    }

    #[test]
    fn leaves_unbound_variables_alone() {
        let env = env_of(&[("x", Term::universe(0))]);
        let out = subst(&env, &to_vterm(&Term::var("z")));
        assert_eq!(*of_vterm(&out), Term::Var("z".into()));
    }

    #[test]
    fn binders_shadow_the_substitution() {
        // (fun x : ▢0. x){x ↦ ▢1} keeps its bound occurrence
        let env = env_of(&[("x", Term::universe(1))]);
        let lam = Term::lambda("x", Term::universe(0), Term::var("x"));
        let out = of_vterm(&subst(&env, &to_vterm(&lam)));
        assert!(alpha_eq(&out, &lam), "got {}", out);
    }

    #[test]
    fn never_captures() {
        // (fun y : ▢0. x){x ↦ y} must keep the substituted y free
        let env = env_of(&[("x", Term::var("y"))]);
        let lam = Term::lambda("y", Term::universe(0), Term::var("x"));
        let out = of_vterm(&subst(&env, &to_vterm(&lam)));

        let fv = free_vars(&out);
        assert!(fv.contains(&Ident::named("y")), "y was captured in {}", out);
        if let Term::Lambda { id, .. } = &*out {
            assert_ne!(*id, Ident::named("y"));
        } else {
            panic!("expected a lambda, got {}", out);
        }
    }

    #[test]
    fn alpha_stable_across_runs() {
        let env = env_of(&[("x", Term::universe(0))]);
        let t = Term::lambda(
            "y",
            Term::universe(0),
            Term::app(Term::var("y"), Term::var("x")),
        );
        let a = of_vterm(&subst(&env, &to_vterm(&t)));
        let b = of_vterm(&subst(&env, &to_vterm(&t)));
        // fresh binder names differ, the α-class does not
        assert!(alpha_eq(&a, &b));
    }

    #[test]
    fn untags_closures_and_applies_their_context() {
        // a closure capturing z ↦ ▢1 flushes that binding into its body
        let fi = FunInfo {
            id: "x".into(),
            dom: Rc::new(VTerm::Universe(0)),
            body: to_vterm(&Term::app(Term::var("x"), Term::var("z"))),
        };
        let ctx = Env::new().add("z".into(), to_vterm(&Term::universe(1)));
        let closure: Rc<VTerm> = Rc::new(VTerm::VLambda(fi, ctx));

        let out = of_vterm(&subst(&Env::new(), &closure));
        let expected = Term::lambda(
            "x",
            Term::universe(0),
            Term::app(Term::var("x"), Term::universe(1)),
        );
        assert!(alpha_eq(&out, &expected), "got {}", out);
        assert!(matches!(&*out, Term::Lambda { .. }));
    }

    #[test]
    fn closure_context_shadows_outer_substitution() {
        let fi = FunInfo {
            id: "x".into(),
            dom: Rc::new(VTerm::Universe(0)),
            body: to_vterm(&Term::var("z")),
        };
        let ctx = Env::new().add("z".into(), to_vterm(&Term::universe(2)));
        let closure: Rc<VTerm> = Rc::new(VTerm::VLambda(fi, ctx));

        let outer = env_of(&[("z", Term::universe(0))]);
        let out = of_vterm(&subst(&outer, &closure));
        let expected = Term::lambda("x", Term::universe(0), Term::universe(2));
        assert!(alpha_eq(&out, &expected), "got {}", out);
    }
}
