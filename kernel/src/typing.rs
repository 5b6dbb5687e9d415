use crate::ast::{Ident, Level};
use crate::value::{FunInfo, VTerm};
use crate::Variant;
use std::rc::Rc;

/// Canonical type heads. Universes at different levels count as different
/// heads, so a universe-to-universe cast across levels is a head mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Head {
    Prod,
    Universe(Level),
}

/// Head constructor of a reduced type, if it has one.
pub fn head(v: &VTerm) -> Option<Head> {
    match v {
        VTerm::VProd(_, _) => Some(Head::Prod),
        VTerm::Universe(i) => Some(Head::Universe(*i)),
        _ => None,
    }
}

/// Universe level of `Π x : A. B` with `A` in universe `i` and `B` in
/// universe `j`.
pub fn product_universe_level(variant: Variant, i: Level, j: Level) -> Level {
    match variant {
        Variant::G | Variant::N => i.max(j),
        Variant::S => i.max(j) + 1,
    }
}

/// Level of the unknowns inside the product germ of `?_▢i`. `None` means no
/// product germ exists at that level, so functions cannot be injected there.
pub fn cast_universe_level(variant: Variant, i: Level) -> Option<Level> {
    match variant {
        Variant::G => Some(i),
        Variant::N | Variant::S => i.checked_sub(1),
    }
}

/// The least precise type with the given head at level `i`. Heads that do
/// not fit below `i` degenerate to the error type, which the machine then
/// propagates through the ordinary error rules.
pub fn germ(variant: Variant, i: Level, h: Head) -> VTerm {
    match h {
        Head::Prod => match cast_universe_level(variant, i) {
            Some(c) => {
                let unknown = || Rc::new(VTerm::Unknown(Rc::new(VTerm::Universe(c))));
                VTerm::Prod(FunInfo {
                    id: Ident::default(),
                    dom: unknown(),
                    body: unknown(),
                })
            }
            None => VTerm::Err(Rc::new(VTerm::Universe(i))),
        },
        Head::Universe(k) => {
            if k < i {
                VTerm::Universe(k)
            } else {
                VTerm::Err(Rc::new(VTerm::Universe(i)))
            }
        }
    }
}

/// Level `c` of an unknown type annotation `?_▢c`, reduced or raw.
fn unknown_level(v: &VTerm) -> Option<Level> {
    match v {
        VTerm::Unknown(u) | VTerm::VUnknown(u) => match &**u {
            VTerm::Universe(c) => Some(*c),
            _ => None,
        },
        _ => None,
    }
}

/// Level `c` of a product of germ shape `Π _ : ?_▢c. ?_▢c`, if `v` is one.
pub fn germ_level(v: &VTerm) -> Option<Level> {
    let fi = match v {
        VTerm::Prod(fi) | VTerm::VProd(fi, _) => fi,
        _ => return None,
    };
    let dom = unknown_level(&fi.dom)?;
    let body = unknown_level(&fi.body)?;
    if dom == body {
        Some(dom)
    } else {
        None
    }
}

/// Is `v` exactly the germ of `?_▢i` for its own head?
pub fn is_germ(variant: Variant, i: Level, v: &VTerm) -> bool {
    match v {
        VTerm::Universe(k) => *k < i,
        _ => match germ_level(v) {
            Some(c) => cast_universe_level(variant, i) == Some(c),
            None => false,
        },
    }
}

/// Is `v` the product germ of `?_▢j` for some `j ≥ i`? Used to decide
/// whether a function cast into `?_▢i` decomposes through the germ or is a
/// size error.
pub fn is_germ_for_gte_level(variant: Variant, i: Level, v: &VTerm) -> bool {
    match germ_level(v) {
        None => false,
        Some(c) => match cast_universe_level(variant, i) {
            Some(ci) => c >= ci,
            // with no germ at level i, every germ-shaped product sits at
            // some admissible higher level
            None => true,
        },
    }
}

/// Reduced types: products and universes.
pub fn is_type(v: &VTerm) -> bool {
    matches!(v, VTerm::VProd(_, _) | VTerm::Universe(_))
}

/// Machine values. Unknowns and errors at a product type are excluded:
/// they still eta-expand into lambda values.
pub fn is_value(v: &VTerm) -> bool {
    match v {
        VTerm::Universe(_) | VTerm::VLambda(_, _) | VTerm::VProd(_, _) | VTerm::VCast { .. } => {
            true
        }
        VTerm::VUnknown(inner) | VTerm::VErr(inner) => !matches!(&**inner, VTerm::VProd(_, _)),
        _ => false,
    }
}
