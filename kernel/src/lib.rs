pub mod ast;
pub mod env;
pub mod machine;
pub mod subst;
pub mod typing;
pub mod value;

pub use ast::{alpha_eq, free_vars, is_canonical, is_neutral, Ident, Level, Term};
pub use env::{Env, Globals};
pub use machine::{reduce, reduce_in, step, Cont, MachineError, Reducer, State};
pub use value::{of_vterm, to_vterm, VTerm};

/// GCIC variant. It fixes the universe level of products and of the germ
/// that mediates casts into the unknown type.
///
/// - `G` keeps the usual product levels and a germ at the same level, which
///   gives the most permissive system.
/// - `N` keeps the usual product levels but pushes the germ one level down,
///   which makes reduction normalizing.
/// - `S` shifts product levels up by one and pushes the germ down, trading
///   universe sizes for both properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    G,
    N,
    S,
}

/// Step budget used by the plain entry points.
pub const DEFAULT_FUEL: usize = 10_000;
