//! Transition rules for the four SimWall automata.
//!
//! Each automaton implements [`AutomatonRule`]. The life-like rules
//! ([`GameOfLife`], [`BriansBrain`], [`Seeds`]) count the 8-cell Moore
//! neighbourhood with hard edges. [`LangtonsAnt`] moves agents over a
//! toroidal grid. [`rule_for`] picks the rule for an
//! [`AutomatonKind`](simwall_core::AutomatonKind).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ant;
pub mod factory;
pub mod life;
pub mod neighbourhood;
pub mod rule;

pub use ant::{AntUpdate, LangtonsAnt};
pub use factory::rule_for;
pub use life::{BriansBrain, GameOfLife, Seeds};
pub use neighbourhood::live_neighbours;
pub use rule::AutomatonRule;
