//! Rule construction from an [`AutomatonKind`].

use simwall_core::{AutomatonKind, Ruleset};

use crate::ant::{AntUpdate, LangtonsAnt};
use crate::life::{BriansBrain, GameOfLife, Seeds};
use crate::rule::AutomatonRule;

/// Build the rule for `kind`.
///
/// `ruleset` and `update` only matter for [`AutomatonKind::LangtonsAnt`].
pub fn rule_for(kind: AutomatonKind, ruleset: &Ruleset, update: AntUpdate) -> Box<dyn AutomatonRule> {
    match kind {
        AutomatonKind::GameOfLife => Box::new(GameOfLife),
        AutomatonKind::BriansBrain => Box::new(BriansBrain),
        AutomatonKind::Seeds => Box::new(Seeds),
        AutomatonKind::LangtonsAnt => Box::new(LangtonsAnt::new(ruleset.clone(), update)),
    }
}
