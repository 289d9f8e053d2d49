//! Langton's Ant with arbitrary turn rulesets and any number of ants.

use serde::{Deserialize, Serialize};
use simwall_core::{AgentSet, AutomatonKind, EdgeBehavior, Grid, RuleError, Ruleset};

use crate::rule::AutomatonRule;

/// How ants sharing a tick see each other's writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntUpdate {
    /// Ants move one after another on the same grid, so a later ant sees
    /// the cells earlier ants already flipped this tick.
    #[default]
    Sequential,
    /// Every ant reads the grid as it was before the tick. Cell increments
    /// are applied afterwards, so the result does not depend on ant order.
    Snapshot,
}

/// Langton's Ant.
///
/// For each ant: read the cell under it, turn by `ruleset.turn_for(cell)`,
/// advance the cell to its next value, then step forward one cell with
/// toroidal wrap-around.
#[derive(Clone, Debug)]
pub struct LangtonsAnt {
    ruleset: Ruleset,
    update: AntUpdate,
}

impl LangtonsAnt {
    /// A rule driven by `ruleset`.
    pub fn new(ruleset: Ruleset, update: AntUpdate) -> Self {
        Self { ruleset, update }
    }

    /// The turn ruleset.
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// The multi-ant update mode.
    pub fn update(&self) -> AntUpdate {
        self.update
    }
}

impl AutomatonRule for LangtonsAnt {
    fn name(&self) -> &str {
        "langtons_ant"
    }

    fn kind(&self) -> AutomatonKind {
        AutomatonKind::LangtonsAnt
    }

    fn state_count(&self) -> u8 {
        self.ruleset.state_count()
    }

    fn step(&self, grid: &Grid, agents: &mut AgentSet) -> Result<Grid, RuleError> {
        let dims = grid.dims();
        agents.check_bounds(dims)?;

        let mut next = grid.clone();
        for agent in agents.iter_mut() {
            // check_bounds above guarantees the index exists.
            let Some(i) = dims.index(agent.x, agent.y) else {
                continue;
            };
            let seen = match self.update {
                AntUpdate::Sequential => next.cells()[i],
                AntUpdate::Snapshot => grid.cells()[i],
            };
            agent.heading = agent.heading.turn(self.ruleset.turn_for(seen));
            let cell = &mut next.cells_mut()[i];
            *cell = self.ruleset.next_value(*cell);

            let (dx, dy) = agent.heading.offset();
            // Wrap never yields None.
            if let (Some(x), Some(y)) = (
                EdgeBehavior::Wrap.resolve(i64::from(agent.x) + dx, dims.width()),
                EdgeBehavior::Wrap.resolve(i64::from(agent.y) + dy, dims.height()),
            ) {
                agent.x = x;
                agent.y = y;
            }
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use simwall_core::{Agent, Dims, Heading, Rgba};

    fn ant(x: u32, y: u32, heading: Heading) -> Agent {
        Agent {
            x,
            y,
            heading,
            color: Rgba::RED,
        }
    }

    fn rl() -> LangtonsAnt {
        LangtonsAnt::new(Ruleset::default(), AntUpdate::Sequential)
    }

    // ── Single ant ──────────────────────────────────────────────

    #[test]
    fn first_four_steps_trace_a_square() {
        let dims = Dims::new(11, 11).unwrap();
        let mut g = Grid::empty(dims);
        let mut agents = AgentSet::from(vec![Agent::centered(dims)]);
        let mut positions = Vec::new();
        for _ in 0..4 {
            g = rl().step(&g, &mut agents).unwrap();
            let a = agents.as_slice()[0];
            positions.push((a.x, a.y, a.heading));
        }
        assert_eq!(
            positions,
            [
                (6, 5, Heading::Right),
                (6, 6, Heading::Down),
                (5, 6, Heading::Left),
                (5, 5, Heading::Up),
            ]
        );
        assert_eq!(g.count(1), 4);

        // Back on a flipped cell: turn left and flip it back.
        g = rl().step(&g, &mut agents).unwrap();
        let a = agents.as_slice()[0];
        assert_eq!((a.x, a.y, a.heading), (4, 5, Heading::Left));
        assert_eq!(g.get(5, 5), Some(0));
    }

    #[test]
    fn wraps_left_edge_to_right_edge() {
        let dims = Dims::new(7, 5).unwrap();
        let g = Grid::empty(dims);
        // Heading down on a 0 cell: R turns it to face left.
        let mut agents = AgentSet::from(vec![ant(0, 2, Heading::Down)]);
        rl().step(&g, &mut agents).unwrap();
        let a = agents.as_slice()[0];
        assert_eq!((a.x, a.y, a.heading), (6, 2, Heading::Left));
    }

    #[test]
    fn wraps_top_edge_to_bottom_edge() {
        let dims = Dims::new(4, 4).unwrap();
        let g = Grid::empty(dims);
        // Heading left on a 0 cell: R turns it to face up.
        let mut agents = AgentSet::from(vec![ant(1, 0, Heading::Left)]);
        rl().step(&g, &mut agents).unwrap();
        let a = agents.as_slice()[0];
        assert_eq!((a.x, a.y, a.heading), (1, 3, Heading::Up));
    }

    #[test]
    fn continue_and_uturn_symbols() {
        let dims = Dims::new(5, 5).unwrap();
        let rule = LangtonsAnt::new(Ruleset::parse("CU").unwrap(), AntUpdate::Sequential);
        let mut g = Grid::empty(dims);
        let mut agents = AgentSet::from(vec![ant(2, 2, Heading::Right)]);
        g = rule.step(&g, &mut agents).unwrap();
        assert_eq!(agents.as_slice()[0].heading, Heading::Right);
        assert_eq!(g.get(2, 2), Some(1));
        g.set(3, 2, 1).unwrap();
        g = rule.step(&g, &mut agents).unwrap();
        let a = agents.as_slice()[0];
        assert_eq!((a.x, a.y, a.heading), (2, 2, Heading::Left));
        assert_eq!(g.get(3, 2), Some(0));
    }

    #[test]
    fn out_of_bounds_agent_is_an_error() {
        let dims = Dims::new(3, 3).unwrap();
        let g = Grid::empty(dims);
        let mut agents = AgentSet::from(vec![ant(3, 1, Heading::Up)]);
        assert!(matches!(
            rl().step(&g, &mut agents),
            Err(RuleError::AgentOutOfBounds { index: 0, x: 3, .. })
        ));
        assert_eq!(agents.as_slice()[0], ant(3, 1, Heading::Up));
    }

    // ── Multiple ants ───────────────────────────────────────────

    #[test]
    fn sequential_ants_see_earlier_writes() {
        let dims = Dims::new(5, 5).unwrap();
        let g = Grid::empty(dims);
        let mut agents = AgentSet::from(vec![ant(2, 2, Heading::Up), ant(2, 2, Heading::Up)]);
        let g = rl().step(&g, &mut agents).unwrap();
        // First ant flips 0 -> 1 and turns right; second reads 1, turns left.
        let a = agents.as_slice();
        assert_eq!(a[0].heading, Heading::Right);
        assert_eq!(a[1].heading, Heading::Left);
        assert_eq!(g.get(2, 2), Some(0));
    }

    #[test]
    fn snapshot_ants_read_pre_tick_grid() {
        let dims = Dims::new(5, 5).unwrap();
        let g = Grid::empty(dims);
        let rule = LangtonsAnt::new(Ruleset::parse("RLR").unwrap(), AntUpdate::Snapshot);
        let mut agents = AgentSet::from(vec![ant(2, 2, Heading::Up), ant(2, 2, Heading::Up)]);
        let g = rule.step(&g, &mut agents).unwrap();
        let a = agents.as_slice();
        assert_eq!(a[0].heading, Heading::Right);
        assert_eq!(a[1].heading, Heading::Right);
        // Both increments still land.
        assert_eq!(g.get(2, 2), Some(2));
    }

    // ── Properties ──────────────────────────────────────────────

    fn heading() -> impl Strategy<Value = Heading> {
        (0u8..4).prop_map(Heading::from_index)
    }

    proptest! {
        #[test]
        fn ants_stay_in_bounds(
            w in 1u32..12,
            h in 1u32..12,
            starts in prop::collection::vec((0u32..12, 0u32..12, heading()), 1..5),
            rules in "[LRUC]{1,6}",
            steps in 1usize..60,
        ) {
            let dims = Dims::new(w, h).unwrap();
            let rule = LangtonsAnt::new(Ruleset::parse(&rules).unwrap(), AntUpdate::Sequential);
            let mut agents: AgentSet = starts
                .into_iter()
                .map(|(x, y, hd)| ant(x % w, y % h, hd))
                .collect();
            let mut g = Grid::empty(dims);
            for _ in 0..steps {
                g = rule.step(&g, &mut agents).unwrap();
                prop_assert!(agents.check_bounds(dims).is_ok());
                prop_assert!(g.validate_tags(rule.state_count()).is_ok());
            }
        }
    }
}
