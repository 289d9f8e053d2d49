//! Multi-generation behaviour of the life-like rules.

use simwall_core::cell::ALIVE;
use simwall_core::{AgentSet, Dims, Grid};
use simwall_rules::{AutomatonRule, GameOfLife};

#[test]
fn glider_translates_diagonally_every_four_generations() {
    let glider = Grid::from_rows(&[vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]).unwrap();
    let start = Grid::centered_from_pattern(Dims::new(12, 12).unwrap(), &glider).unwrap();

    let mut g = start.clone();
    let mut agents = AgentSet::new();
    for _ in 0..4 {
        g = GameOfLife.step(&g, &mut agents).unwrap();
    }

    assert_eq!(g.count(ALIVE), 5);
    for y in 0..11 {
        for x in 0..11 {
            assert_eq!(g.get(x + 1, y + 1), start.get(x, y), "cell ({x}, {y})");
        }
    }
}

#[test]
fn blinker_cut_by_edge_dies_out() {
    // A vertical blinker in column 0 loses the cell that would sit at x = -1.
    let mut g = Grid::empty(Dims::new(5, 5).unwrap());
    for y in 1..4 {
        g.set(0, y, ALIVE).unwrap();
    }
    let mut agents = AgentSet::new();

    g = GameOfLife.step(&g, &mut agents).unwrap();
    assert_eq!(g.count(ALIVE), 2);
    assert_eq!(g.get(0, 2), Some(ALIVE));
    assert_eq!(g.get(1, 2), Some(ALIVE));

    g = GameOfLife.step(&g, &mut agents).unwrap();
    assert_eq!(g.count(ALIVE), 0);
}
