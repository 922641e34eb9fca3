use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::index::AsIndex;
use crate::order::random_with;
use crate::{
    solve, Game, GameBuilder, Measure, Output, OutputMode, Player, Priority, SolverConfig, Spm,
    VertexId, VertexOrder,
};

const ORDERS: [VertexOrder; 4] =
    [VertexOrder::Input, VertexOrder::Random, VertexOrder::InDegree, VertexOrder::BreadthFirst];

fn build(rows: &[(Priority, Player, &[usize])]) -> Game {
    let mut builder = GameBuilder::new();
    for (id, &(priority, player, succs)) in rows.iter().enumerate() {
        builder.add_vertex(id, priority, player, succs.iter().copied()).unwrap();
    }
    builder.build().unwrap()
}

fn random_game(rng: &mut StdRng) -> Game {
    let n = rng.gen_range(1..=10);
    let max_priority = rng.gen_range(0..=6);

    let mut builder = GameBuilder::new();
    for id in 0..n {
        let priority = rng.gen_range(0..=max_priority);
        let player = if rng.gen_bool(0.5) { Player::Even } else { Player::Odd };
        let out_degree = rng.gen_range(1..=3);
        let succs = (0..out_degree).map(|_| rng.gen_range(0..n)).collect::<Vec<_>>();
        builder.add_vertex(id, priority, player, succs).unwrap();
    }
    builder.build().unwrap()
}

fn partition(game: &Game, order: VertexOrder) -> Vec<bool> {
    let config = SolverConfig { order, output: OutputMode::Partition };
    match solve(game, &config) {
        Output::Partition(even_wins) => even_wins.into_vec(),
        Output::Vertex(_) => unreachable!(),
    }
}

/// Zielonka's recursive algorithm, used as an independent reference.
fn zielonka(game: &Game) -> Vec<bool> {
    let all = vec![true; game.vertex_count()];
    let [even, _] = zielonka_rec(game, &all);
    even
}

fn zielonka_rec(game: &Game, alive: &[bool]) -> [Vec<bool>; 2] {
    let n = game.vertex_count();
    let priorities = game.vertices().filter(|v| alive[v.to_usize()]).map(|v| game.priority_of(v));
    let Some(d) = priorities.max() else {
        return [vec![false; n], vec![false; n]];
    };
    let player = Player::of_priority(d);
    let (me, other) = match player {
        Player::Even => (0, 1),
        Player::Odd => (1, 0),
    };

    let top = game
        .vertices()
        .map(|v| alive[v.to_usize()] && game.priority_of(v) == d)
        .collect_vec();
    let attr = attractor(game, alive, &top, player);
    let rest = (0..n).map(|i| alive[i] && !attr[i]).collect_vec();
    let sub = zielonka_rec(game, &rest);

    if !sub[other].contains(&true) {
        let mut res = [vec![false; n], vec![false; n]];
        res[me] = alive.to_vec();
        return res;
    }

    let attr = attractor(game, alive, &sub[other], player.opponent());
    let rest = (0..n).map(|i| alive[i] && !attr[i]).collect_vec();
    let mut res = zielonka_rec(game, &rest);
    for i in 0..n {
        res[other][i] |= attr[i];
    }
    res
}

fn attractor(game: &Game, alive: &[bool], target: &[bool], player: Player) -> Vec<bool> {
    let mut attr = target.to_vec();
    let mut changed = true;
    while changed {
        changed = false;
        for v in game.vertices() {
            if !alive[v.to_usize()] || attr[v.to_usize()] {
                continue;
            }
            let mut succs = game.successors_of(v).filter(|w| alive[w.to_usize()]);
            let attracted = match game.player_of(v) == player {
                true => succs.any(|w| attr[w.to_usize()]),
                false => succs.all(|w| attr[w.to_usize()]),
            };
            if attracted {
                attr[v.to_usize()] = true;
                changed = true;
            }
        }
    }
    attr
}

#[test]
fn even_self_loop() {
    let game = build(&[(0, Player::Even, &[0])]);
    let mut spm = Spm::new(&game);
    spm.run(&[VertexId(0)]);

    assert!(spm.measure(VertexId(0)).is_bottom());
    assert_eq!(spm.stats().lifts, 0);
}

#[test]
fn odd_self_loop() {
    let game = build(&[(1, Player::Odd, &[0])]);
    let mut spm = Spm::new(&game);

    assert!(spm.round(&[VertexId(0)]));
    assert!(spm.measure(VertexId(0)).is_top());
    assert!(!spm.round(&[VertexId(0)]));
}

#[test]
fn two_vertex_alternation() {
    let game = build(&[(2, Player::Even, &[1]), (1, Player::Odd, &[0])]);

    for order in ORDERS {
        assert_eq!(partition(&game, order), [true, true]);
    }

    let mut spm = Spm::new(&game);
    let stats = spm.run(&VertexOrder::Input.vertices(&game));
    assert_eq!((stats.rounds, stats.lifts, stats.lift_attempts), (2, 1, 4));
    assert_eq!(spm.measure(VertexId(1)), &Measure::Finite([0, 1, 0].into()));
}

#[test]
fn odd_cycle_saturates() {
    // 0 (1) -> 1 (3) -> 2 (1) -> 0, highest priority on the cycle is odd.
    let game = build(&[
        (1, Player::Even, &[1]),
        (3, Player::Even, &[2]),
        (1, Player::Odd, &[0]),
    ]);
    assert_eq!(partition(&game, VertexOrder::Input), [false, false, false]);

    // Same cycle dominated by an even priority.
    let game = build(&[
        (1, Player::Odd, &[1]),
        (3, Player::Odd, &[2]),
        (1, Player::Even, &[3]),
        (4, Player::Even, &[0]),
    ]);
    assert_eq!(partition(&game, VertexOrder::Input), [true, true, true, true]);
}

#[test]
fn players_choose_their_successor() {
    // Even at 0 can escape the odd loop at 1 through 2, Odd at 3 can't avoid 4.
    let game = build(&[
        (0, Player::Even, &[1, 2]),
        (1, Player::Odd, &[1]),
        (2, Player::Even, &[2]),
        (0, Player::Odd, &[4, 4]),
        (5, Player::Odd, &[3]),
    ]);
    assert_eq!(partition(&game, VertexOrder::Input), [true, false, true, false, false]);
}

#[test]
fn solution_winning_sets() {
    let game = build(&[
        (0, Player::Even, &[1, 2]),
        (1, Player::Odd, &[1]),
        (2, Player::Even, &[2]),
        (0, Player::Odd, &[4]),
        (5, Player::Odd, &[3]),
    ]);
    let mut spm = Spm::new(&game);
    spm.run(&VertexOrder::InDegree.vertices(&game));
    let solution = spm.into_solution();

    assert_eq!(solution.winning_set(Player::Even).collect_vec(), [VertexId(0), VertexId(2)]);
    assert_eq!(
        solution.winning_set(Player::Odd).collect_vec(),
        [VertexId(1), VertexId(3), VertexId(4)]
    );
    assert_eq!(solution.winner(VertexId(4)), Player::Odd);
    assert!(solution.even_wins(VertexId(2)));
    assert_eq!(solution.partition().len(), game.vertex_count());
    assert!(solution.stats.lifts > 0);
}

#[test]
fn single_vertex_output() {
    let query = |game: &Game, v| {
        let config = SolverConfig { order: VertexOrder::Input, output: OutputMode::Vertex(v) };
        solve(game, &config)
    };

    let game = build(&[(3, Player::Even, &[1]), (0, Player::Odd, &[1])]);
    assert_eq!(query(&game, VertexId(0)), Output::Vertex(true));
    assert_eq!(query(&game, VertexId(1)), Output::Vertex(true));

    // Odd at 1 prefers the cycle 1 <-> 0, which has priority 3.
    let game = build(&[
        (3, Player::Even, &[1]),
        (0, Player::Odd, &[1, 0]),
        (7, Player::Odd, &[2]),
    ]);
    assert_eq!(query(&game, VertexId(0)), Output::Vertex(false));
    assert_eq!(query(&game, VertexId(2)), Output::Vertex(false));
}

#[test]
#[should_panic(expected = "vertex 2 is not in the game")]
fn single_vertex_output_out_of_range() {
    let game = build(&[(0, Player::Even, &[1]), (1, Player::Odd, &[0])]);
    let output = OutputMode::Vertex(VertexId(2));
    solve(&game, &SolverConfig { order: VertexOrder::Input, output });
}

#[test]
#[should_panic(expected = "vertex 0 appears twice in the order")]
fn run_rejects_repeated_vertices() {
    let game = build(&[(0, Player::Even, &[1]), (1, Player::Odd, &[0])]);
    Spm::new(&game).run(&[VertexId(0), VertexId(0)]);
}

#[test]
fn matches_zielonka() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..300 {
        let game = random_game(&mut rng);
        let expected = zielonka(&game);
        for order in ORDERS {
            assert_eq!(partition(&game, order), expected, "order {order:?} on {game:?}");
        }
    }
}

#[test]
fn disjoint_union_solves_independently() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let left = random_game(&mut rng);
        let right = random_game(&mut rng);
        let offset = left.vertex_count();

        let mut builder = GameBuilder::new();
        for (game, offset) in [(&left, 0), (&right, offset)] {
            for v in game.vertices() {
                let succs = game.successors_of(v).map(|w| w.to_usize() + offset);
                let (priority, player) = (game.priority_of(v), game.player_of(v));
                builder.add_vertex(v.to_usize() + offset, priority, player, succs).unwrap();
            }
        }
        let union = builder.build().unwrap();

        let mut expected = partition(&left, VertexOrder::Input);
        expected.extend(partition(&right, VertexOrder::Input));
        assert_eq!(partition(&union, VertexOrder::Input), expected);
    }
}

#[test]
fn rounds_are_monotone() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..100 {
        let game = random_game(&mut rng);
        let order = random_with(&game, &mut rng);
        let mut spm = Spm::new(&game);

        loop {
            let before = game.vertices().map(|v| spm.measure(v).clone()).collect::<Vec<_>>();
            let increased = spm.round(&order);

            for (v, old) in game.vertices().zip(&before) {
                let new = spm.measure(v);
                assert!(new.greater_eq(old), "{v} went from {old:?} to {new:?}");
                if old.is_top() {
                    assert!(new.is_top());
                }
            }

            let changed = game.vertices().zip(&before).any(|(v, old)| spm.measure(v) != old);
            assert_eq!(increased, changed);
            if !increased {
                break;
            }
        }
    }
}

#[test]
fn lifts_within_termination_bound() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let game = random_game(&mut rng);
        for order in ORDERS {
            let mut spm = Spm::new(&game);
            let stats = spm.run(&order.vertices(&game));

            let limit = game
                .vertices()
                .map(|v| spm.bound().lift_capacity(game.priority_of(v)))
                .fold(0u128, u128::saturating_add);
            assert!((stats.lifts as u128) <= limit);
            assert_eq!(stats.lift_attempts, stats.rounds * game.vertex_count());
        }
    }
}

#[test]
fn finite_measures_stay_within_bound() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..100 {
        let game = random_game(&mut rng);
        let mut spm = Spm::new(&game);
        spm.run(&VertexOrder::BreadthFirst.vertices(&game));

        for v in game.vertices() {
            let Measure::Finite(slots) = spm.measure(v) else { continue };
            for (i, &slot) in slots.iter().enumerate() {
                assert!(slot <= spm.bound()[i]);
                if i < game.priority_of(v) || i % 2 == 0 {
                    assert_eq!(slot, 0, "slot {i} of {v}");
                }
            }
        }
    }
}
