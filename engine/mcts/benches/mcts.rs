//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full MCTS search with varying iteration counts
//! - Search from different game states (opening, midgame, near-terminal)
//! - Tree operations (selection, backpropagation, policy extraction)
//! - Random playouts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::{Game, GameStatus, Player};
use games_tictactoe::{Action, State, TicTacToe};
use mcts::{find_best_child, random_playout, MctsConfig, MctsSearch, MctsTree};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Helper to create a game state after playing a sequence of cell indices.
fn play_moves(moves: &[usize]) -> State {
    moves.iter().fold(State::new(), |state, &index| {
        state.make_move(Action::from_index(index).unwrap())
    })
}

fn run_search(game: &TicTacToe, state: &State, config: &MctsConfig, seed: u64) -> Action {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut search = MctsSearch::new(game, config.clone(), state).unwrap();
    search.run(&mut rng).unwrap().action
}

// =============================================================================
// Full MCTS Search Benchmarks
// =============================================================================

fn bench_mcts_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_iterations");
    let game = TicTacToe::new();
    let state = game.initial_state();

    for iterations in [25, 100, 400, 1600] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(
            BenchmarkId::new("tictactoe", iterations),
            &iterations,
            |b, &iterations| {
                let config = MctsConfig::default().with_iterations(iterations);
                b.iter(|| black_box(run_search(&game, &state, &config, 42)));
            },
        );
    }

    group.finish();
}

fn bench_mcts_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_game_phases");
    let game = TicTacToe::new();
    let config = MctsConfig::default().with_iterations(200);

    // Opening position (all 9 moves available)
    let opening = State::new();
    group.bench_function("opening", |b| {
        b.iter(|| black_box(run_search(&game, &opening, &config, 42)));
    });

    // Midgame position (5 moves available)
    // Board: X at 4, O at 0, X at 2, O at 6
    let midgame = play_moves(&[4, 0, 2, 6]);
    group.bench_function("midgame", |b| {
        b.iter(|| black_box(run_search(&game, &midgame, &config, 42)));
    });

    // Near-terminal position (winning move available)
    // Board: X at 0, O at 3, X at 1, O at 4 -> X can win at 2
    let near_terminal = play_moves(&[0, 3, 1, 4]);
    group.bench_function("near_terminal", |b| {
        b.iter(|| black_box(run_search(&game, &near_terminal, &config, 42)));
    });

    // Same position with losing-move pruning enabled
    let pruning = config.clone().with_pruning(true);
    group.bench_function("near_terminal_pruning", |b| {
        b.iter(|| black_box(run_search(&game, &near_terminal, &pruning, 42)));
    });

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");
    let game = TicTacToe::new();

    // Benchmark node allocation
    group.bench_function("allocate_node", |b| {
        b.iter(|| {
            let mut tree = MctsTree::new(State::new(), false);
            let root = tree.root();

            for i in 0..100usize {
                let action = Action::from_index(i % 9).unwrap();
                tree.add_child(root, action, State::new().make_move(action), false);
            }

            black_box(tree.len())
        });
    });

    // Benchmark child selection (UCB calculation)
    group.bench_function("select_child", |b| {
        let mut tree = MctsTree::new(State::new(), false);
        let root = tree.root();

        for i in 0..9usize {
            let action = Action::from_index(i).unwrap();
            let child_id = tree.add_child(root, action, State::new().make_move(action), false);
            let child = tree.get_mut(child_id);
            for _ in 0..(i as u32 + 1) * 10 {
                child.increment_visits();
            }
            child.add_reward(i as f64 * 25.0);
        }
        for _ in 0..450 {
            tree.get_mut(root).increment_visits();
        }

        b.iter(|| black_box(find_best_child(&tree, root, std::f64::consts::SQRT_2)));
    });

    // Benchmark backpropagation
    group.bench_function("backpropagate_depth_5", |b| {
        b.iter_batched(
            || {
                let mut tree = MctsTree::new(State::new(), false);
                let mut parent = tree.root();

                for index in [0usize, 3, 1, 4, 2] {
                    let action = Action::from_index(index).unwrap();
                    let state = tree.get(parent).state.make_move(action);
                    parent = tree.add_child(parent, action, state, state.is_done());
                }

                (tree, parent)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(&game, leaf, GameStatus::Won(Player::One), 10.0);
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    // Benchmark policy extraction
    group.bench_function("root_policy", |b| {
        let mut tree = MctsTree::new(State::new(), false);
        let root = tree.root();

        for i in 0..9usize {
            let action = Action::from_index(i).unwrap();
            let child_id = tree.add_child(root, action, State::new().make_move(action), false);
            for _ in 0..(i as u32 + 1) * 50 {
                tree.get_mut(child_id).increment_visits();
            }
        }

        b.iter(|| black_box(tree.root_policy()));
    });

    group.finish();
}

// =============================================================================
// Playout Benchmarks
// =============================================================================

fn bench_random_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_playout");
    let game = TicTacToe::new();

    group.bench_function("from_opening", |b| {
        let state = State::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| black_box(random_playout(&game, &state, 64, &mut rng).unwrap()));
    });

    group.finish();
}

// =============================================================================
// Configuration Comparison Benchmarks
// =============================================================================

fn bench_mcts_configs(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_configs");
    let game = TicTacToe::new();
    let state = game.initial_state();

    // Different exploration constants
    for exploration in [0.5, std::f64::consts::SQRT_2, 2.5, 4.0] {
        group.bench_with_input(
            BenchmarkId::new("exploration", exploration),
            &exploration,
            |b, &exploration| {
                let config = MctsConfig::default()
                    .with_iterations(200)
                    .with_exploration(exploration);
                b.iter(|| black_box(run_search(&game, &state, &config, 42)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mcts_search_iterations,
    bench_mcts_game_phases,
    bench_tree_operations,
    bench_random_playout,
    bench_mcts_configs,
);

criterion_main!(benches);
