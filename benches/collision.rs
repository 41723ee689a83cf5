use criterion::{criterion_group, criterion_main, Criterion};
use maze_game::{
    cells::Cartesian2DCoordinate,
    collision::{resolve_move, CollisionGeometry, Player},
    generators::{self, DEFAULT_RECURSION_LIMIT},
    grid::MazeGrid,
    units::{Height, Width},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_resolve_move(c: &mut Criterion) {
    let mut g = MazeGrid::new(Width(64), Height(64)).unwrap();
    let mut rng = XorShiftRng::seed_from_u64(7);
    generators::recursive_backtracker(&mut g, None, &mut rng, DEFAULT_RECURSION_LIMIT).unwrap();
    let geometry = CollisionGeometry::new(20);
    let start = Player::at_cell_centre(Cartesian2DCoordinate::new(0, 0), &geometry);

    // A frame's worth of input in every direction, the player wanders the maze.
    let moves = [(3.0, 0.0), (0.0, 3.0), (-3.0, 0.0), (0.0, -3.0), (2.5, 2.5)];
    c.bench_function("resolve_move_64", move |b| {
        let mut player = start;
        b.iter(|| {
            for &(dx, dy) in moves.iter() {
                resolve_move(&g, &geometry, &mut player, dx, dy);
            }
        })
    });
}

criterion_group!(benches, bench_resolve_move);
criterion_main!(benches);
