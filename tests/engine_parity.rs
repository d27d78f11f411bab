use life_engines::{
    Cell, Device, DeviceSelector, EngineKind, Grid, LifeError, Simulation, StepEngine, presets,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn device() -> Device {
    Device::select(DeviceSelector::Threads(4)).unwrap()
}

fn engines(tile_edge: usize) -> Vec<Box<dyn StepEngine>> {
    let device = device();
    EngineKind::all(tile_edge)
        .into_iter()
        .map(|kind| kind.build(&device).unwrap())
        .collect()
}

fn run_all(initial: &Grid, iterations: usize, tile_edge: usize) -> Vec<Vec<Grid>> {
    let (width, height) = initial.dimensions();
    engines(tile_edge)
        .into_iter()
        .map(|engine| {
            Simulation::new(engine)
                .run(width, height, iterations, initial)
                .unwrap()
        })
        .collect()
}

fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
    grid.iter_cells()
        .filter(|(_, _, c)| c.is_alive())
        .map(|(x, y, _)| (x, y))
        .collect()
}

fn run_parity_case(width: usize, height: usize, iterations: usize, tile_edge: usize, seed: u64) {
    let initial = Grid::random(width, height, &mut StdRng::seed_from_u64(seed)).unwrap();
    let runs = run_all(&initial, iterations, tile_edge);
    let (reference, others) = runs.split_first().unwrap();
    assert_eq!(reference.len(), iterations);
    for (kind, frames) in EngineKind::all(tile_edge).iter().skip(1).zip(others) {
        for (generation, (expected, actual)) in reference.iter().zip(frames).enumerate() {
            assert_eq!(
                expected.cells(),
                actual.cells(),
                "{} diverged at generation {} (seed {seed})",
                kind.name(),
                generation + 1
            );
        }
    }
}

#[test]
fn parity_dividing_tile_edges() {
    run_parity_case(64, 48, 12, 4, 0xA1);
    run_parity_case(32, 32, 20, 8, 0xB2);
    run_parity_case(30, 18, 10, 2, 0xC3);
}

#[test]
fn parity_non_dividing_tile_edges() {
    run_parity_case(37, 23, 10, 4, 11);
    run_parity_case(50, 41, 8, 7, 22);
    run_parity_case(5, 9, 6, 16, 33);
}

#[test]
fn borders_stay_dead() {
    for seed in [1u64, 2, 3] {
        let initial = Grid::random(40, 25, &mut StdRng::seed_from_u64(seed)).unwrap();
        for frames in run_all(&initial, 6, 4) {
            assert!(frames.iter().all(Grid::border_is_dead));
        }
    }
}

#[test]
fn step_is_repeatable() {
    let previous = Grid::random(33, 21, &mut StdRng::seed_from_u64(77)).unwrap();
    for engine in engines(4) {
        let mut first = Grid::new(33, 21).unwrap();
        let mut second = Grid::new(33, 21).unwrap();
        engine.step(&previous, &mut first);
        engine.step(&previous, &mut second);
        assert_eq!(first, second, "{}", engine.name());
    }
}

#[test]
fn all_dead_stays_dead() {
    let initial = Grid::new(5, 5).unwrap();
    for frames in run_all(&initial, 1, 5) {
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].count_alive(), 0);
    }
}

#[test]
fn blinker_oscillates() {
    let mut initial = Grid::new(5, 5).unwrap();
    presets::blinker().place_on(&mut initial, 1, 1);
    assert_eq!(alive_cells(&initial), vec![(1, 2), (2, 2), (3, 2)]);

    for frames in run_all(&initial, 2, 5) {
        assert_eq!(alive_cells(&frames[0]), vec![(2, 1), (2, 2), (2, 3)]);
        assert_eq!(frames[1], initial);
    }
}

#[test]
fn block_is_still_life() {
    let mut initial = Grid::new(6, 6).unwrap();
    presets::block().place_on(&mut initial, 2, 2);
    assert_eq!(initial.get(3, 3), Some(Cell::Alive));

    for frames in run_all(&initial, 10, 3) {
        assert!(frames.iter().all(|frame| *frame == initial));
    }
}

#[test]
fn glider_translates_diagonally() {
    let mut initial = Grid::new(16, 16).unwrap();
    presets::glider().place_on(&mut initial, 2, 2);
    let mut shifted = Grid::new(16, 16).unwrap();
    presets::glider().place_on(&mut shifted, 3, 3);

    for frames in run_all(&initial, 4, 4) {
        assert_eq!(frames[3], shifted);
    }
}

#[test]
fn too_small_grid_is_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        Grid::random(2, 8, &mut rng),
        Err(LifeError::InvalidDimensions { width: 2, height: 8 })
    );
    assert_eq!(
        Grid::random(8, 2, &mut rng),
        Err(LifeError::InvalidDimensions { width: 8, height: 2 })
    );
}
