use rand::rngs::SmallRng;
use rand::SeedableRng;

use sandfall_engine::{hex_to_rgb, initialize, insert_particle, step, Rgb, SimulationState};

fn column(state: &SimulationState, x: u32) -> Vec<u8> {
    (0..state.height()).map(|y| state.cell(x, y)).collect()
}

#[test]
fn top_middle_particle_reaches_the_floor_and_stays() {
    let mut rng = SmallRng::seed_from_u64(42);
    let state = insert_particle(initialize(3, 3), 1.0, 0.0, 0);
    assert_eq!(column(&state, 1), vec![1, 0, 0]);

    let (state, _) = step(state, 1.0, 1.0, &mut rng);
    assert_eq!(column(&state, 1), vec![0, 1, 0]);

    let (state, _) = step(state, 1.0, 1.0, &mut rng);
    assert_eq!(column(&state, 1), vec![0, 0, 1]);

    let (state, pixels) = step(state, 1.0, 1.0, &mut rng);
    assert_eq!(column(&state, 1), vec![0, 0, 1]);
    assert_eq!(pixels.pixel(1, 2), [255, 215, 0, 255]);
}

#[test]
fn hourglass_conserves_particles_and_never_overlaps() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut state = initialize(64, 48);
    let red = state.palette_mut().find_or_append("#ff0000").unwrap();
    for y in 0..16 {
        for x in 16..48 {
            let idx = if (x + y) % 2 == 0 { 0 } else { red };
            state = insert_particle(state, x as f32 + 0.5, y as f32 + 0.5, idx);
        }
    }
    let total = state.particle_count();
    assert_eq!(total, 32 * 16);

    for _ in 0..100 {
        let (next, pixels) = step(state, 0.8, 2.0, &mut rng);
        state = next;
        assert_eq!(state.particle_count(), total);
        let opaque = pixels.data().chunks(4).filter(|px| px[3] == 255).count();
        assert_eq!(opaque, total);
    }
}

#[test]
fn color_mapping_contract() {
    assert_eq!(hex_to_rgb("notacolor"), Rgb::new(0, 0, 0));
    assert_eq!(hex_to_rgb("#ff00aa"), Rgb::new(255, 0, 170));
    assert_eq!(hex_to_rgb("#FF00AA"), Rgb::new(255, 0, 170));
}
