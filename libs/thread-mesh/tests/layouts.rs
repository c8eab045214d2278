//! Golden region layouts of the five parts at four segments per loop.
//!
//! Each entry pins the first vertex of a thread, the ring and joined loop of
//! a collar together with its radius and height, or both loops of a seam.
//! Counts alone cannot catch a collar stitched to the wrong loop.

use approx::assert_relative_eq;
use thread_mesh::{HiltConfig, PartConfig, PartKind, RegionKind, Step};

#[derive(Debug, Clone, Copy)]
enum Golden {
    Thread(u32),
    Collar(u32, u32, f64, f64),
    Seam(u32, u32),
}

use Golden::{Collar, Seam, Thread};

fn check_layout(config: &PartConfig, vertices: usize, faces: usize, golden: &[Golden]) {
    let recipe = config.recipe();
    let layout = recipe.plan().unwrap();
    assert_eq!(layout.counts().vertices, vertices, "{}", config.kind());
    assert_eq!(layout.counts().faces, faces, "{}", config.kind());
    assert_eq!(layout.regions().len(), golden.len(), "{}", config.kind());

    for ((region, step), expected) in layout.regions().iter().zip(recipe.steps()).zip(golden) {
        match (region.kind, step, *expected) {
            (RegionKind::Thread { bottom, .. }, Step::Thread { .. }, Thread(start)) => {
                assert_eq!(bottom, start, "{}", region.label);
            }
            (
                RegionKind::Collar { ring, join },
                Step::Collar { radius, height, .. },
                Collar(want_ring, want_join, want_radius, want_height),
            ) => {
                assert_eq!((ring, join), (want_ring, want_join), "{}", region.label);
                assert_relative_eq!(*radius, want_radius, epsilon = 1e-9);
                assert_relative_eq!(*height, want_height, epsilon = 1e-9);
            }
            (RegionKind::Seam { from, to }, Step::Seam { .. }, Seam(want_from, want_to)) => {
                assert_eq!((from, to), (want_from, want_to), "{}", region.label);
            }
            (kind, _, expected) => panic!("{}: {kind:?} where {expected:?} belongs", region.label),
        }
    }
}

fn at_four_segments(kind: PartKind) -> PartConfig {
    let mut config = PartConfig::default_for(kind);
    config.set_segments(4);
    config
}

#[test]
fn blade_holder_layout() {
    check_layout(
        &at_four_segments(PartKind::BladeHolder),
        81,
        72,
        &[
            Thread(0),
            Collar(53, 0, 14.7, 100.0),
            Collar(57, 53, 14.7, 106.3),
            Collar(61, 57, 14.7, 117.8),
            Collar(65, 61, 12.8, 117.8),
            Collar(69, 65, 12.8, 121.8),
            Collar(73, 49, 21.5, 106.3),
            Collar(77, 73, 21.5, 121.8),
            Seam(77, 69),
        ],
    );
}

#[test]
fn coupler_female_layout() {
    check_layout(
        &at_four_segments(PartKind::CouplerFemale),
        190,
        164,
        &[
            Thread(0),
            Collar(73, 69, 17.2, 106.5),
            Collar(77, 73, 19.5, 106.5),
            Collar(81, 77, 19.5, 100.0),
            Thread(85),
            Collar(158, 85, 28.7, 69.8),
            Collar(162, 158, 31.0, 69.8),
            Collar(166, 162, 31.0, 76.3),
            Collar(170, 166, 31.0, 78.4),
            Collar(174, 154, 28.7, 78.4),
            Collar(178, 174, 28.7, 89.2),
            Collar(182, 170, 31.0, 92.8),
            Collar(186, 0, 15.2, 100.0),
            Seam(186, 178),
            Seam(182, 81),
        ],
    );
}

#[test]
fn coupler_male_layout() {
    check_layout(
        &at_four_segments(PartKind::CouplerMale),
        182,
        156,
        &[
            Thread(0),
            Collar(73, 69, 15.7, 78.4),
            Collar(77, 73, 15.7, 70.0),
            Thread(81),
            Collar(154, 81, 21.2, 45.0),
            Collar(158, 154, 21.2, 53.4),
            Collar(162, 158, 21.2, 57.5),
            Collar(166, 77, 15.7, 57.5),
            Collar(170, 150, 28.2, 185.0 / 3.0),
            Collar(174, 170, 21.2, 185.0 / 3.0),
            Collar(178, 0, 17.7, 185.0 / 3.0),
            Seam(166, 162),
            Seam(174, 178),
        ],
    );
}

#[test]
fn hilt_layout() {
    let open = [
        Thread(0),
        Collar(73, 0, 15.7, 0.0),
        Collar(77, 73, 15.7, 8.4),
        Thread(81),
        Collar(194, 190, 18.2, 160.7),
        Collar(198, 194, 21.5, 160.7),
        Collar(202, 198, 21.5, 150.0),
        Collar(206, 202, 21.5, 8.4),
        Collar(210, 81, 18.2, 11.4),
        Collar(214, 77, 15.7, 9.4),
        Seam(206, 69),
        Seam(210, 214),
    ];
    check_layout(&at_four_segments(PartKind::Hilt), 218, 184, &open);

    let mut locking = open;
    locking[8] = Collar(210, 81, 15.7, 150.0);
    let config = PartConfig::Hilt(HiltConfig {
        segments: 4,
        locking: true,
        ..HiltConfig::default()
    });
    check_layout(&config, 218, 184, &locking);
}

#[test]
fn pommel_layout() {
    check_layout(
        &at_four_segments(PartKind::Pommel),
        133,
        108,
        &[
            Thread(0),
            Collar(113, 109, 18.2, 20.7),
            Collar(117, 113, 21.5, 20.7),
            Collar(121, 117, 21.5, 0.0),
            Collar(125, 121, 18.2, 0.0),
            Collar(129, 0, 18.2, 0.0),
        ],
    );
}
