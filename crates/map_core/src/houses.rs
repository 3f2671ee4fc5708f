//! Scatter of candidate house coordinates around an office.

use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::domain::Coordinate;

pub const HOUSE_COUNT: usize = 100;
/// Largest offset, in degrees, a house can have from its origin on either axis.
pub const MAX_OFFSET_DEGREES: f64 = 0.1;

const DIRECTION_DIVISOR: f64 = 10.0;

/// Returns `HOUSE_COUNT` points within `MAX_OFFSET_DEGREES` of `origin`.
///
/// Each point draws one sign and applies it to both axes, so houses fall in the
/// north-east or south-west quadrant of the origin.
pub fn generate_houses<R: Rng + ?Sized>(origin: Coordinate, rng: &mut R) -> Vec<Coordinate> {
    (0..HOUSE_COUNT)
        .map(|_| {
            let direction = if rng.gen_bool(0.5) {
                -DIRECTION_DIVISOR
            } else {
                DIRECTION_DIVISOR
            };
            Coordinate {
                lat: origin.lat + rng.gen::<f64>() / direction,
                lng: origin.lng + rng.gen::<f64>() / direction,
            }
        })
        .collect()
}

pub struct HouseGenerator {
    rng: StdRng,
    seeded: bool,
}

impl HouseGenerator {
    /// Seeded generators repeat the same scatter for the same sequence of origins.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self {
                rng: StdRng::seed_from_u64(seed),
                seeded: true,
            },
            None => Self {
                rng: StdRng::from_entropy(),
                seeded: false,
            },
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn generate(&mut self, origin: Coordinate) -> Vec<Coordinate> {
        generate_houses(origin, &mut self.rng)
    }
}

impl Default for HouseGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_bounds(origin: Coordinate, house: Coordinate) -> bool {
        let (dlat, dlng) = house.offset_from(&origin);
        (-MAX_OFFSET_DEGREES..=MAX_OFFSET_DEGREES).contains(&dlat)
            && (-MAX_OFFSET_DEGREES..=MAX_OFFSET_DEGREES).contains(&dlng)
    }

    #[test]
    fn produces_exactly_one_hundred_houses_near_origin() {
        let origins = [
            Coordinate::new(39.920673, 32.845841),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(-33.86, 151.21),
            Coordinate::new(89.95, -179.95),
        ];
        let mut generator = HouseGenerator::default();
        for origin in origins {
            let houses = generator.generate(origin);
            assert_eq!(houses.len(), HOUSE_COUNT);
            assert!(houses.iter().all(|house| within_bounds(origin, *house)));
        }
    }

    #[test]
    fn both_axes_share_the_sign() {
        let origin = Coordinate::new(10.0, 20.0);
        let houses = HouseGenerator::new(Some(3)).generate(origin);
        for house in houses {
            let (dlat, dlng) = house.offset_from(&origin);
            assert!(dlat * dlng >= 0.0, "mixed quadrant for {house:?}");
        }
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let origin = Coordinate::new(39.92, 32.85);
        let first = HouseGenerator::new(Some(42)).generate(origin);
        let second = HouseGenerator::new(Some(42)).generate(origin);
        assert_eq!(first, second);
        assert!(HouseGenerator::new(Some(42)).is_seeded());
    }

    #[test]
    fn unseeded_generators_scatter_differently() {
        let origin = Coordinate::new(39.92, 32.85);
        let first = HouseGenerator::default().generate(origin);
        let second = HouseGenerator::default().generate(origin);
        assert_ne!(first, second);
    }
}
