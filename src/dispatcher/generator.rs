/***************************************/
/*        3rd party libraries          */
/***************************************/
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Direction, Request};

/// Draws requests uniformly over a floor range and both directions.
#[derive(Debug)]
pub struct RequestGenerator {
    rng: SmallRng,
    min_floor: i32,
    max_floor: i32,
}

impl RequestGenerator {
    /// `seed` makes the request sequence reproducible. Without one the
    /// generator seeds itself from the OS.
    pub fn new(min_floor: i32, max_floor: i32, seed: Option<u64>) -> RequestGenerator {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        RequestGenerator {
            rng,
            min_floor,
            max_floor,
        }
    }

    pub fn next_request(&mut self) -> Request {
        let floor = self.rng.gen_range(self.min_floor..=self.max_floor);
        let direction = if self.rng.gen_bool(0.5) {
            Direction::Up
        } else {
            Direction::Down
        };
        Request::new(floor, direction)
    }
}
