use std::time::Duration;

use criterion::{Criterion, Throughput};
use level_combine::prelude::{Level, LevelObject};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// A `w` x `h` block of objects, every fifth one a spike.
pub fn grid_level(name: &str, w: i64, h: i64) -> Level {
    let mut objects = Vec::with_capacity((w * h).max(0) as usize);
    for x in 0..w {
        for y in 0..h {
            let kind = if (x + y) % 5 == 0 {
                "death.basic-spike"
            } else {
                "block.basic-block"
            };
            objects.push(LevelObject::at(kind, x, y));
        }
    }
    Level::new(name, objects)
}
