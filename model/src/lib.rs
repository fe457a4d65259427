#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod heading;
mod histogram;
mod record;
mod trajectory;

pub use self::record::TrajectoryRecord;
pub use self::trajectory::{Trajectory, TrajectoryStatistics};
