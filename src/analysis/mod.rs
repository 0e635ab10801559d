//! Analysis built on top of the point calculation.
//!
//! Every function here calls [`calculate_household`](crate::calculation::calculate_household)
//! repeatedly with a varied gross salary: the income curve sweeps a range,
//! trap zone detection scans that curve for steps where earning more does
//! not pay, and the recommendations combine both with the outcome of the
//! current situation.

mod income_curve;
mod recommendations;
mod trap_zones;
mod working_point;

pub use income_curve::{IncomeCurvePoint, SweepRange, income_curve};
pub use recommendations::{Recommendation, Severity, advise};
pub use trap_zones::{TrapZone, find_trap_zones, trap_zones_from_curve};
pub use working_point::{WorkingPoint, find_cheaper_working_point};
