//! Premium illustration: term resolution and the yearly schedule

mod schedule;
mod target_age;

pub use schedule::{build_illustration, Illustration, IllustrationRow, IllustrationTotals};
pub use target_age::{resolve_term, TermResolution};
