//! Derived computations over raw subject state.

pub mod clock;
pub mod direction;
pub mod experience;

pub use clock::{ClockFormat, format_ticks};
pub use direction::{Direction, xz_direction};
pub use experience::{experience_for_level, experience_to_reach, total_experience};
