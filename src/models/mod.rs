pub mod activity;
pub mod round;
pub mod team;
pub mod timestamp;

pub use activity::*;
pub use round::*;
pub use team::*;
