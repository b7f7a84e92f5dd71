pub mod random;
pub mod request;
pub mod tips;

pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
pub use request::{RequestError, TipsRequest};
pub use tips::generate_tips;

pub mod telemetry;
