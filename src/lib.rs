pub mod alphabet;
pub mod estimate;
pub mod generator;
pub mod registry;

pub use alphabet::{Alphabet, BaseClass};
pub use estimate::{CrackTime, crack_seconds, estimate};
pub use generator::derive;
pub use registry::{KeyEntry, Registry};
