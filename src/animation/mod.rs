pub mod driver;
pub mod ticker;

pub use driver::{AnimationDriver, AnimationStep, AnimationTiming, DriverState, ResetStage, WrapPolicy};
pub use ticker::Ticker;
