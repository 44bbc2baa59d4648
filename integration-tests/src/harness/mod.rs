pub mod steam;
pub mod tracing;

pub use steam::{FakeSteam, fixture};
pub use tracing::{CapturedEvent, init_test_tracing};
