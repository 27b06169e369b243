pub mod coordinator;
pub mod event;
pub mod unit;

pub use coordinator::{Coordinator, ValidationSummary};
pub use event::ValidationEvent;
pub use unit::{check_unit, DigitSet};
