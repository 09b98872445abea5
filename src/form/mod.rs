pub mod container;
pub mod focus;

pub use container::{FormContainer, FormStatus, SubmitOutcome};
pub use focus::{FocusRing, FocusTarget};
