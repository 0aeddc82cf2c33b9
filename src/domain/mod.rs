mod expense;
mod money;
mod roommate;
mod settlement;

pub use expense::*;
pub use money::*;
pub use roommate::*;
pub use settlement::*;
