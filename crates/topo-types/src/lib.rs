pub mod diagnostics;
pub mod kinds;
pub mod names;
pub mod roles;

pub use diagnostics::*;
pub use kinds::*;
pub use names::*;
pub use roles::*;
