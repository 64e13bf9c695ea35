pub mod profile;
pub mod register;
pub mod serial;

pub use profile::*;
pub use register::*;
pub use serial::*;
