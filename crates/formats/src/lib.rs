pub mod detail;
pub mod zones;

pub use detail::*;
pub use zones::*;
