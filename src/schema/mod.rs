pub mod naming;
pub mod record;
pub mod types;

pub use naming::*;
pub use record::*;
pub use types::*;
