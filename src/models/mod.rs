pub mod aggregate;
pub mod export;
pub mod filter;
pub mod record;
pub mod summary;

pub use aggregate::*;
pub use export::*;
pub use filter::*;
pub use record::*;
pub use summary::*;
