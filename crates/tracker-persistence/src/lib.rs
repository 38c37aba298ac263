pub mod gateway;
pub mod save_worker;
pub mod serialization;
pub mod session;
pub mod store;
pub mod traits;

pub use gateway::{LoadOrigin, LoadReport, PersistenceGateway};
pub use save_worker::SaveHandle;
pub use serialization::*;
pub use session::Session;
pub use store::*;
pub use traits::*;
