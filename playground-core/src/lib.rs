pub mod codes;
pub mod controller;
pub mod events;
pub mod scoring;
pub mod session;
pub mod store;

// Re-export main components
pub use codes::*;
pub use controller::*;
pub use events::*;
pub use scoring::*;
pub use session::*;
pub use store::*;
