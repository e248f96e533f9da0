pub mod error;
pub mod progress;
pub mod routes;
pub mod service;
pub mod state;

pub use routes::router;
pub use state::{AppState, AppStateInner};
