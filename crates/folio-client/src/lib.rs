pub mod api;
pub mod error;
pub mod home;
pub mod keyboard;
pub mod notice;
pub mod secret_code;
pub mod tracker;

pub use api::ApiClient;
pub use error::ClientError;
pub use home::HomePage;
pub use keyboard::Keyboard;
