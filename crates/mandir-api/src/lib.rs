pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod contact;
pub mod donations;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod notify;
pub mod payments;
pub mod profiles;
pub mod routes;
pub mod state;
mod validate;

pub use error::ApiError;
pub use routes::router;
pub use state::{AppState, AppStateInner};
