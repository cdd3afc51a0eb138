//! Money requests
//!
//! Ask another account holder to pay you. A request is born PENDING with a
//! 24 hour deadline; the recipient accepts (settling through the transfer
//! engine) or declines, and a background sweep expires whatever is left.
//! All transitions are compare-and-set, so responders and the sweep can
//! race without double-settling.

pub mod error;
pub mod expiry;
pub mod models;
pub mod service;
pub mod status;
pub mod store;

#[cfg(test)]
mod integration_tests;

pub use error::RequestError;
pub use expiry::ExpiryWorker;
pub use models::{MoneyRequest, RequestCommand};
pub use service::RequestService;
pub use status::RequestStatus;
pub use store::RequestStore;
