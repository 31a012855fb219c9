//! HTTP request handlers.

pub mod health;
pub mod link;
pub mod redirect;
pub mod upload_csv;

pub use health::health_handler;
pub use link::link_handler;
pub use redirect::redirect_handler;
pub use upload_csv::upload_csv_handler;
