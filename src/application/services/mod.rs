//! Business logic services for the application layer.

pub mod batch_service;
pub mod browser_platform_service;
pub mod link_service;
pub mod qr_service;
pub mod redirect_service;
pub mod redirection_limit_service;
pub mod url_check_service;

pub use batch_service::{BatchContext, BatchService};
pub use browser_platform_service::BrowserPlatformService;
pub use link_service::LinkService;
pub use qr_service::QrService;
pub use redirect_service::RedirectService;
pub use redirection_limit_service::RedirectionLimitService;
pub use url_check_service::UrlCheckService;
