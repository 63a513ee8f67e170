pub mod account_service;
pub mod account_service_impl;
pub mod directory_service;
pub mod directory_service_impl;

pub use account_service::{AccountError, AccountService, LoginOutcome};
pub use account_service_impl::SeaOrmAccountService;
pub use directory_service::{DirectoryError, DirectoryService};
pub use directory_service_impl::SeaOrmDirectoryService;
