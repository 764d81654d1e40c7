#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod error;
pub mod progress_service;
pub mod user_directory;
pub mod viewer_service;

pub use course_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use error::{AppServicesError, CatalogError, ProgressError, ViewerError};
pub use progress_service::ProgressService;
pub use user_directory::UserDirectory;
pub use viewer_service::{CourseView, ViewerService};
