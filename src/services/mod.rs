pub mod bulk_service;
pub mod lifecycle_service;
pub mod notifier_service;
