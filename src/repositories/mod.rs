pub mod access_settings_repository;
pub mod allow_list_repository;

pub use access_settings_repository::{AccessSettingsRepository, MongoAccessSettingsRepository};
pub use allow_list_repository::{AllowListRepository, MongoAllowListRepository};
