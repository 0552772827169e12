pub mod access_settings;
pub mod allow_list_entry;
pub mod quiz;
pub use access_settings::AccessSettings;
pub use allow_list_entry::AllowListEntry;
pub use quiz::{Quiz, QuizKind, QuizQuestion};
