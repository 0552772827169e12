pub mod access_service;
pub mod model_service;
pub mod quiz_service;
