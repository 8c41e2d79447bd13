pub mod completion_client;
pub mod package_service;
pub mod quiz_gen_service;
pub mod quiz_runner;
pub mod sop_service;
pub mod user_service;
pub mod weak_areas;

pub use completion_client::{CompletionClient, GroqCompletionClient};
pub use package_service::PackageService;
pub use quiz_gen_service::QuizGenService;
pub use quiz_runner::QuizRunner;
pub use sop_service::SopService;
pub use user_service::UserService;
