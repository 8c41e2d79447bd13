pub mod result_repository;
pub mod sop_repository;
pub mod user_repository;

pub use result_repository::{JsonResultRepository, ResultRepository, ResultsDocument};
pub use sop_repository::{JsonSopRepository, SopRepository};
pub use user_repository::{JsonUserRepository, UserRepository};
