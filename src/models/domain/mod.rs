pub mod quiz;
pub mod result_profile;
pub mod sop;
pub mod user;
pub use quiz::{Quiz, QuizQuestion, QuizQuestionType};
pub use result_profile::{HistoryEntry, ResultProfile};
pub use sop::{Sop, TrainingPackage};
pub use user::{User, UserRecord, UserRole};
