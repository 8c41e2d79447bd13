pub mod auth_handler;
pub mod quiz_handler;
pub mod results_handler;
pub mod sop_handler;
pub mod user_handler;

pub use auth_handler::{health_check, login};
pub use quiz_handler::{get_active_quiz, start_quiz, submit_quiz};
pub use results_handler::{get_all_results, get_user_results};
pub use sop_handler::{delete_sop, get_sop, list_sops, upload_sop};
pub use user_handler::{create_user, delete_user, get_all_users, update_user};
