pub mod chat;
pub mod email;
pub mod health;
pub mod history;
pub mod tasks;
pub mod xp;

pub use chat::ask;
pub use email::draft_email;
pub use health::health;
pub use history::{clear_history, get_history};
pub use tasks::create_tasks;
pub use xp::xp_update;
