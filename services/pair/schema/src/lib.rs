//! sea-orm entities for the pair service tables.

pub mod game_answers;
pub mod game_questions;
pub mod missyou;
pub mod notifications_logs;
pub mod partnerships;
pub mod users;
