pub mod game;
pub mod missyou;
pub mod notify;
pub mod partnership;
