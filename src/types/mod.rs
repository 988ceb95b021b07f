pub mod cmd;
pub mod direction;
pub mod event;
