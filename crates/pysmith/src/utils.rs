pub mod cmd;
pub mod log;
pub mod which;
