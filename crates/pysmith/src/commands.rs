pub mod forward;
pub mod freeze;
pub mod guard;
pub mod init;
pub mod install_deps;
pub mod list;
pub mod remove;
pub mod run;
pub mod upgrade;
