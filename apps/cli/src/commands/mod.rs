//! 命令定义和实现

pub mod config;
pub mod profile;
pub mod run;

pub use config::ConfigCommand;
pub use profile::ProfileCommand;
pub use run::RunCommand;
