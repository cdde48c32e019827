// Commands module: one file per subcommand

pub mod install;
pub mod list;
pub mod status;
pub mod uninstall;
