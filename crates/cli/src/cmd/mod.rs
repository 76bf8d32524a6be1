mod build;
mod configure;
mod info;
mod package;
mod package_info;

pub use build::cmd_build;
pub use configure::cmd_configure;
pub use info::cmd_info;
pub use package::cmd_package;
pub use package_info::cmd_package_info;
