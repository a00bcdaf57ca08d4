mod engines;
mod login;
mod logout;
mod options;
mod serve;
mod status;

pub use engines::run_engines;
pub use login::run_login;
pub use logout::run_logout;
pub use options::run_options;
pub use serve::run_serve;
pub use status::run_status;
