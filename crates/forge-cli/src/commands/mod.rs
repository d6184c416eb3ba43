pub mod cookie_options;
pub mod notify;

pub use cookie_options::CookieOptionsCommand;
pub use notify::NotifyCommand;
