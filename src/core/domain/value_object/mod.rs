mod auth_token;
mod console_host;
mod console_port;
mod console_url;

pub use auth_token::AuthToken;
pub use console_host::ConsoleHost;
pub use console_port::ConsolePort;
pub use console_url::ConsoleUrl;
