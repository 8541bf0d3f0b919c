mod config;
mod transport;

pub use self::config::Config;
pub use self::transport::Transport;
