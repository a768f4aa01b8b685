pub mod config;
pub mod fence;
pub mod prompt;
pub mod remote;
pub mod services;
pub mod traits;
pub mod validator;

pub use config::GeminiConfig;
pub use remote::GeminiClient;
pub use services::signal_agent::{SignalAgent, fetch_signal};
pub use traits::TextGenerator;
pub use validator::validate;
