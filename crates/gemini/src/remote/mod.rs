pub mod gemini_client;
pub mod generate_request;
pub mod generate_response;

pub use gemini_client::GeminiClient;
pub use generate_request::GenerateContentRequest;
pub use generate_response::{ApiErrorResponse, GenerateContentResponse};
