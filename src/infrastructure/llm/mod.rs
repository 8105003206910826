mod json_response;
mod llm_field_extractor;
mod llm_raters;
mod mock_evaluator;
mod mock_llm_client;
mod openai_client;
mod prompts;

pub use json_response::{clean_json_response, normalize_score, parse_json_object};
pub use llm_field_extractor::LlmFieldExtractor;
pub use llm_raters::{LlmIntroRater, LlmProfileRater};
pub use mock_evaluator::{MockFieldExtractor, MockIntroRater, MockProfileRater};
pub use mock_llm_client::MockLlmClient;
pub use openai_client::OpenAiClient;
