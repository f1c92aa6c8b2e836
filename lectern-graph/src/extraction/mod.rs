//! Triplet extraction helpers: parsing LLM-style JSON responses and adapting a
//! text-completion function into an `ITripletExtractor`.

pub mod prompted;
pub mod response_parser;

pub use prompted::PromptedExtractor;
pub use response_parser::parse_triplet_response;
