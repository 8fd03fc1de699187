// Resume-to-job matching.
// Hard match (deterministic skill overlap) + semantic match (LLM) → combined score and verdict.
// All model calls go through the `TextGenerator` held by `SemanticAnalyzer`.

pub mod candidate;
pub mod combiner;
pub mod handlers;
pub mod hard_match;
pub mod pipeline;
pub mod prompts;
pub mod semantic;
pub mod structured;
pub mod vocabulary;
