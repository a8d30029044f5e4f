pub mod pass_ctx;
pub mod translation_flow;

pub use pass_ctx::{PassCtx, PassState};
pub use translation_flow::{PassResult, TranslationFlow};
