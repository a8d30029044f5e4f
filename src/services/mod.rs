pub mod key_tree;
pub mod mock_translator;
pub mod translation_port;

pub use key_tree::{count_leaves, flatten, rebuild};
pub use mock_translator::MockTranslator;
pub use translation_port::TranslationPort;
