pub mod format;
pub mod loaders;
pub mod translation;

pub use format::FileFormat;
pub use loaders::{list_files, load_all_locale_files, load_locale_file, write_locale_file, LocaleFile};
pub use translation::{TranslationRequest, TranslationResponse, TranslationStats};
