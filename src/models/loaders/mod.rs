pub mod locale_loader;

pub use locale_loader::{
    list_files, load_all_locale_files, load_locale_file, write_locale_file, LocaleFile,
};
