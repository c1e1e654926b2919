mod manager;
mod save_file;

pub use manager::{SaveStore, StoreConfig};
pub use save_file::SaveFile;
