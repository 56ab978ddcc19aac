pub mod codec;
pub mod files;
pub mod kv;

pub use codec::{decode_tasks, encode_tasks, sanitize_tasks, THEME_KEY, TODOS_KEY};
pub use files::{default_data_dir, ensure_dir, init_local_data_dir};
pub use kv::{FileStore, KeyValueStore, MemoryStore, Storage};
