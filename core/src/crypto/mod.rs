pub mod types;
pub mod kdf;
pub mod cipher;
pub mod integrity;

pub use types::*;
pub use kdf::*;
pub use cipher::*;
pub use integrity::*;
