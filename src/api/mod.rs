pub mod process;
pub mod statics;

pub use process::{handle_process_image, ProcessImageForm, __path_handle_process_image};
pub use statics::{handle_index, handle_manifest, handle_service_worker, handle_static_asset};
