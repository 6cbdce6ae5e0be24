mod bridge_process_runner;
mod wsl_path_translator;

pub use bridge_process_runner::{BridgeProcessRunner, DEFAULT_BRIDGE_PROGRAM, DEFAULT_SHELL};
pub use wsl_path_translator::{DEFAULT_MOUNT_ROOT, WslPathTranslator};
