pub mod init;
pub mod pack;
pub mod unpack;

pub use pack::{handle_pack, PackConfig};
pub use unpack::{handle_unpack, UnpackConfig};

use crate::errors::CodecError;
use tracing::warn;

/// Point out that a strict-mode refusal would have succeeded without `--strict`.
fn warn_on_strict_rejection(error: &CodecError) {
    if error.is_strict_rejection() {
        warn!("rerun without --strict to accept widened fields");
    }
}
