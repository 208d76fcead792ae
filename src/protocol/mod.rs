//! Wire protocol spoken with the translation server.

mod codec;
mod message;

pub use codec::{MAX_MESSAGE_SIZE, MultipartCodec};
pub use message::{TranslationRequest, TranslationResponse};
