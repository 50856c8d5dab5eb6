//! Event publishing adapters and event handlers.

mod in_process;
mod send_to_encoder;

pub use in_process::{HandlerRegistry, InProcessEventPublisher};
pub use send_to_encoder::{SendToEncoderHandler, VideoEncodingRequested};
