pub mod protocol;

pub use protocol::{DrawRecord, EncodedFrame, ProtocolLayout};
