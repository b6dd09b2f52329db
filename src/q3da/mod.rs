//! The q3da module contains the decoder for Q3DA ASCII meter telegrams:
//! line tokenization into OBIS records and the streaming telegram
//! synchronizer. Unlike SML, the wire format defines no checksum; a
//! telegram only has to clear a 2-byte minimum length.

pub mod receiver;
pub mod telegram;

pub use receiver::{Q3daReceiver, Q3daReceiverStats};
pub use telegram::{decode_telegram, parse_line, Q3daTelegram};
