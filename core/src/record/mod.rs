//! Wire format for one encrypted unit.
//!
//! Responsibilities:
//! - Define the record header, owned/borrowed records and limits
//! - Encode units into the canonical byte layout
//! - Decode records with strict length validation
//!
//! Non-responsibilities:
//! - Cryptography
//! - Chaos state generation
//! - IO

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    FrameBuffer,
    Record,
    RecordError,
    RecordHeader,
    RecordLayout,
    RecordLimits,
    RecordView,
};
pub use encode::{encode_record, encode_record_header};
pub use decode::{decode_record, decode_record_with_limits, inspect_record, parse_record_header};
