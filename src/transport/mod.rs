//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod mail_send;

pub use mail_send::{
    ApiErrorDetail, TEXT_PLAIN, decode_mail_send_error_body, encode_mail_send_json,
};
