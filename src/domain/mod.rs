//! Domain layer: strong types with validation and invariants (no I/O).

mod gateway;
mod outgoing;
mod receipt;
mod validation;
mod value;

pub use gateway::{GatewayDirectory, GatewayDomain, GatewayRecord, ProviderNotFound};
pub use outgoing::{OutgoingMessage, SUBJECT_PREFIX};
pub use receipt::DeliveryReceipt;
pub use validation::ValidationError;
pub use value::{
    ApiKey, Destination, MAX_MESSAGE_CHARS, MessageBody, PhoneNumber, ProviderKey, SenderAddress,
};
