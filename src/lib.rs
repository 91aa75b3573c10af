//! Send SMS messages through carrier email-to-SMS gateways via the SendGrid
//! mail API.
//!
//! A carrier gateway turns an email sent to `number@carrier-domain` into an
//! SMS. This crate keeps an immutable [`GatewayDirectory`] of carrier domains,
//! renders the destination address, truncates the body to what a gateway
//! reliably accepts, and issues exactly one `mail/send` request per delivery.
//!
//! ```rust,no_run
//! use telesms::{
//!     ApiKey, Destination, GatewayDirectory, MessageBody, OutgoingMessage, ProviderKey,
//!     SenderAddress, TelesmsClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), telesms::TelesmsError> {
//!     let client = TelesmsClient::new(ApiKey::new("SG....")?, GatewayDirectory::builtin());
//!     let message = OutgoingMessage::new(
//!         SenderAddress::new("alerts@telefio.com")?,
//!         Destination::new("5551234567")?,
//!         ProviderKey::new("verizon")?,
//!         MessageBody::new("Hello"),
//!     );
//!     let receipt = client.deliver(message).await?;
//!     println!("accepted with status {}", receipt.status);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{ConfigError, TelesmsClient, TelesmsClientBuilder, TelesmsError};
pub use domain::{
    ApiKey, DeliveryReceipt, Destination, GatewayDirectory, GatewayDomain, GatewayRecord,
    MAX_MESSAGE_CHARS, MessageBody, OutgoingMessage, PhoneNumber, ProviderKey, ProviderNotFound,
    SUBJECT_PREFIX, SenderAddress, ValidationError,
};
