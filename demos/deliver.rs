use std::io;

use telesms::{
    Destination, GatewayDirectory, MessageBody, OutgoingMessage, ProviderKey, SenderAddress,
    TelesmsClient,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let from = std::env::var("TELESMS_FROM").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELESMS_FROM environment variable is required",
        )
    })?;
    let to = std::env::var("TELESMS_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELESMS_TO environment variable is required",
        )
    })?;
    let provider = std::env::var("TELESMS_PROVIDER").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "TELESMS_PROVIDER environment variable is required",
        )
    })?;
    let message = std::env::var("TELESMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the telesms demo.".to_owned());

    let client = TelesmsClient::from_env(GatewayDirectory::builtin())?;
    let outgoing = OutgoingMessage::new(
        SenderAddress::new(from)?,
        Destination::new(to)?,
        ProviderKey::new(provider)?,
        MessageBody::new(message),
    );

    let receipt = client.deliver(outgoing).await?;
    println!(
        "status: {}, message_id: {:?}",
        receipt.status, receipt.message_id
    );

    Ok(())
}
