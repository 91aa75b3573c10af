use crate::domain::gateway::GatewayRecord;
use crate::domain::value::{Destination, MessageBody, ProviderKey, SenderAddress};

/// Prefix of the subject line composed for every outgoing message.
pub const SUBJECT_PREFIX: &str = "Telefio sms from ";

#[derive(Debug, Clone, PartialEq, Eq)]
/// One outgoing SMS, built per send request and used exactly once.
///
/// The destination stays raw until delivery; only then is it combined with
/// the gateway domain the provider key resolves to.
pub struct OutgoingMessage {
    from: SenderAddress,
    to: Destination,
    provider: ProviderKey,
    message: MessageBody,
}

impl OutgoingMessage {
    pub fn new(
        from: SenderAddress,
        to: Destination,
        provider: ProviderKey,
        message: MessageBody,
    ) -> Self {
        Self {
            from,
            to,
            provider,
            message,
        }
    }

    pub fn from(&self) -> &SenderAddress {
        &self.from
    }

    pub fn to(&self) -> &Destination {
        &self.to
    }

    pub fn provider(&self) -> &ProviderKey {
        &self.provider
    }

    pub fn message(&self) -> &MessageBody {
        &self.message
    }

    /// The full email address for the destination: `to` + `@` + sms domain,
    /// with no transformation of `to`.
    pub fn rendered_to(&self, record: &GatewayRecord) -> String {
        format!("{}@{}", self.to.raw(), record.sms().as_str())
    }

    /// The fixed-format subject line: [`SUBJECT_PREFIX`] followed by the
    /// sender address verbatim.
    pub fn subject(&self) -> String {
        format!("{SUBJECT_PREFIX}{}", self.from.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::gateway::GatewayDomain;

    use super::*;

    fn message(to: &str, body: &str) -> OutgoingMessage {
        OutgoingMessage::new(
            SenderAddress::new("alerts@telefio.com").unwrap(),
            Destination::new(to).unwrap(),
            ProviderKey::new("verizon").unwrap(),
            MessageBody::new(body),
        )
    }

    #[test]
    fn rendered_to_is_exact_concatenation() {
        let record = GatewayRecord::new(GatewayDomain::new("vtext.com").unwrap(), None);
        assert_eq!(
            message("5551234567", "Hello").rendered_to(&record),
            "5551234567@vtext.com"
        );
    }

    #[test]
    fn rendered_to_does_not_touch_the_destination() {
        let record = GatewayRecord::new(GatewayDomain::new("example.net").unwrap(), None);
        assert_eq!(
            message("00-55x", "Hello").rendered_to(&record),
            "00-55x@example.net"
        );
    }

    #[test]
    fn subject_embeds_the_sender_address() {
        assert_eq!(
            message("5551234567", "Hello").subject(),
            "Telefio sms from alerts@telefio.com"
        );
    }
}
