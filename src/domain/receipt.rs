#[derive(Debug, Clone, PartialEq, Eq)]
/// Success result of a delivery, carrying what the mail API returned.
///
/// The mail API normally answers `202 Accepted` with an empty body and an
/// `X-Message-Id` header; all three pieces are preserved for diagnostics.
pub struct DeliveryReceipt {
    pub status: u16,
    pub message_id: Option<String>,
    pub body: Option<String>,
}
