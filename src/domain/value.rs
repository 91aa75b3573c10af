use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SendGrid API key used as the bearer credential for `mail/send`.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Environment variable the key is conventionally read from.
    pub const ENV_VAR: &'static str = "SENDGRID_API_KEY";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::ENV_VAR,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender email address (`from`).
///
/// Invariant: non-empty after trimming. The address is used verbatim both as
/// the mail sender and inside the composed subject line.
pub struct SenderAddress(String);

impl SenderAddress {
    /// JSON field name used by the mail API (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Raw destination number (`to`), not yet combined with a gateway domain.
///
/// Invariant: non-empty after trimming. The content is otherwise trusted as
/// given; no digit check, no normalization. If you want E.164 normalization,
/// parse into [`PhoneNumber`] and convert it into [`Destination`].
pub struct Destination(String);

impl Destination {
    /// JSON field name used by the mail API (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) destination.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value, exactly as it will appear before the `@`.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Destination {
    /// Convert an already-parsed phone number to the digits-only form carrier
    /// gateways accept (E.164 without the leading `+`).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164.trim_start_matches('+').to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Key into the gateway directory selecting a carrier.
///
/// Invariant: non-empty after trimming. Keys are case-sensitive.
pub struct ProviderKey(String);

impl ProviderKey {
    pub const FIELD: &'static str = "provider";

    /// Create a validated [`ProviderKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Maximum number of characters a gateway is assumed to accept in one message.
pub const MAX_MESSAGE_CHARS: usize = 140;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Free-form message body.
///
/// Arbitrary length (including empty) at construction time; truncation to
/// [`MAX_MESSAGE_CHARS`] happens at send time via [`MessageBody::sanitized`].
pub struct MessageBody(String);

impl MessageBody {
    /// JSON field name used by the mail API (`content`).
    pub const FIELD: &'static str = "content";

    /// Create a message body. Any string is accepted, empty included.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the body as provided, untruncated.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first [`MAX_MESSAGE_CHARS`] characters of the body.
    ///
    /// The cut falls on a `char` boundary, so multi-byte characters are never
    /// split. Shorter bodies pass through unchanged, and the operation is
    /// idempotent.
    pub fn sanitized(&self) -> &str {
        match self.0.char_indices().nth(MAX_MESSAGE_CHARS) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    pub const FIELD: &'static str = "to";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let key = ApiKey::new("  SG.abc ").unwrap();
        assert_eq!(key.as_str(), "SG.abc");
        assert!(ApiKey::new("  ").is_err());

        let from = SenderAddress::new(" alerts@telefio.com ").unwrap();
        assert_eq!(from.as_str(), "alerts@telefio.com");
        assert!(SenderAddress::new("").is_err());

        let to = Destination::new(" 5551234567 ").unwrap();
        assert_eq!(to.raw(), "5551234567");
        assert!(Destination::new("  ").is_err());

        let provider = ProviderKey::new(" verizon ").unwrap();
        assert_eq!(provider.as_str(), "verizon");
        assert!(ProviderKey::new("").is_err());
    }

    #[test]
    fn destination_content_is_not_inspected() {
        // The adapter trusts the caller; anything non-empty is accepted.
        let to = Destination::new("not-a-number").unwrap();
        assert_eq!(to.raw(), "not-a-number");
    }

    #[test]
    fn message_body_accepts_empty_and_preserves_input() {
        let body = MessageBody::new("");
        assert_eq!(body.as_str(), "");
        assert_eq!(body.sanitized(), "");

        let body = MessageBody::new(" hi ");
        assert_eq!(body.as_str(), " hi ");
        assert_eq!(body.sanitized(), " hi ");
    }

    #[test]
    fn sanitized_truncates_to_140_chars() {
        let body = MessageBody::new("x".repeat(200));
        assert_eq!(body.sanitized().chars().count(), MAX_MESSAGE_CHARS);
        assert_eq!(body.sanitized(), "x".repeat(140));
    }

    #[test]
    fn sanitized_is_a_prefix_and_idempotent() {
        let long = "abcdefghij".repeat(25);
        let body = MessageBody::new(long.clone());
        let once = body.sanitized();
        assert!(long.starts_with(once));

        let twice = MessageBody::new(once).sanitized().to_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn sanitized_counts_chars_not_bytes() {
        // 150 snowmen: 450 bytes, 150 chars. The cut must land between chars.
        let body = MessageBody::new("☃".repeat(150));
        let sanitized = body.sanitized();
        assert_eq!(sanitized.chars().count(), MAX_MESSAGE_CHARS);
        assert_eq!(sanitized, "☃".repeat(140));
    }

    #[test]
    fn sanitized_leaves_exactly_140_chars_untouched() {
        let exact = "y".repeat(140);
        let body = MessageBody::new(exact.clone());
        assert_eq!(body.sanitized(), exact);
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(Some(country::Id::US), "+15551234567").unwrap();
        let p2 = PhoneNumber::parse(Some(country::Id::US), "+1 555 123-4567").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+15551234567");

        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
        assert!(PhoneNumber::parse(None, "   ").is_err());
    }

    #[test]
    fn destination_from_phone_number_strips_the_plus() {
        let pn = PhoneNumber::parse(Some(country::Id::US), "555-123-4567").unwrap();
        let to: Destination = pn.into();
        assert_eq!(to.raw(), "15551234567");
    }
}
