use std::collections::BTreeMap;
use std::fmt;

use crate::domain::validation::ValidationError;
use crate::domain::value::ProviderKey;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Email-to-SMS (or MMS) gateway domain suffix, e.g. `vtext.com`.
///
/// Invariant: non-empty after trimming.
pub struct GatewayDomain(String);

impl GatewayDomain {
    pub const FIELD: &'static str = "gateway domain";

    /// Create a validated [`GatewayDomain`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated domain.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One carrier's gateway domains.
///
/// The `sms` domain is what the send path appends to the destination number.
/// The `mms` domain is carried for completeness; the send path does not use it.
pub struct GatewayRecord {
    sms: GatewayDomain,
    mms: Option<GatewayDomain>,
}

impl GatewayRecord {
    /// Create a record with an SMS domain and an optional MMS domain.
    pub fn new(sms: GatewayDomain, mms: Option<GatewayDomain>) -> Self {
        Self { sms, mms }
    }

    /// The SMS gateway domain.
    pub fn sms(&self) -> &GatewayDomain {
        &self.sms
    }

    /// The MMS gateway domain, if the carrier has one.
    pub fn mms(&self) -> Option<&GatewayDomain> {
        self.mms.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Lookup failure for a provider key absent from the directory.
///
/// Carries only the requested key and the number of registered providers; the
/// full key set is left to the logging layer.
pub struct ProviderNotFound {
    pub provider: String,
    pub known_providers: usize,
}

impl fmt::Display for ProviderNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown provider: {} ({} providers registered)",
            self.provider, self.known_providers
        )
    }
}

impl std::error::Error for ProviderNotFound {}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable mapping from provider key to gateway record.
///
/// Built once (at process start, typically) and read for the life of the
/// process; concurrent reads need no synchronization. Keys are case-sensitive.
pub struct GatewayDirectory {
    entries: BTreeMap<ProviderKey, GatewayRecord>,
}

impl GatewayDirectory {
    /// Build a directory from explicit entries. Later duplicates win.
    pub fn from_entries(entries: impl IntoIterator<Item = (ProviderKey, GatewayRecord)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The built-in US carrier table.
    pub fn builtin() -> Self {
        fn entry(key: &str, sms: &str, mms: Option<&str>) -> (ProviderKey, GatewayRecord) {
            let key = ProviderKey::new(key).expect("builtin provider key");
            let sms = GatewayDomain::new(sms).expect("builtin sms domain");
            let mms = mms.map(|it| GatewayDomain::new(it).expect("builtin mms domain"));
            (key, GatewayRecord::new(sms, mms))
        }

        Self::from_entries([
            entry("att", "txt.att.net", Some("mms.att.net")),
            entry("boost", "sms.myboostmobile.com", Some("myboostmobile.com")),
            entry("cricket", "sms.cricketwireless.net", Some("mms.cricketwireless.net")),
            entry("googlefi", "msg.fi.google.com", None),
            entry("metropcs", "mymetropcs.com", Some("mymetropcs.com")),
            entry("sprint", "messaging.sprintpcs.com", Some("pm.sprint.com")),
            entry("tmobile", "tmomail.net", Some("tmomail.net")),
            entry("uscellular", "email.uscc.net", Some("mms.uscc.net")),
            entry("verizon", "vtext.com", Some("vzwpix.com")),
            entry("virgin", "vmobl.com", Some("vmpix.com")),
        ])
    }

    /// Resolve a provider key to its gateway record.
    ///
    /// Pure read; a miss is always [`ProviderNotFound`] and nothing else.
    pub fn lookup(&self, provider: &ProviderKey) -> Result<&GatewayRecord, ProviderNotFound> {
        self.entries.get(provider).ok_or_else(|| ProviderNotFound {
            provider: provider.as_str().to_owned(),
            known_providers: self.entries.len(),
        })
    }

    /// Registered provider keys, in sorted order.
    pub fn providers(&self) -> impl Iterator<Item = &ProviderKey> {
        self.entries.keys()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_records_all_have_non_empty_sms_domains() {
        let directory = GatewayDirectory::builtin();
        assert!(!directory.is_empty());
        for provider in directory.providers() {
            let record = directory.lookup(provider).unwrap();
            assert!(
                !record.sms().as_str().trim().is_empty(),
                "empty sms domain for {}",
                provider.as_str()
            );
        }
    }

    #[test]
    fn builtin_resolves_known_carriers() {
        let directory = GatewayDirectory::builtin();
        let verizon = directory
            .lookup(&ProviderKey::new("verizon").unwrap())
            .unwrap();
        assert_eq!(verizon.sms().as_str(), "vtext.com");
        assert_eq!(verizon.mms().map(GatewayDomain::as_str), Some("vzwpix.com"));

        let fi = directory
            .lookup(&ProviderKey::new("googlefi").unwrap())
            .unwrap();
        assert_eq!(fi.sms().as_str(), "msg.fi.google.com");
        assert!(fi.mms().is_none());
    }

    #[test]
    fn lookup_miss_reports_key_and_known_count() {
        let directory = GatewayDirectory::builtin();
        let err = directory
            .lookup(&ProviderKey::new("unknown_carrier").unwrap())
            .unwrap_err();
        assert_eq!(err.provider, "unknown_carrier");
        assert_eq!(err.known_providers, directory.len());
        assert_eq!(
            err.to_string(),
            format!(
                "unknown provider: unknown_carrier ({} providers registered)",
                directory.len()
            )
        );
    }

    #[test]
    fn keys_are_case_sensitive() {
        let directory = GatewayDirectory::builtin();
        assert!(directory
            .lookup(&ProviderKey::new("Verizon").unwrap())
            .is_err());
    }

    #[test]
    fn from_entries_last_duplicate_wins() {
        let key = ProviderKey::new("test").unwrap();
        let first = GatewayRecord::new(GatewayDomain::new("first.example").unwrap(), None);
        let second = GatewayRecord::new(GatewayDomain::new("second.example").unwrap(), None);

        let directory =
            GatewayDirectory::from_entries([(key.clone(), first), (key.clone(), second)]);
        assert_eq!(directory.len(), 1);
        assert_eq!(
            directory.lookup(&key).unwrap().sms().as_str(),
            "second.example"
        );
    }

    #[test]
    fn empty_directory_misses_with_zero_known() {
        let directory = GatewayDirectory::from_entries(std::iter::empty());
        let err = directory
            .lookup(&ProviderKey::new("verizon").unwrap())
            .unwrap_err();
        assert_eq!(err.known_providers, 0);
    }
}
