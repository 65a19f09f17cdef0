use serde::{Deserialize, Serialize};

/// Fixed placeholder for values that are sensitive but have no partial mask.
pub const SENTINEL: &str = "[REDACTED_PII]";

/// A scanned record: field name to JSON value, in source order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Field roles whose value alone is PII when it has the right shape.
///
/// Design principles:
/// - Strict shape match only (digit counts, fixed grammar, allow-listed suffixes)
/// - No heap allocations in enum (all variants are `Copy`)
/// - Each role is recognised by field name aliases, see [`FieldKind::default_aliases`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Phone,
    NationalId, // 12-digit Aadhaar
    Passport,
    PaymentHandle, // UPI virtual payment address
}

impl FieldKind {
    /// Evaluation order for fields that could match more than one role.
    pub const ALL: [FieldKind; 4] = [
        Self::Phone,
        Self::NationalId,
        Self::Passport,
        Self::PaymentHandle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Phone => "phone number",
            Self::NationalId => "national ID",
            Self::Passport => "passport number",
            Self::PaymentHandle => "payment handle",
        }
    }

    /// Lower-cased field names that carry this role unless a policy overrides them
    pub fn default_aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Phone => &["phone", "contact", "mobile", "alt_phone", "alt_contact"],
            Self::NationalId => &["aadhar", "aadhaar"],
            Self::Passport => &["passport"],
            Self::PaymentHandle => &["upi_id", "upi", "vpa"],
        }
    }
}

/// Weak indicators that only count as PII when enough of them co-occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboSignal {
    FullName,
    Email,
    Address,
    DeviceOrIp,
}

impl ComboSignal {
    pub const ALL: [ComboSignal; 4] = [
        Self::FullName,
        Self::Email,
        Self::Address,
        Self::DeviceOrIp,
    ];

    pub fn canonical_fields(&self) -> &'static [&'static str] {
        match self {
            Self::FullName => &["name"],
            Self::Email => &["email"],
            Self::Address => &["address"],
            Self::DeviceOrIp => &["ip_address", "device_id"],
        }
    }

    /// Signal carried by a lower-cased field name, if any
    pub fn for_field(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|signal| signal.canonical_fields().contains(&name))
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::FullName => 0,
            Self::Email => 1,
            Self::Address => 2,
            Self::DeviceOrIp => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_kind_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<FieldKind>();
        assert_copy::<ComboSignal>();
    }

    #[test]
    fn test_default_aliases_are_disjoint() {
        let mut seen = HashSet::new();
        for kind in FieldKind::ALL {
            for alias in kind.default_aliases() {
                assert!(seen.insert(*alias), "alias {alias} claimed by two roles");
            }
        }
    }

    #[test]
    fn test_combo_fields_do_not_overlap_standalone_aliases() {
        for signal in ComboSignal::ALL {
            for field in signal.canonical_fields() {
                assert!(FieldKind::ALL
                    .iter()
                    .all(|kind| !kind.default_aliases().contains(field)));
            }
        }
    }

    #[test]
    fn test_for_field() {
        assert_eq!(ComboSignal::for_field("name"), Some(ComboSignal::FullName));
        assert_eq!(ComboSignal::for_field("device_id"), Some(ComboSignal::DeviceOrIp));
        assert_eq!(ComboSignal::for_field("ip_address"), Some(ComboSignal::DeviceOrIp));
        assert_eq!(ComboSignal::for_field("phone"), None);
    }

    #[test]
    fn test_signal_indices_unique() {
        let indices: HashSet<_> = ComboSignal::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices.len(), ComboSignal::ALL.len());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&FieldKind::PaymentHandle).unwrap(),
            "\"payment_handle\""
        );
        let kind: FieldKind = serde_json::from_str("\"national_id\"").unwrap();
        assert_eq!(kind, FieldKind::NationalId);
    }
}
