use crate::error::{KavachError, Result};
use crate::types::{ComboSignal, FieldKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Known UPI provider/bank suffixes accepted after the `@`.
pub const DEFAULT_PAYMENT_HANDLES: &[&str] = &[
    "upi", "ybl", "ibl", "paytm", "okhdfcbank", "okaxis", "oksbi", "okicici", "axisbank",
    "hdfcbank", "sbi", "icici", "fbl", "airtel", "apl", "yapl", "kbl", "axl",
];

pub const DEFAULT_ADDRESS_MARKERS: &[&str] = &[
    "street", "st.", "road", "rd", "lane", "ln", "avenue", "ave", "block", "sector", "near", "opp",
    "apartment", "society", "floor",
];

/// Number of distinct combinational signals that makes a record PII.
pub const DEFAULT_COMBO_THRESHOLD: usize = 2;

/// Device/IP value that means "unknown" and never counts as a signal.
pub const DEFAULT_DEVICE_PLACEHOLDER: &str = "0.0.0.0";

/// Tunables for the address-likeness check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressHeuristic {
    /// Substrings of the lower-cased text that mark a locality
    pub markers: Vec<String>,
    /// Comma-count fallback: at least this many commas...
    pub min_commas: usize,
    /// ...and at least this many characters
    pub min_len: usize,
}

impl Default for AddressHeuristic {
    fn default() -> Self {
        Self {
            markers: DEFAULT_ADDRESS_MARKERS.iter().map(|m| m.to_string()).collect(),
            min_commas: 2,
            min_len: 10,
        }
    }
}

/// Detection policy – defines WHICH fields are inspected and the heuristic constants
/// of the combinational rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionPolicy {
    /// Roles that may produce a standalone hit
    enabled_kinds: BTreeSet<FieldKind>,

    /// Lower-cased field names per role
    aliases: BTreeMap<FieldKind, BTreeSet<String>>,

    /// Allow-listed payment handle suffixes (lower-cased)
    payment_handles: BTreeSet<String>,

    address: AddressHeuristic,

    combo_threshold: usize,

    device_placeholder: String,
}

impl Default for DetectionPolicy {
    fn default() -> Self {
        let aliases = FieldKind::ALL
            .into_iter()
            .map(|kind| {
                let names: BTreeSet<String> =
                    kind.default_aliases().iter().map(|a| a.to_string()).collect();
                (kind, names)
            })
            .collect();

        Self {
            enabled_kinds: FieldKind::ALL.into_iter().collect(),
            aliases,
            payment_handles: DEFAULT_PAYMENT_HANDLES.iter().map(|h| h.to_string()).collect(),
            address: AddressHeuristic::default(),
            combo_threshold: DEFAULT_COMBO_THRESHOLD,
            device_placeholder: DEFAULT_DEVICE_PLACEHOLDER.to_string(),
        }
    }
}

impl DetectionPolicy {
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Load a policy from JSON; keys left out keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let policy: DetectionPolicy = serde_json::from_str(text)
            .map_err(|e| KavachError::InvalidPolicy(e.to_string()))?;
        let policy = policy.normalized();
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<()> {
        let max = ComboSignal::ALL.len();
        if !(1..=max).contains(&self.combo_threshold) {
            return Err(KavachError::InvalidPolicy(format!(
                "combo_threshold must be between 1 and {max}, got {}",
                self.combo_threshold
            )));
        }
        Ok(())
    }

    /// Standalone role for a field name, compared case-insensitively
    pub fn kind_for_field(&self, field: &str) -> Option<FieldKind> {
        let field = field.to_lowercase();
        FieldKind::ALL.into_iter().find(|kind| {
            self.is_enabled(*kind)
                && self
                    .aliases
                    .get(kind)
                    .is_some_and(|names| names.contains(&field))
        })
    }

    pub fn is_enabled(&self, kind: FieldKind) -> bool {
        self.enabled_kinds.contains(&kind)
    }

    pub fn payment_handles(&self) -> &BTreeSet<String> {
        &self.payment_handles
    }

    pub fn address(&self) -> &AddressHeuristic {
        &self.address
    }

    pub fn combo_threshold(&self) -> usize {
        self.combo_threshold
    }

    pub fn device_placeholder(&self) -> &str {
        &self.device_placeholder
    }

    fn normalized(mut self) -> Self {
        for names in self.aliases.values_mut() {
            *names = names.iter().map(|n| n.to_lowercase()).collect();
        }
        self.payment_handles = self.payment_handles.iter().map(|h| h.to_lowercase()).collect();
        self.address.markers = self.address.markers.iter().map(|m| m.to_lowercase()).collect();
        self
    }
}

/// Builder for DetectionPolicy – enables fluent configuration
#[derive(Default)]
pub struct PolicyBuilder {
    policy: DetectionPolicy,
}

impl PolicyBuilder {
    pub fn enable(mut self, kind: FieldKind) -> Self {
        self.policy.enabled_kinds.insert(kind);
        self
    }

    pub fn disable(mut self, kind: FieldKind) -> Self {
        self.policy.enabled_kinds.remove(&kind);
        self
    }

    /// Add an extra field name for a role (e.g. "whatsapp" for phone)
    pub fn with_alias(mut self, kind: FieldKind, alias: &str) -> Self {
        self.policy
            .aliases
            .entry(kind)
            .or_default()
            .insert(alias.to_string());
        self
    }

    pub fn with_payment_handles(mut self, handles: Vec<&str>) -> Self {
        self.policy.payment_handles = handles.into_iter().map(String::from).collect();
        self
    }

    pub fn with_address_markers(mut self, markers: Vec<&str>) -> Self {
        self.policy.address.markers = markers.into_iter().map(String::from).collect();
        self
    }

    pub fn combo_threshold(mut self, threshold: usize) -> Self {
        self.policy.combo_threshold = threshold;
        self
    }

    pub fn device_placeholder(mut self, placeholder: &str) -> Self {
        self.policy.device_placeholder = placeholder.to_string();
        self
    }

    /// Lower-cases names and checks the threshold range
    pub fn build(self) -> Result<DetectionPolicy> {
        let policy = self.policy.normalized();
        policy.validate()?;
        Ok(policy)
    }
}
