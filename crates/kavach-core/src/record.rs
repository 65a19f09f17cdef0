use crate::{
    detector::looks_like_address,
    policy::DetectionPolicy,
    redactor::{mask_email, mask_name},
    types::{ComboSignal, FieldKind, Record, SENTINEL},
};
use serde_json::Value;
use tracing::{debug, trace};
use zeroize::Zeroizing;

/// Why a field was masked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitReason {
    Standalone(FieldKind),
    Combination(ComboSignal),
}

/// A masked field. Carries the field name only, never the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHit {
    pub field: String,
    pub reason: HitReason,
}

/// Outcome of classifying one record
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Same keys in the same order as the input; only matched values differ
    pub redacted: Record,
    pub is_pii: bool,
    pub hits: Vec<FieldHit>,
}

/// Per-field result of the first pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Standalone(FieldKind),
    Signal(ComboSignal),
    Clear,
}

/// Text form used for matching: strings as-is, null as empty, anything else as JSON.
fn render(value: &Value) -> Zeroizing<String> {
    Zeroizing::new(match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Core record engine – standalone shape checks per field, then the
/// combinational rule across the whole record
#[derive(Debug, Clone, Default)]
pub struct RecordClassifier {
    policy: DetectionPolicy,
}

impl RecordClassifier {
    pub fn new(policy: DetectionPolicy) -> Self {
        Self { policy }
    }

    /// Classify and redact one record. Never fails: a value of the wrong shape is
    /// simply not a match.
    pub fn classify(&self, record: &Record) -> Classification {
        // Pass 1: verdicts over the untouched input
        let verdicts: Vec<Verdict> = record
            .iter()
            .map(|(field, value)| self.verdict(field, value))
            .collect();

        let mut active = [false; ComboSignal::ALL.len()];
        for verdict in &verdicts {
            if let Verdict::Signal(signal) = verdict {
                active[signal.index()] = true;
            }
        }
        let signal_count = active.iter().filter(|a| **a).count();
        let combo_pii = signal_count >= self.policy.combo_threshold();
        let standalone_hit = verdicts
            .iter()
            .any(|v| matches!(v, Verdict::Standalone(_)));

        // Pass 2: build the output from the input and the verdicts
        let mut redacted = Record::with_capacity(record.len());
        let mut hits = Vec::new();
        for ((field, value), verdict) in record.iter().zip(&verdicts) {
            let masked = match *verdict {
                Verdict::Standalone(kind) => {
                    hits.push(FieldHit {
                        field: field.clone(),
                        reason: HitReason::Standalone(kind),
                    });
                    Some(kind.mask(&render(value)))
                }
                Verdict::Signal(signal) if combo_pii => {
                    hits.push(FieldHit {
                        field: field.clone(),
                        reason: HitReason::Combination(signal),
                    });
                    Some(mask_signal(signal, &render(value)))
                }
                _ => None,
            };
            let out = masked.map_or_else(|| value.clone(), Value::String);
            redacted.insert(field.clone(), out);
        }

        let is_pii = standalone_hit || combo_pii;
        debug!(
            fields = record.len(),
            standalone_hit,
            signals = signal_count,
            masked = ?hits.iter().map(|h| h.field.as_str()).collect::<Vec<_>>(),
            is_pii,
            "record classified"
        );

        Classification {
            redacted,
            is_pii,
            hits,
        }
    }

    fn verdict(&self, field: &str, value: &Value) -> Verdict {
        let text = render(value);

        if let Some(kind) = self.policy.kind_for_field(field) {
            if kind.matches(&text, &self.policy) {
                trace!(field, kind = kind.label(), "standalone match");
                return Verdict::Standalone(kind);
            }
        }

        let lower = field.to_lowercase();
        let Some(signal) = ComboSignal::for_field(&lower) else {
            return Verdict::Clear;
        };
        let is_string = value.is_string();
        let active = match signal {
            ComboSignal::FullName => is_string && text.split_whitespace().count() >= 2,
            ComboSignal::Email => is_string && text.contains('@'),
            ComboSignal::Address => looks_like_address(&text, self.policy.address()),
            ComboSignal::DeviceOrIp => {
                !text.is_empty() && text.as_str() != self.policy.device_placeholder()
            }
        };
        if active {
            Verdict::Signal(signal)
        } else {
            Verdict::Clear
        }
    }
}

/// Name and email keep a partial mask; address and device/IP have no safe partial form.
fn mask_signal(signal: ComboSignal, text: &str) -> String {
    match signal {
        ComboSignal::FullName => mask_name(text),
        ComboSignal::Email => mask_email(text),
        ComboSignal::Address | ComboSignal::DeviceOrIp => SENTINEL.to_string(),
    }
}
