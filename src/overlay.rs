//! Shared-config overlays.
//!
//! A shared group file (`shared/<field>.yml`) holds named overlay entries:
//!
//! ```yaml
//! common-memory:
//!   applies-to: [web, srv]
//!   values:
//!     memory: 512M
//! ```
//!
//! Each entry injects `values` under `<field>` of every module named in
//! `applies-to`. Sequences are appended, mappings are merged key by key (last
//! write wins, no deep merge). A module whose existing field has the other
//! kind is left untouched. Malformed entries are skipped, never fatal.

use crate::collection::NamedCollection;
use crate::document::Document;
use tracing::{debug, warn};

pub const APPLIES_TO_KEY: &str = "applies-to";
pub const VALUES_KEY: &str = "values";

/// One decoded overlay entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRule<'a> {
    pub applies_to: Vec<&'a str>,
    pub values: &'a Document,
    pub target_field: &'a str,
}

impl<'a> OverlayRule<'a> {
    /// Decode an overlay entry. `None` when `applies-to` is not a sequence or
    /// `values` is missing or not a container.
    pub fn from_document(group: &'a Document, target_field: &'a str) -> Option<Self> {
        let applies_to = group.get(APPLIES_TO_KEY)?.as_sequence()?;
        let values = group.get(VALUES_KEY)?;
        if values.is_scalar() {
            return None;
        }
        Some(Self {
            applies_to: applies_to.iter().filter_map(Document::as_str).collect(),
            values,
            target_field,
        })
    }
}

/// Outcome of injecting one rule into one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    Applied,
    KindMismatch,
    UnknownTarget,
}

/// Counters for a whole shared pass, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayReport {
    pub applied: usize,
    pub skipped_kind_mismatch: usize,
    pub unknown_targets: usize,
    pub malformed: usize,
}

impl OverlayReport {
    fn record(&mut self, injection: Injection) {
        match injection {
            Injection::Applied => self.applied += 1,
            Injection::KindMismatch => self.skipped_kind_mismatch += 1,
            Injection::UnknownTarget => self.unknown_targets += 1,
        }
    }
}

/// Apply one overlay entry to `targets`.
///
/// A malformed `group` is a silent no-op.
pub fn apply_overlay(group: &Document, field_name: &str, targets: &mut NamedCollection) {
    if let Some(rule) = OverlayRule::from_document(group, field_name) {
        apply_rule(&rule, targets);
    }
}

/// Apply a decoded rule to every named target, returning one outcome per
/// `applies-to` name.
pub fn apply_rule(rule: &OverlayRule<'_>, targets: &mut NamedCollection) -> Vec<Injection> {
    rule.applies_to
        .iter()
        .map(|name| {
            let injection = match targets.get_mut(name) {
                Some(module) => inject(module, rule.target_field, rule.values),
                None => Injection::UnknownTarget,
            };
            match injection {
                Injection::Applied => {}
                Injection::KindMismatch => debug!(
                    module = %name,
                    field = %rule.target_field,
                    "Skipping overlay: existing field has a different kind"
                ),
                Injection::UnknownTarget => debug!(
                    module = %name,
                    field = %rule.target_field,
                    "Skipping overlay: no such module"
                ),
            }
            injection
        })
        .collect()
}

/// Inject `values` under `field` of one module document.
fn inject(module: &mut Document, field: &str, values: &Document) -> Injection {
    let Some(module) = module.as_mapping_mut() else {
        return Injection::KindMismatch;
    };

    let existing = module
        .entry(field.to_string())
        .or_insert_with(|| values.empty_like());

    match (existing, values) {
        (Document::Sequence(items), Document::Sequence(extra)) => {
            items.extend(extra.iter().cloned());
            Injection::Applied
        }
        (Document::Mapping(map), Document::Mapping(extra)) => {
            for (key, value) in extra {
                map.insert(key.clone(), value.clone());
            }
            Injection::Applied
        }
        _ => Injection::KindMismatch,
    }
}

/// Apply every shared group to `modules`.
///
/// Each entry of `shared` is a group named after the module field it targets;
/// its entries are applied in discovery order. Groups that are not mappings
/// and entries that cannot be decoded are counted as malformed and skipped.
pub fn apply_shared(shared: &NamedCollection, modules: &mut NamedCollection) -> OverlayReport {
    let mut report = OverlayReport::default();

    for (field, group) in shared.iter() {
        let Some(entries) = group.as_mapping() else {
            warn!(group = %field, kind = %group.kind(), "Invalid shared config group, expected a mapping");
            report.malformed += 1;
            continue;
        };

        for (entry_name, entry) in entries {
            debug!(group = %field, name = %entry_name, "Applying shared config");
            match OverlayRule::from_document(entry, field) {
                Some(rule) => {
                    for injection in apply_rule(&rule, modules) {
                        report.record(injection);
                    }
                }
                None => {
                    warn!(
                        group = %field,
                        name = %entry_name,
                        "Malformed shared config entry, expected `{}` sequence and `{}` container",
                        APPLIES_TO_KEY,
                        VALUES_KEY
                    );
                    report.malformed += 1;
                }
            }
        }
    }

    report
}
