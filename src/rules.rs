/// A fixed pressure drop rule
///
/// A rule fires when the lowest forecasted pressure within `horizon_hours` from now
/// is at least `drop_threshold_hpa` below the current pressure. Lower `severity`
/// means higher notification priority.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertRule {
    pub horizon_hours: u32,
    pub drop_threshold_hpa: f64,
    pub label: &'static str,
    pub severity: u8,
}

/// The rule set, in evaluation order
pub const ALERT_RULES: [AlertRule; 5] = [
    AlertRule { horizon_hours: 3, drop_threshold_hpa: 3.0, label: "Rapid drop (3h forecast)", severity: 1 },
    AlertRule { horizon_hours: 12, drop_threshold_hpa: 10.0, label: "Significant drop (12h forecast)", severity: 1 },
    AlertRule { horizon_hours: 6, drop_threshold_hpa: 6.0, label: "Moderate drop (6h forecast)", severity: 2 },
    AlertRule { horizon_hours: 12, drop_threshold_hpa: 6.0, label: "Medium-term drop (12h forecast)", severity: 3 },
    // Day scale changes are felt even when they are gradual
    AlertRule { horizon_hours: 24, drop_threshold_hpa: 5.0, label: "Daily change, take care (24h forecast)", severity: 4 },
];
