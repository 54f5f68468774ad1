//! Funnel analysis — conversion and drop-off percentages over an ordered
//! sequence of step counts.

use campaign_core::config::FunnelConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStep {
    pub id: Uuid,
    pub event: String,
    pub count: u64,
}

impl FunnelStep {
    pub fn new(event: impl Into<String>, count: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            event: event.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStepResult {
    pub id: Uuid,
    pub event: String,
    pub count: u64,
    /// Percentage of the entry step's count that reached this step.
    pub conversion_rate: f64,
    /// Percentage lost since the previous step. Negative when the count grew.
    pub drop_off_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelDefinition {
    pub id: Uuid,
    pub name: String,
    pub steps: Vec<FunnelStep>,
    pub created_at: DateTime<Utc>,
}

impl FunnelDefinition {
    pub fn new(name: impl Into<String>, steps: Vec<FunnelStep>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            steps,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelReport {
    pub funnel_id: Uuid,
    pub name: String,
    pub steps: Vec<FunnelStepResult>,
    /// Conversion rate of the final step.
    pub overall_conversion_rate: f64,
    /// Step (by event label) with the steepest drop-off, if any step lost entities.
    pub largest_drop_off: Option<(String, f64)>,
    pub computed_at: DateTime<Utc>,
}

/// Annotates each step with conversion and drop-off rates rounded to one decimal.
pub fn compute_conversions(steps: &[FunnelStep]) -> Vec<FunnelStepResult> {
    compute_conversions_with_precision(steps, 1)
}

/// f64 carries no meaningful digits past this many decimals.
pub const MAX_PRECISION: u32 = 15;

/// Same as [`compute_conversions`] with a caller-chosen number of decimals,
/// capped at [`MAX_PRECISION`].
///
/// A zero denominator yields a rate of `0.0`, so a funnel whose entry count
/// is zero reports every later step at 0% conversion instead of NaN.
pub fn compute_conversions_with_precision(
    steps: &[FunnelStep],
    decimals: u32,
) -> Vec<FunnelStepResult> {
    let decimals = decimals.min(MAX_PRECISION);
    let Some(first) = steps.first() else {
        return Vec::new();
    };
    let entry = first.count;

    let mut results = Vec::with_capacity(steps.len());
    let mut previous: Option<u64> = None;

    for step in steps {
        let (conversion_rate, drop_off_rate) = match previous {
            None => (100.0, 0.0),
            Some(prev) => {
                let conversion = percentage(step.count as f64, entry, decimals);
                let lost = prev as f64 - step.count as f64;
                (conversion, percentage(lost, prev, decimals))
            }
        };
        results.push(FunnelStepResult {
            id: step.id,
            event: step.event.clone(),
            count: step.count,
            conversion_rate,
            drop_off_rate,
        });
        previous = Some(step.count);
    }

    results
}

fn percentage(numerator: f64, denominator: u64, decimals: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    // adding 0.0 turns a rounded -0.0 into 0.0
    round_to(numerator / denominator as f64 * 100.0, decimals) + 0.0
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Registry of funnel definitions with report generation.
pub struct FunnelAnalyzer {
    funnels: dashmap::DashMap<Uuid, FunnelDefinition>,
    precision: u32,
}

impl FunnelAnalyzer {
    pub fn new(config: &FunnelConfig) -> Self {
        Self {
            funnels: dashmap::DashMap::new(),
            precision: config.precision,
        }
    }

    pub fn define_funnel(&self, funnel: FunnelDefinition) {
        debug!(funnel_id = %funnel.id, steps = funnel.steps.len(), "Funnel defined");
        self.funnels.insert(funnel.id, funnel);
    }

    pub fn remove_funnel(&self, funnel_id: &Uuid) -> bool {
        self.funnels.remove(funnel_id).is_some()
    }

    pub fn analyze(&self, funnel_id: &Uuid) -> Option<FunnelReport> {
        let funnel = self.funnels.get(funnel_id)?;
        let steps = compute_conversions_with_precision(&funnel.steps, self.precision);

        let overall_conversion_rate = steps.last().map_or(0.0, |s| s.conversion_rate);
        let largest_drop_off = steps
            .iter()
            .skip(1)
            .filter(|s| s.drop_off_rate > 0.0)
            .max_by(|a, b| a.drop_off_rate.total_cmp(&b.drop_off_rate))
            .map(|s| (s.event.clone(), s.drop_off_rate));

        debug!(
            funnel_id = %funnel_id,
            overall = overall_conversion_rate,
            "Funnel analyzed"
        );

        Some(FunnelReport {
            funnel_id: *funnel_id,
            name: funnel.name.clone(),
            steps,
            overall_conversion_rate,
            largest_drop_off,
            computed_at: Utc::now(),
        })
    }

    pub fn list_funnels(&self) -> Vec<FunnelDefinition> {
        let mut funnels: Vec<FunnelDefinition> =
            self.funnels.iter().map(|f| f.value().clone()).collect();
        funnels.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        funnels
    }
}

impl Default for FunnelAnalyzer {
    fn default() -> Self {
        Self::new(&FunnelConfig::default())
    }
}
