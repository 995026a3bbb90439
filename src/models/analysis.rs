//! Analysis Result Models
//!
//! One forecast per store type as returned by the AI service. The service is
//! not trusted to honor declared numeric types, so numeric fields accept
//! floats and numeric strings and fall back to 0 on anything else. Only
//! `storeType` and `costs` are mandatory.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::filters::StoreType;

/// Best-effort numeric coercion for untrusted JSON values.
pub fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

fn coerce_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or_else(|| coerce_f64(value).trunc() as i64),
        _ => coerce_f64(value).trunc() as i64,
    }
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_f64).unwrap_or(0.0))
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_i64).unwrap_or(0))
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    lenient_i64(deserializer).map(|v| v.max(0) as u64)
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

/// A competing franchise brand near the analyzed address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorBrand {
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand_name: String,
    /// Number of stores
    #[serde(default, deserialize_with = "lenient_u64")]
    pub count: u64,
    /// Average monthly sales per store, in units of 10,000 KRW
    #[serde(default, deserialize_with = "lenient_u64")]
    pub estimated_monthly_sales: u64,
}

/// Editable cost line items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CostField {
    FranchiseFee,
    Deposit,
    Interior,
    Other,
    Rent,
    Labor,
    Utilities,
}

impl CostField {
    pub const ALL: [CostField; 7] = [
        CostField::FranchiseFee,
        CostField::Deposit,
        CostField::Interior,
        CostField::Other,
        CostField::Rent,
        CostField::Labor,
        CostField::Utilities,
    ];

    /// Whether the field belongs to the one-time startup group.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            CostField::FranchiseFee | CostField::Deposit | CostField::Interior | CostField::Other
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            CostField::FranchiseFee => "가맹비",
            CostField::Deposit => "보증금",
            CostField::Interior => "인테리어",
            CostField::Other => "기타",
            CostField::Rent => "임대료",
            CostField::Labor => "인건비",
            CostField::Utilities => "공과금",
        }
    }
}

impl std::str::FromStr for CostField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "franchiseFee" => Ok(CostField::FranchiseFee),
            "deposit" => Ok(CostField::Deposit),
            "interior" => Ok(CostField::Interior),
            "other" => Ok(CostField::Other),
            "rent" => Ok(CostField::Rent),
            "labor" => Ok(CostField::Labor),
            "utilities" => Ok(CostField::Utilities),
            other => Err(format!("Unknown cost field: {}", other)),
        }
    }
}

/// Parse raw cost input as its leading base-10 integer.
///
/// Leading whitespace and an optional sign are accepted; parsing stops at the
/// first non-digit, so "12abc" is 12 and "1e3" is 1. Input without a leading
/// digit becomes 0. Values past the i64 range saturate.
pub fn parse_cost_input(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });

    if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    }
}

/// Startup and monthly costs, in units of 10,000 KRW
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub franchise_fee: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub deposit: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub interior: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub other: i64,
    /// As returned until the first edit, then always derived
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_startup: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub rent: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub labor: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub utilities: i64,
    /// As returned until the first edit, then always derived
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_monthly: i64,
}

impl CostBreakdown {
    pub fn get(&self, field: CostField) -> i64 {
        match field {
            CostField::FranchiseFee => self.franchise_fee,
            CostField::Deposit => self.deposit,
            CostField::Interior => self.interior,
            CostField::Other => self.other,
            CostField::Rent => self.rent,
            CostField::Labor => self.labor,
            CostField::Utilities => self.utilities,
        }
    }

    /// Set one component and recompute both totals from the components.
    pub fn set(&mut self, field: CostField, value: i64) {
        let slot = match field {
            CostField::FranchiseFee => &mut self.franchise_fee,
            CostField::Deposit => &mut self.deposit,
            CostField::Interior => &mut self.interior,
            CostField::Other => &mut self.other,
            CostField::Rent => &mut self.rent,
            CostField::Labor => &mut self.labor,
            CostField::Utilities => &mut self.utilities,
        };
        *slot = value;
        self.recompute_totals();
    }

    pub fn startup_sum(&self) -> i64 {
        self.franchise_fee
            .saturating_add(self.deposit)
            .saturating_add(self.interior)
            .saturating_add(self.other)
    }

    pub fn monthly_sum(&self) -> i64 {
        self.rent
            .saturating_add(self.labor)
            .saturating_add(self.utilities)
    }

    pub fn recompute_totals(&mut self) {
        self.total_startup = self.startup_sum();
        self.total_monthly = self.monthly_sum();
    }

    /// Whether the stored totals agree with their components.
    pub fn totals_consistent(&self) -> bool {
        self.total_startup == self.startup_sum() && self.total_monthly == self.monthly_sum()
    }
}

/// One bucket of the sales forecast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesPoint {
    /// Bucket label, e.g. "1월"
    #[serde(default, deserialize_with = "lenient_string")]
    pub period: String,
    /// Expected sales, in units of 10,000 KRW
    #[serde(default, deserialize_with = "lenient_i64")]
    pub sales: i64,
}

/// Forecast for one store type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub store_type: StoreType,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub population_density: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub floating_population: String,
    /// Annual closure rate for the industry in the area, percent
    #[serde(default, deserialize_with = "lenient_f64")]
    pub industry_closure_rate: f64,
    /// One-year survival probability, clamped to [0, 100] on ingestion
    #[serde(default, deserialize_with = "lenient_f64")]
    pub new_business_survival_rate: f64,
    #[serde(default)]
    pub competitor_distribution: Vec<CompetitorBrand>,
    /// Clamped to [0, 100] on ingestion
    #[serde(default, deserialize_with = "lenient_f64")]
    pub success_rate: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub success_context: String,
    pub costs: CostBreakdown,
    #[serde(default)]
    pub sales: Vec<SalesPoint>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recommendation: String,
}

/// Results of one analysis request, in the order the service returned them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResultSet {
    results: Vec<AnalysisResult>,
}

impl AnalysisResultSet {
    pub fn new(results: Vec<AnalysisResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnalysisResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn first(&self) -> Option<&AnalysisResult> {
        self.results.first()
    }

    pub fn contains(&self, store_type: StoreType) -> bool {
        self.results.iter().any(|r| r.store_type == store_type)
    }

    /// Entry for `store_type`; the last one wins if the tag repeats.
    pub fn find(&self, store_type: StoreType) -> Option<&AnalysisResult> {
        self.results.iter().rev().find(|r| r.store_type == store_type)
    }

    pub fn find_mut(&mut self, store_type: StoreType) -> Option<&mut AnalysisResult> {
        self.results
            .iter_mut()
            .rev()
            .find(|r| r.store_type == store_type)
    }

    /// Store types in returned order.
    pub fn store_types(&self) -> Vec<StoreType> {
        self.results.iter().map(|r| r.store_type).collect()
    }

    pub fn into_vec(self) -> Vec<AnalysisResult> {
        self.results
    }
}

impl<'a> IntoIterator for &'a AnalysisResultSet {
    type Item = &'a AnalysisResult;
    type IntoIter = std::slice::Iter<'a, AnalysisResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
