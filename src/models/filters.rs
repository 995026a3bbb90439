//! Filter Models
//!
//! The user's analysis conditions: location, industry, store types and the
//! sales-forecast period. Enum values travel over the wire as the Korean
//! labels the AI service is prompted with; English aliases are accepted on
//! input.

use serde::{Deserialize, Serialize};

/// Fulfillment model of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoreType {
    /// Delivery-only
    #[serde(rename = "배달전문", alias = "DELIVERY", alias = "delivery")]
    Delivery,
    /// Takeout-only
    #[serde(rename = "테이크아웃", alias = "TAKEOUT", alias = "takeout")]
    Takeout,
    /// Standard walk-in store
    #[serde(rename = "일반점포", alias = "STANDARD", alias = "standard")]
    Standard,
}

impl StoreType {
    pub const ALL: [StoreType; 3] = [StoreType::Delivery, StoreType::Takeout, StoreType::Standard];

    /// Korean label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            StoreType::Delivery => "배달전문",
            StoreType::Takeout => "테이크아웃",
            StoreType::Standard => "일반점포",
        }
    }
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Granularity of the sales forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisPeriod {
    #[serde(rename = "일간", alias = "DAILY", alias = "daily")]
    Daily,
    #[serde(rename = "주간", alias = "WEEKLY", alias = "weekly")]
    Weekly,
    #[serde(rename = "월간", alias = "MONTHLY", alias = "monthly")]
    Monthly,
    #[serde(rename = "연간", alias = "YEARLY", alias = "yearly")]
    Yearly,
}

impl AnalysisPeriod {
    pub const ALL: [AnalysisPeriod; 4] = [
        AnalysisPeriod::Daily,
        AnalysisPeriod::Weekly,
        AnalysisPeriod::Monthly,
        AnalysisPeriod::Yearly,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisPeriod::Daily => "일간",
            AnalysisPeriod::Weekly => "주간",
            AnalysisPeriod::Monthly => "월간",
            AnalysisPeriod::Yearly => "연간",
        }
    }

    /// Label for the `n`th forecast bucket, e.g. "3주차" or "3월".
    pub fn bucket_label(&self, n: u32) -> String {
        match self {
            AnalysisPeriod::Daily => format!("{}일차", n),
            AnalysisPeriod::Weekly => format!("{}주차", n),
            AnalysisPeriod::Monthly => format!("{}월", n),
            AnalysisPeriod::Yearly => format!("{}년차", n),
        }
    }
}

impl std::fmt::Display for AnalysisPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Franchise business category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "치킨")]
    Chicken,
    #[serde(rename = "커피전문점")]
    CoffeeShop,
    #[serde(rename = "피자")]
    Pizza,
    #[serde(rename = "편의점")]
    ConvenienceStore,
    #[serde(rename = "한식")]
    KoreanFood,
    #[serde(rename = "분식")]
    Snacks,
    #[serde(rename = "일식")]
    JapaneseFood,
    #[serde(rename = "중식")]
    ChineseFood,
    #[serde(rename = "베이커리")]
    Bakery,
    #[serde(rename = "PC방")]
    PcCafe,
    #[serde(rename = "만화카페")]
    ComicCafe,
}

impl Industry {
    pub const ALL: [Industry; 11] = [
        Industry::Chicken,
        Industry::CoffeeShop,
        Industry::Pizza,
        Industry::ConvenienceStore,
        Industry::KoreanFood,
        Industry::Snacks,
        Industry::JapaneseFood,
        Industry::ChineseFood,
        Industry::Bakery,
        Industry::PcCafe,
        Industry::ComicCafe,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Chicken => "치킨",
            Industry::CoffeeShop => "커피전문점",
            Industry::Pizza => "피자",
            Industry::ConvenienceStore => "편의점",
            Industry::KoreanFood => "한식",
            Industry::Snacks => "분식",
            Industry::JapaneseFood => "일식",
            Industry::ChineseFood => "중식",
            Industry::Bakery => "베이커리",
            Industry::PcCafe => "PC방",
            Industry::ComicCafe => "만화카페",
        }
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// User intent for one analysis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// Free-text address or area
    pub region: String,
    pub industry: Industry,
    /// May be empty while editing; see [`FilterSelection::requested_store_types`]
    #[serde(default)]
    pub store_types: Vec<StoreType>,
    pub analysis_period: AnalysisPeriod,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            region: "서울시 강남구 역삼동".to_string(),
            industry: Industry::Chicken,
            store_types: vec![StoreType::Standard],
            analysis_period: AnalysisPeriod::Monthly,
        }
    }
}

impl FilterSelection {
    /// Store types a request targets: selection order, duplicates dropped,
    /// `[Standard]` when nothing is selected.
    pub fn requested_store_types(&self) -> Vec<StoreType> {
        let mut out: Vec<StoreType> = Vec::with_capacity(self.store_types.len());
        for st in &self.store_types {
            if !out.contains(st) {
                out.push(*st);
            }
        }
        if out.is_empty() {
            out.push(StoreType::Standard);
        }
        out
    }

    /// Add the store type when absent, remove it when present.
    pub fn toggle_store_type(&mut self, store_type: StoreType) {
        if let Some(pos) = self.store_types.iter().position(|s| *s == store_type) {
            self.store_types.remove(pos);
        } else {
            self.store_types.push(store_type);
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.region.trim().is_empty() {
            return Err("region must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters() {
        let filters = FilterSelection::default();
        assert_eq!(filters.industry, Industry::Chicken);
        assert_eq!(filters.store_types, vec![StoreType::Standard]);
        assert_eq!(filters.analysis_period, AnalysisPeriod::Monthly);
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn test_empty_store_types_default_to_standard() {
        let filters = FilterSelection {
            store_types: vec![],
            ..Default::default()
        };
        assert_eq!(filters.requested_store_types(), vec![StoreType::Standard]);
    }

    #[test]
    fn test_requested_store_types_dedup_keeps_order() {
        let filters = FilterSelection {
            store_types: vec![StoreType::Takeout, StoreType::Delivery, StoreType::Takeout],
            ..Default::default()
        };
        assert_eq!(
            filters.requested_store_types(),
            vec![StoreType::Takeout, StoreType::Delivery]
        );
    }

    #[test]
    fn test_toggle_store_type() {
        let mut filters = FilterSelection::default();
        filters.toggle_store_type(StoreType::Delivery);
        assert_eq!(filters.store_types, vec![StoreType::Standard, StoreType::Delivery]);
        filters.toggle_store_type(StoreType::Standard);
        filters.toggle_store_type(StoreType::Delivery);
        assert!(filters.store_types.is_empty());
    }

    #[test]
    fn test_blank_region_rejected() {
        let filters = FilterSelection {
            region: "   ".to_string(),
            ..Default::default()
        };
        assert!(filters.validate().is_err());
    }

    #[test]
    fn test_store_type_wire_format() {
        assert_eq!(serde_json::to_string(&StoreType::Delivery).unwrap(), "\"배달전문\"");
        let parsed: StoreType = serde_json::from_str("\"STANDARD\"").unwrap();
        assert_eq!(parsed, StoreType::Standard);
        assert!(serde_json::from_str::<StoreType>("\"드라이브스루\"").is_err());
    }

    #[test]
    fn test_filters_serde_camel_case() {
        let json = serde_json::to_value(FilterSelection::default()).unwrap();
        assert_eq!(json["storeTypes"][0], "일반점포");
        assert_eq!(json["analysisPeriod"], "월간");
        assert_eq!(json["industry"], "치킨");
    }

    #[test]
    fn test_bucket_labels() {
        assert_eq!(AnalysisPeriod::Weekly.bucket_label(3), "3주차");
        assert_eq!(AnalysisPeriod::Monthly.bucket_label(12), "12월");
    }
}
