//! Analysis Response Schema
//!
//! Output schema sent with every analysis request: an array holding one
//! result object per requested store type.

use franchise_navigator_llm::ResponseSchema;

use crate::models::StoreType;

/// Schema name reported to vendors that require one
pub const SCHEMA_NAME: &str = "franchise_analysis_results";

fn competitor_schema() -> ResponseSchema {
    ResponseSchema::object(
        None,
        vec![
            ("brandName", ResponseSchema::string(Some("경쟁 프랜차이즈 브랜드명"))),
            ("count", ResponseSchema::integer(Some("해당 브랜드의 점포 수"))),
            (
                "estimatedMonthlySales",
                ResponseSchema::integer(Some("점포당 월 평균 예상 매출 (단위: 만원)")),
            ),
        ],
        &["brandName", "count", "estimatedMonthlySales"],
    )
}

fn costs_schema() -> ResponseSchema {
    ResponseSchema::object(
        Some("예상 창업 및 운영 비용 (단위: 만원)"),
        vec![
            ("franchiseFee", ResponseSchema::integer(Some("가맹비"))),
            ("deposit", ResponseSchema::integer(Some("보증금"))),
            ("interior", ResponseSchema::integer(Some("인테리어 비용"))),
            ("other", ResponseSchema::integer(Some("기타 비용"))),
            ("totalStartup", ResponseSchema::integer(Some("총 창업 비용 합계"))),
            ("rent", ResponseSchema::integer(Some("월 임대료"))),
            ("labor", ResponseSchema::integer(Some("월 인건비"))),
            ("utilities", ResponseSchema::integer(Some("월 공과금 및 관리비"))),
            ("totalMonthly", ResponseSchema::integer(Some("총 월 고정비 합계"))),
        ],
        &[
            "franchiseFee",
            "deposit",
            "interior",
            "other",
            "totalStartup",
            "rent",
            "labor",
            "utilities",
            "totalMonthly",
        ],
    )
}

fn sales_point_schema() -> ResponseSchema {
    ResponseSchema::object(
        None,
        vec![
            ("period", ResponseSchema::string(Some("분석 기간 (예: 1일차, 1주차, 1월)"))),
            ("sales", ResponseSchema::integer(Some("해당 기간의 예상 매출 (단위: 만원)"))),
        ],
        &["period", "sales"],
    )
}

/// Schema of one result object. `storeType` is restricted to `store_types`.
pub fn analysis_result_schema(store_types: &[StoreType]) -> ResponseSchema {
    let percent = |desc: &str| ResponseSchema::number(Some(desc)).with_range(0.0, 100.0);

    ResponseSchema::object(
        None,
        vec![
            (
                "storeType",
                ResponseSchema::string(Some("분석 대상 점포 유형"))
                    .with_enum(store_types.iter().map(|s| s.label())),
            ),
            ("summary", ResponseSchema::string(Some("선택된 조건에 대한 시장 요약, 1-2문장"))),
            (
                "populationDensity",
                ResponseSchema::string(Some("인구 밀집도 특징, 10자 내외")),
            ),
            (
                "floatingPopulation",
                ResponseSchema::string(Some("유동 인구 특징, 10자 내외")),
            ),
            (
                "industryClosureRate",
                percent("지역 내 해당 업종의 연간 평균 폐업률(%)"),
            ),
            (
                "newBusinessSurvivalRate",
                percent("신규 창업 시 1년 내 생존 확률(%)"),
            ),
            (
                "competitorDistribution",
                ResponseSchema::array(
                    Some("주소 근방 동종업계 주요 프랜차이즈 브랜드 5개"),
                    competitor_schema(),
                ),
            ),
            ("successRate", percent("예상 성공 확률(%)")),
            (
                "successContext",
                ResponseSchema::string(Some("주변 동종업계 평균 성공률 대비 수준 설명")),
            ),
            ("costs", costs_schema()),
            (
                "sales",
                ResponseSchema::array(
                    Some("선택된 분석 주기에 따른 12개 기간의 예상 매출"),
                    sales_point_schema(),
                ),
            ),
            (
                "recommendation",
                ResponseSchema::string(Some("최종 투자 추천 및 조언, 3-4문장")),
            ),
        ],
        &[
            "storeType",
            "summary",
            "populationDensity",
            "floatingPopulation",
            "industryClosureRate",
            "newBusinessSurvivalRate",
            "competitorDistribution",
            "successRate",
            "successContext",
            "costs",
            "sales",
            "recommendation",
        ],
    )
}

/// Root schema: one result per requested store type.
pub fn response_schema(store_types: &[StoreType]) -> ResponseSchema {
    ResponseSchema::array(
        Some("점포 유형별 분석 결과 배열. 요청된 점포 유형마다 하나의 객체를 포함합니다."),
        analysis_result_schema(store_types),
    )
}
