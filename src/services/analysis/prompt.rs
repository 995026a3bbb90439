//! Analysis Prompt
//!
//! Natural-language instruction embedding the four filter values.

use crate::models::{FilterSelection, StoreType};

/// System instruction sent alongside every analysis prompt
pub const SYSTEM_PROMPT: &str =
    "당신은 대한민국 프랜차이즈 시장과 상권을 분석하는 데이터 분석가입니다. \
     항상 제공된 JSON 스키마에 맞는 JSON 배열만 출력합니다.";

/// Comma-separated Korean labels, e.g. "배달전문, 일반점포".
pub fn store_type_list(store_types: &[StoreType]) -> String {
    store_types
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the instruction for `filters`, targeting exactly `store_types`.
pub fn build_prompt(filters: &FilterSelection, store_types: &[StoreType]) -> String {
    let region = filters.region.trim();
    let industry = filters.industry.label();
    let period = filters.analysis_period;
    let types = store_type_list(store_types);

    let mut prompt = String::new();
    prompt.push_str(
        "아래 조건에 맞춰 해당 지역 상권에 대한 현실적인 가상 분석 데이터를 생성해주세요.\n",
    );
    prompt.push_str("모든 금액의 단위는 '만원'입니다.\n\n");

    prompt.push_str(&format!("- 분석 상세 주소: {}\n", region));
    prompt.push_str(&format!("- 프랜차이즈 업종: {}\n", industry));
    prompt.push_str(&format!("- 점포 유형: {}\n", types));
    prompt.push_str(&format!("- 매출 분석 주기: {}\n\n", period.label()));

    prompt.push_str("요구사항:\n");
    prompt.push_str(&format!(
        "1. 점포 유형({})마다 별도의 분석 객체를 만들어 JSON 배열로 반환하세요. \
         배열의 원소 수는 {}개여야 합니다.\n",
        types,
        store_types.len()
    ));
    prompt.push_str(
        "2. 각 객체의 'storeType' 필드에는 해당 점포 유형을 위 목록의 표기 그대로 넣으세요.\n",
    );
    prompt.push_str(&format!(
        "3. '{}' 주변 상권의 유동인구, 주요 고객층, 임대료 수준을 요약하세요.\n",
        region
    ));
    prompt.push_str(&format!(
        "4. 인구 밀집도, 유동 인구, '{}' 업종의 연간 폐업률, 신규 업체의 1년 생존율을 추정하세요. \
         비율은 0에서 100 사이의 숫자입니다.\n",
        industry
    ));
    prompt.push_str(&format!(
        "5. 주소 근방 {} 프랜차이즈 브랜드 5개의 점포 수와 점포당 월 평균 예상 매출을 제시하세요.\n",
        industry
    ));
    prompt.push_str(
        "6. 창업 성공률(0-100)을 예측하고 주변 동종업계 평균과 비교한 설명을 덧붙이세요.\n",
    );
    prompt.push_str(
        "7. 초기 창업 비용(가맹비, 보증금, 인테리어, 기타)과 월 고정비(임대료, 인건비, 공과금)를 \
         추정하고 각각의 합계를 포함하세요.\n",
    );
    prompt.push_str(&format!(
        "8. {} 단위로 12개 기간의 예상 매출을 생성하세요. 기간 라벨 예시: {}, {}.\n",
        period.label(),
        period.bucket_label(1),
        period.bucket_label(2)
    ));
    prompt.push_str("9. 모든 데이터를 종합한 최종 투자 추천과 조언을 3-4문장으로 작성하세요.\n");

    prompt
}
