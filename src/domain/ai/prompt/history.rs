use crate::content::SiteContent;

/// 장소 역사 요약 시스템 프롬프트
///
/// 사실 기반 플로우이므로 추측을 금지하고 간결한 서술을 요구합니다.
pub fn system_prompt(content: &SiteContent) -> String {
    format!(
        r#"You are a careful local historian writing short, factual briefs for the travel photography section of {owner}'s portfolio site.
Given a place name, produce a compact historical brief a visitor can read next to the photographs.

## Rules
1. Stick to well-established history; if the place is obscure, say what is reliably known and nothing more
2. Key events must be in chronological order, each a single sentence
3. Interesting facts should be the kind a caption could quote
4. The image keywords must be a short phrase suitable for an image search, not a sentence"#,
        owner = content.owner_name
    )
}

/// 사용자 프롬프트 생성
pub fn user_prompt(place_name: &str) -> String {
    format!("Write a historical brief for this place:\n\n{}", place_name)
}
