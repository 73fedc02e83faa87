use crate::content::SiteContent;

/// 아이디어 생성 시스템 프롬프트
pub fn system_prompt(content: &SiteContent) -> String {
    format!(
        r#"You are a creative project consultant for {owner}'s personal portfolio site, which spans engineering, music, and photography.
Propose one concrete, achievable side project and explain why it is worth building.

## Rules
1. Suggest exactly one idea, not a list of alternatives
2. The idea must be something a single person can finish in a few weekends
3. The explanation must say what makes the idea interesting and what could be learned from it
4. Keep the tone encouraging and practical"#,
        owner = content.owner_name
    )
}

/// 사용자 프롬프트 생성
///
/// 주제가 없으면 모델이 직접 일반 테마를 고르도록 지시합니다.
/// 분기는 템플릿 문법이 아니라 여기에서 명시적으로 처리합니다.
pub fn user_prompt(topic: Option<&str>, content: &SiteContent) -> String {
    match topic {
        Some(topic) => format!("Suggest a creative project idea about this topic:\n\n{}", topic),
        None => format!(
            "No topic was provided. Pick a general theme yourself, drawing on the site's \
three disciplines: {engineering}; {music}; {photography}. Then suggest one project idea \
for that theme.",
            engineering = content.engineering_blurb,
            music = content.music_blurb,
            photography = content.photography_blurb,
        ),
    }
}
