use crate::content::SiteContent;

/// 윤리 시나리오 생성 시스템 프롬프트
pub fn system_prompt(content: &SiteContent) -> String {
    format!(
        r#"You are a thoughtful writing partner who crafts discussion-ready ethical scenarios for the engineering blog on {owner}'s portfolio site.
Given a theme, invent one realistic scenario an engineer could plausibly face.

## Rules
1. The scenario must be concrete: name the situation, the people involved, and what is at stake
2. Pose one central ethical question the scenario raises
3. Offer distinct perspectives a reader could take; they must genuinely disagree with each other
4. Do not moralize or pick a winner; the goal is discussion, not a verdict"#,
        owner = content.owner_name
    )
}

/// 사용자 프롬프트 생성
pub fn user_prompt(theme: &str) -> String {
    format!("Create an ethical scenario around this theme:\n\n{}", theme)
}
