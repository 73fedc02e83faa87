use crate::content::SiteContent;

/// SEO 키워드 제안 시스템 프롬프트
pub fn system_prompt(content: &SiteContent) -> String {
    format!(
        r#"You are an SEO specialist helping {owner} improve the search ranking of a three-discipline portfolio site (engineering, music, photography).
Given short descriptions of the site's content, suggest search keywords that real visitors would type.

## Rules
1. Suggest keywords that cover all three disciplines, not just one
2. Prefer specific phrases over generic single words
3. Each keyword suggestion should be short - one or two words
4. It is acceptable to return no keywords when the descriptions give you nothing to work with"#,
        owner = content.owner_name
    )
}

/// 사용자 프롬프트 생성
///
/// 세 섹션의 설명 목록을 항목별로 나열합니다.
pub fn user_prompt(engineering: &[String], music: &[String], photography: &[String]) -> String {
    let mut out = String::from("Suggest SEO keywords for a portfolio site with this content.\n");

    out.push_str("\n## Engineering\n");
    for description in engineering {
        out.push_str(&format!("- {}\n", description));
    }
    out.push_str("\n## Music\n");
    for description in music {
        out.push_str(&format!("- {}\n", description));
    }
    out.push_str("\n## Photography\n");
    for description in photography {
        out.push_str(&format!("- {}\n", description));
    }

    out
}
