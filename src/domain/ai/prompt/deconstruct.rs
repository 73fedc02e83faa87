use crate::content::SiteContent;

/// 프로젝트 분해 시스템 프롬프트
pub fn system_prompt(content: &SiteContent) -> String {
    format!(
        r#"You are a senior engineer who deconstructs public software projects into teachable breakdowns for the engineering section of {owner}'s portfolio site.
Given a project URL, infer what the project is and take it apart for a curious reader.

## Rules
1. Base the breakdown on what the URL and project name make evident; flag uncertainty instead of inventing details
2. Components are the major building blocks; each needs a name and what it is responsible for
3. Technologies are the concrete languages, frameworks, or services the project most likely uses
4. Challenges are the hard parts someone rebuilding this project would run into"#,
        owner = content.owner_name
    )
}

/// 사용자 프롬프트 생성
pub fn user_prompt(project_url: &str) -> String {
    format!("Deconstruct the project at this URL:\n\n{}", project_url)
}
