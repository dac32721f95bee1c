// Prompt constants for match scoring.

/// Match analysis prompt template.
/// Replace: {headline}, {skills}, {level}, {title}, {company}, {description}, {keywords}
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Act as a career coach. Analyze the match between the following candidate profile and job description.

Candidate Profile:
- Headline: {headline}
- Skills: {skills}
- Level: {level}

Job Description:
- Title: {title}
- Company: {company}
- Description: {description}
- Keywords: {keywords}

Provide a match score from 0 to 100 and a very brief (10 words max) reason."#;
