// Prompt templates for the Semantic Analyzer.
// Placeholders are filled in a single pass with `fill`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid placeholder regex"));

/// Substitutes `{name}` placeholders from `values` in one scan of `template`.
/// Inserted text is never rescanned, so documents that happen to contain
/// `{resume_text}` stay literal. Unknown placeholders are left untouched.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Resume vs JD assessment. Replace: {jd_text}, {resume_text}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the resume against the job description. Respond ONLY with a single, valid JSON object with two keys: "score" and "suggestions".
- "score": An integer (0-100) for match quality.
- "suggestions": A brief string of actionable resume improvement advice, formatted with bullet points (e.g., "- suggestion one\n- suggestion two").

Example of a valid response:
{"score": 75, "suggestions": "- Highlight cloud experience like AWS.\n- Quantify achievements in past projects with metrics."}

JD: {jd_text}
Resume: {resume_text}
JSON Response:"#;

/// Resume vs JD assessment against an extracted skill list.
/// Replace: {jd_text}, {skills_json}, {resume_text}
pub const SKILL_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the resume against the job description and its required skills. Respond ONLY with a single, valid JSON object with three keys: "score", "suggestions" and "missing_skills".
- "score": An integer (0-100) for overall match quality, considering both technical and soft skills.
- "suggestions": A brief string of actionable resume improvement advice, formatted with bullet points (e.g., "- suggestion one\n- suggestion two"), focusing on missing skills, relevant project or experience highlighting, and using terminology from the JD.
- "missing_skills": A JSON array of required skills the resume does not demonstrate, even under a different name.

Example of a valid response:
{"score": 62, "suggestions": "- Mention the Kubernetes cluster you operated.\n- Add metrics to the migration project.", "missing_skills": ["terraform"]}

Required skills: {skills_json}
JD: {jd_text}
Resume: {resume_text}
JSON Response:"#;

/// Skill extraction from a JD. Replace: {jd_text}
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = r#"List the concrete skills a candidate needs for the job description below: programming languages, frameworks, tools, platforms, methodologies and soft skills.
Respond ONLY with a JSON array of short lowercase skill names, for example: ["python", "sql", "stakeholder communication"].
Do not include years of experience, degrees or job titles.

JD: {jd_text}
JSON Response:"#;

/// Overall feedback on a candidate pool. Replace: {jd_text}, {skills}, {candidates}
pub const POOL_SUMMARY_PROMPT_TEMPLATE: &str = r#"You reviewed several candidates for one job. Write a short overall assessment of the candidate pool for the hiring manager, in at most five bullet points:
- how well the pool covers the required skills
- skills that most candidates lack
- which candidates stand out and why

Respond with bullet points only.

Required skills: {skills}
JD: {jd_text}

Candidates:
{candidates}

Assessment:"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_substitutes_known_placeholders() {
        let prompt = fill(ANALYSIS_PROMPT_TEMPLATE, &[("jd_text", "JD body"), ("resume_text", "CV body")]);
        assert!(prompt.contains("JD: JD body\nResume: CV body"));
        // JSON examples in the template are not placeholders.
        assert!(prompt.contains(r#"{"score": 75"#));
    }

    #[test]
    fn test_fill_does_not_expand_inserted_text() {
        let prompt = fill(
            "JD: {jd_text}\nResume: {resume_text}",
            &[("jd_text", "mentions {resume_text} literally"), ("resume_text", "CV body")],
        );
        assert_eq!(prompt, "JD: mentions {resume_text} literally\nResume: CV body");
        assert_eq!(prompt.matches("CV body").count(), 1);
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        assert_eq!(fill("{a} and {b}", &[("a", "x")]), "x and {b}");
    }
}
