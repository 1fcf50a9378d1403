// All LLM prompt constants for the portfolio call sites.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};

/// Max characters of README text included per project in the comparison prompt.
pub const README_SNIPPET_CHARS: usize = 2000;

/// System prompt for bullet generation. Demands `{"bulletPoints": [...]}`.
pub fn bullets_system() -> String {
    format!(
        "You are an expert resume writer. Your task is to generate 4-5 concise, impactful bullet points \
        for a software developer's resume based on a project's README file. Each bullet point should start \
        with a unique action verb and highlight a technical achievement, a key feature, or the problem the \
        project solves. Focus on quantifiable results if possible. {JSON_ONLY_INSTRUCTION} \
        The JSON must contain a single key 'bulletPoints' which is an array of strings. \
        Example: {{\"bulletPoints\":[\"Developed a feature using Rust and Axum.\", \
        \"Increased performance by 20%.\", \"Implemented user authentication.\"]}}"
    )
}

/// Bullet generation prompt. Replace `{repo_name}` and `{readme}` before sending.
pub const BULLETS_PROMPT_TEMPLATE: &str =
    "Here is the README content for the project '{repo_name}':\n\n---\n{readme}\n---";

pub const COVER_LETTER_SYSTEM: &str = "You are an expert cover letter writer for software developers. \
    You create personalized, professional, and compelling cover letters based on a user's projects \
    (from READMEs) and a target job description.";

/// Cover letter prompt. Replace `{job_description}`, `{projects}` and `{owner}` before sending.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Job Description:
{job_description}

Project Details (from READMEs):
{projects}

Instructions:
Using the project details provided, write a professional and compelling cover letter tailored specifically to the job description above.
- Highlight relevant skills, technologies, and experiences demonstrated in the projects.
- Write three paragraphs. Open by stating the purpose of the letter and the position. In the body, detail skills, experience, and qualifications, linking them directly to the job requirements. Close by thanking the reader, reiterating interest, and suggesting a follow-up or interview.
- Connect the projects' features, problems solved, and outcomes to the requirements and responsibilities mentioned in the job description.
- Maintain a professional tone and structure.
- The cover letter should be addressed to the hiring manager and signed off by the applicant (use the GitHub username: {owner}).

Return the complete cover letter as a single string."#;

pub const ANALYSIS_SYSTEM: &str = "You are an expert career advisor and technical recruiter. \
    You specialize in analyzing software developer portfolios (projects) against job descriptions \
    to identify skill matches, gaps, and project relevance. \
    You respond with precise, actionable insights in a structured JSON format.";

/// Comparative analysis prompt. Replace `{job_description}` and `{projects}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Job Description:
{job_description}

Candidate's Projects:
{projects}

Instructions:
Act as an expert career advisor and technical recruiter. Perform a deep, semantic analysis comparing the candidate's selected projects against the provided job description.

1. Skills Identification: based SOLELY on the Job Description, identify the core technical skills, programming languages, frameworks, tools, and methodologies explicitly required or strongly desired. Provide this list as 'identifiedJobSkills'.
2. Skills Matched: by analyzing the Candidate's Projects, determine which of the identified skills the candidate demonstrably possesses (languages used, topics, descriptions, bullet points, README content). Provide this list as 'matchedSkills'.
3. Skills Missing: identify which of the identified skills are NOT sufficiently demonstrated by the projects. Provide this list as 'missingSkills'.
4. Project Relevance Ranking: rank the projects from MOST to LEAST relevant to the job description, with a brief justification based on technologies, complexity, and outcomes. Provide this as 'rankedProjects'.
5. Overall Summary: at most 3 sentences evaluating how well the portfolio aligns with the job description, naming strengths and key areas for improvement. Provide this as 'overallSummary'.

Format your entire response STRICTLY as a JSON object with the following structure:
{
  "identifiedJobSkills": ["skill1", "skill2"],
  "matchedSkills": ["matched_skill1"],
  "missingSkills": ["missing_skill1"],
  "rankedProjects": [
    {"projectName": "Project A", "relevanceJustification": "Brief reason why it's ranked 1st"},
    {"projectName": "Project B", "relevanceJustification": "Brief reason why it's ranked 2nd"}
  ],
  "overallSummary": "A concise summary of the alignment."
}

{json_only}"#;

pub fn render_analysis_prompt(job_description: &str, projects: &str) -> String {
    fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("job_description", job_description),
            ("projects", projects),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets_system_names_required_key() {
        let system = bullets_system();
        assert!(system.contains("'bulletPoints'"));
        assert!(system.contains(r#"{"bulletPoints":["#));
    }

    #[test]
    fn test_analysis_prompt_has_no_unfilled_placeholders() {
        let prompt = render_analysis_prompt("Rust engineer", "--- Project: a ---");
        assert!(prompt.contains("Rust engineer"));
        assert!(prompt.contains("--- Project: a ---"));
        assert!(!prompt.contains("{job_description}"));
        assert!(!prompt.contains("{projects}"));
        assert!(!prompt.contains("{json_only}"));
    }

    #[test]
    fn test_analysis_prompt_keeps_placeholders_in_user_text() {
        let prompt = render_analysis_prompt("Must know {projects}", "--- Project: a {json_only} ---");
        assert!(prompt.contains("Must know {projects}"));
        assert!(prompt.contains("--- Project: a {json_only} ---"));
    }
}
