// Prompt templates for the career tasks.
// Placeholders are `{name}` and are filled with llm_client::prompts::render.

/// Characters of resume / job description kept when tailoring.
pub const TAILOR_INPUT_CHARS: usize = 1000;
/// Characters of job description kept for interview prep.
pub const INTERVIEW_INPUT_CHARS: usize = 1500;
/// Characters of email body kept for invitation detection.
pub const EMAIL_INPUT_CHARS: usize = 1000;

/// Replace: {skills}, {current_role}, {target_role}, {career_stage}, {locations}, {industries}
pub const JOB_RECOMMENDATIONS_PROMPT: &str = r#"You are an expert career advisor. Based on the following user profile, recommend suitable jobs:

User Profile:
- Skills: {skills}
- Current Role: {current_role}
- Target Role: {target_role}
- Career Stage: {career_stage}
- Preferred Locations: {locations}
- Industries: {industries}

Provide a JSON array of 5 recommended job titles with brief descriptions.
Format: [{"title": "...", "description": "...", "match_score": 0-100}]"#;

/// Replace: {user_id}, {job_id}, {job_details}
pub const JOB_SCORE_PROMPT: &str = r#"Calculate a job compatibility score (0-100) for user {user_id} and job {job_id} based on:
- Skills match: 40%
- Experience level: 30%
- Location preference: 15%
- Salary expectations: 15%

Job details:
{job_details}

Return only the numeric score."#;

/// Replace: {resume_text}
pub const RESUME_ANALYSIS_PROMPT: &str = r#"You are an expert resume reviewer and ATS (Applicant Tracking System) specialist.
Analyze the following resume and provide detailed feedback.

Resume:
{resume_text}

Provide your analysis in the following JSON format:
{
    "atsScore": <number 0-100>,
    "formatScore": <number 0-100>,
    "contentScore": <number 0-100>,
    "keywordMatch": <number 0-100>,
    "strengths": [<list of 4-5 strengths>],
    "weaknesses": [<list of 4-5 weaknesses>],
    "suggestions": [<list of 5-7 specific improvement suggestions>]
}

Be specific and actionable in your feedback."#;

/// Replace: {resume_text}, {job_description} (both pre-truncated)
pub const TAILOR_RESUME_PROMPT: &str = r#"You are a resume optimization expert. Given the resume and job description below,
provide specific suggestions to tailor the resume for this job.

Resume:
{resume_text}...

Job Description:
{job_description}...

Provide 5-7 specific, actionable suggestions in JSON format:
{
    "suggestions": [<list of tailoring suggestions>],
    "keywords_to_add": [<list of important keywords from job description>],
    "skills_to_highlight": [<list of skills to emphasize>]
}"#;

/// Replace: {current_role}, {target_role}, {skills}
pub const CAREER_ROADMAP_PROMPT: &str = r#"You are a senior career counselor. Create a detailed career roadmap for someone who:
- Currently works as: {current_role}
- Target role: {target_role}
- Current skills: {skills}

Provide a comprehensive roadmap in JSON format:
{
    "timeline": "<estimated time to achieve target role>",
    "requiredSkills": [
        {
            "skill": "<skill name>",
            "currentLevel": <0-100>,
            "requiredLevel": <0-100>,
            "priority": "<high/medium/low>",
            "resources": [<list of learning resources>]
        }
    ],
    "milestones": [
        {
            "title": "<milestone title>",
            "description": "<detailed description>",
            "timeframe": "<when to achieve this>",
            "actionItems": [<specific actions to take>]
        }
    ],
    "certifications": [<recommended certifications>],
    "experiences": [<types of experience to gain>]
}"#;

/// Replace: {role}, {location}
pub const MARKET_INSIGHTS_PROMPT: &str = r#"Provide current job market insights for:
- Role: {role}
- Location: {location}

Return JSON with:
{
    "demandLevel": "<high/medium/low>",
    "averageSalary": <estimated salary>,
    "growthTrend": "<percentage>",
    "topCompaniesHiring": [<list of companies>],
    "inDemandSkills": [<list of skills>],
    "insights": [<list of 3-5 market insights>]
}"#;

/// Replace: {job_description} (pre-truncated)
pub const INTERVIEW_QUESTIONS_PROMPT: &str = r#"Based on this job description, generate 10 likely interview questions
that candidates should prepare for:

Job Description:
{job_description}

Return as a JSON array of strings."#;

/// Replace: {role}, {location}
pub const SALARY_TRENDS_PROMPT: &str = r#"Provide salary trend analysis for {role} in {location}.

Return JSON with:
{
    "currentAverage": <number>,
    "range": {"min": <number>, "max": <number>},
    "yearOverYearChange": "<percentage>",
    "experienceLevels": [
        {"level": "junior", "salary": <number>},
        {"level": "mid", "salary": <number>},
        {"level": "senior", "salary": <number>}
    ]
}"#;

/// Replace: {skills}
pub const SKILL_DEMAND_PROMPT: &str = r#"Analyze the demand and growth forecast for these skills:
{skills}

Return JSON array:
[
    {
        "skill": "<skill name>",
        "currentDemand": <0-100>,
        "growthRate": "<percentage>",
        "outlook": "<strong/moderate/weak>",
        "relatedRoles": [<list of roles>]
    }
]"#;

/// Replace: {email_content} (pre-truncated)
pub const EMAIL_ANALYSIS_PROMPT: &str = r#"Analyze this email to determine if it's an interview invitation.

Email:
{email_content}

Return JSON:
{
    "isInterview": <true/false>,
    "confidence": <0-100>,
    "interviewDetails": {
        "date": "<extracted date or null>",
        "time": "<extracted time or null>",
        "location": "<extracted location or null>",
        "interviewType": "<phone/video/in-person/unknown>",
        "company": "<company name or null>"
    },
    "suggestedAction": "<action to take>"
}"#;
