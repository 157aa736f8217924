//! Career tasks: one fixed prompt, one model call, one typed reply each.
//!
//! Failure policy is fixed per task and stated on each method:
//! - `analyze_resume` propagates upstream failures (`LlmError`).
//! - Every other task never fails. Upstream failures and unusable replies both
//!   yield the task's documented fallback.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use crate::career::models::{
    fallback_interview_questions, CareerRoadmap, EmailAnalysis, JobRecommendation,
    MarketInsights, ResumeAnalysis, SalaryTrends, SkillDemand, TailoringSuggestions,
};
use crate::career::prompts::*;
use crate::llm_client::prompts::{render, truncate_chars, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{extract_structured, LlmError, ModelFamily, ModelGateway, StructuredKind};
use crate::models::profile::UserProfile;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone)]
pub struct CareerAdvisor {
    gateway: ModelGateway,
}

impl CareerAdvisor {
    pub fn new(gateway: ModelGateway) -> Self {
        Self { gateway }
    }

    pub fn model_id(&self) -> &str {
        self.gateway.model_id()
    }

    pub fn model_family(&self) -> ModelFamily {
        self.gateway.family()
    }

    /// Up to five job suggestions for a profile. Never fails; fallback `[]`.
    pub async fn recommend_jobs(&self, profile: &UserProfile) -> Vec<JobRecommendation> {
        let skills = profile.skills().join(", ");
        let locations = profile.locations().join(", ");
        let industries = profile.industries().join(", ");
        let prompt = render(
            JOB_RECOMMENDATIONS_PROMPT,
            &[
                ("skills", skills.as_str()),
                ("current_role", or_na(profile.current_role.as_deref())),
                ("target_role", or_na(profile.target_role.as_deref())),
                ("career_stage", or_na(profile.career_stage.as_deref())),
                ("locations", locations.as_str()),
                ("industries", industries.as_str()),
            ],
        );
        self.structured_or_fallback("job recommendations", &prompt, 2000, StructuredKind::Array, vec![])
            .await
    }

    /// Compatibility score in 0..=100. Never fails; fallback `0`.
    pub async fn score_job(&self, user_id: &str, job_id: &str, posting: Option<&Value>) -> u32 {
        let job_details = posting
            .and_then(|p| serde_json::to_string_pretty(p).ok())
            .unwrap_or_else(|| "Not available".to_string());
        let prompt = render(
            JOB_SCORE_PROMPT,
            &[
                ("user_id", user_id),
                ("job_id", job_id),
                ("job_details", job_details.as_str()),
            ],
        );

        match self.gateway.invoke(&prompt, 50).await {
            Ok(reply) => parse_score(&reply),
            Err(e) => {
                error!("Job score failed: {e}");
                0
            }
        }
    }

    /// ATS-style review of a resume. Propagates upstream failures; an
    /// unparseable reply yields the canned analysis.
    pub async fn analyze_resume(&self, resume_text: &str) -> Result<ResumeAnalysis, LlmError> {
        let prompt = with_json_only(render(
            RESUME_ANALYSIS_PROMPT,
            &[("resume_text", resume_text)],
        ));
        let reply = self.gateway.invoke(&prompt, 3000).await?;
        Ok(extract_structured(
            &reply,
            StructuredKind::Object,
            ResumeAnalysis::fallback(),
        ))
    }

    /// Both inputs are cut to `TAILOR_INPUT_CHARS` characters first.
    /// Never fails.
    pub async fn tailor_resume(&self, resume_text: &str, job_description: &str) -> TailoringSuggestions {
        let prompt = render(
            TAILOR_RESUME_PROMPT,
            &[
                ("resume_text", truncate_chars(resume_text, TAILOR_INPUT_CHARS)),
                (
                    "job_description",
                    truncate_chars(job_description, TAILOR_INPUT_CHARS),
                ),
            ],
        );
        self.structured_or_fallback(
            "resume tailoring",
            &prompt,
            2000,
            StructuredKind::Object,
            TailoringSuggestions::fallback(),
        )
        .await
    }

    /// Never fails.
    pub async fn career_roadmap(
        &self,
        current_role: &str,
        target_role: &str,
        skills: &[String],
    ) -> CareerRoadmap {
        let skills = skills.join(", ");
        let prompt = render(
            CAREER_ROADMAP_PROMPT,
            &[
                ("current_role", current_role),
                ("target_role", target_role),
                ("skills", skills.as_str()),
            ],
        );
        self.structured_or_fallback(
            "career roadmap",
            &prompt,
            3000,
            StructuredKind::Object,
            CareerRoadmap::fallback(),
        )
        .await
    }

    /// Never fails.
    pub async fn market_insights(&self, role: &str, location: &str) -> MarketInsights {
        let prompt = render(MARKET_INSIGHTS_PROMPT, &[("role", role), ("location", location)]);
        self.structured_or_fallback(
            "market insights",
            &prompt,
            1500,
            StructuredKind::Object,
            MarketInsights::fallback(),
        )
        .await
    }

    /// Never fails; fallback is three generic questions.
    pub async fn interview_questions(&self, job_description: &str) -> Vec<String> {
        let prompt = render(
            INTERVIEW_QUESTIONS_PROMPT,
            &[(
                "job_description",
                truncate_chars(job_description, INTERVIEW_INPUT_CHARS),
            )],
        );
        self.structured_or_fallback(
            "interview questions",
            &prompt,
            1500,
            StructuredKind::Array,
            fallback_interview_questions(),
        )
        .await
    }

    /// Never fails.
    pub async fn salary_trends(&self, role: &str, location: &str) -> SalaryTrends {
        let prompt = render(SALARY_TRENDS_PROMPT, &[("role", role), ("location", location)]);
        self.structured_or_fallback(
            "salary trends",
            &prompt,
            1000,
            StructuredKind::Object,
            SalaryTrends::fallback(),
        )
        .await
    }

    /// Never fails; fallback `[]`.
    pub async fn skill_demand(&self, skills: &[String]) -> Vec<SkillDemand> {
        let skills = skills.join(", ");
        let prompt = render(SKILL_DEMAND_PROMPT, &[("skills", skills.as_str())]);
        self.structured_or_fallback("skill demand", &prompt, 2000, StructuredKind::Array, vec![])
            .await
    }

    /// Never fails.
    pub async fn analyze_interview_email(&self, email_content: &str) -> EmailAnalysis {
        let prompt = render(
            EMAIL_ANALYSIS_PROMPT,
            &[(
                "email_content",
                truncate_chars(email_content, EMAIL_INPUT_CHARS),
            )],
        );
        self.structured_or_fallback(
            "email analysis",
            &prompt,
            1000,
            StructuredKind::Object,
            EmailAnalysis::fallback(),
        )
        .await
    }

    async fn structured_or_fallback<T: DeserializeOwned>(
        &self,
        task: &str,
        prompt: &str,
        max_tokens: u32,
        kind: StructuredKind,
        fallback: T,
    ) -> T {
        let prompt = with_json_only(prompt.to_string());
        match self.gateway.invoke(&prompt, max_tokens).await {
            Ok(reply) => extract_structured(&reply, kind, fallback),
            Err(e) => {
                warn!("{task} failed upstream, using fallback: {e}");
                fallback
            }
        }
    }
}

/// Concatenates every ASCII digit in the reply and clamps to 100.
///
/// Deliberately naive: "Score: 8/10" reads as 810 and "85 out of 100" as
/// 85100, both clamped to 100. No digits at all scores 0.
pub fn parse_score(reply: &str) -> u32 {
    let digits: String = reply.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    // Too many digits for u64 is still far above 100.
    digits.parse::<u64>().map_or(100, |n| n.min(100) as u32)
}

fn with_json_only(mut prompt: String) -> String {
    prompt.push_str("\n\n");
    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}
