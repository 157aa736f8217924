//! Typed shapes of the model's structured replies, and the fixed fallback
//! each task returns when a reply cannot be used.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::models::profile::SalaryRange;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub title: String,
    pub description: String,
    pub match_score: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub ats_score: Number,
    pub format_score: Number,
    pub content_score: Number,
    pub keyword_match: Number,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ResumeAnalysis {
    pub fn fallback() -> Self {
        Self {
            ats_score: 75.into(),
            format_score: 80.into(),
            content_score: 75.into(),
            keyword_match: 70.into(),
            strengths: strings(&["Clear structure", "Quantifiable achievements"]),
            weaknesses: strings(&["Could add more keywords", "Needs stronger action verbs"]),
            suggestions: strings(&["Add measurable outcomes", "Include relevant certifications"]),
        }
    }
}

// Field names are snake_case on the wire for this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoringSuggestions {
    pub suggestions: Vec<String>,
    pub keywords_to_add: Vec<String>,
    pub skills_to_highlight: Vec<String>,
}

impl TailoringSuggestions {
    pub fn fallback() -> Self {
        Self {
            suggestions: strings(&["Align experience with job requirements"]),
            keywords_to_add: vec![],
            skills_to_highlight: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredSkill {
    pub skill: String,
    pub current_level: Number,
    pub required_level: Number,
    pub priority: String,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    pub description: String,
    pub timeframe: String,
    #[serde(default)]
    pub action_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRoadmap {
    pub timeline: String,
    pub required_skills: Vec<RequiredSkill>,
    pub milestones: Vec<Milestone>,
    pub certifications: Vec<String>,
    pub experiences: Vec<String>,
}

impl CareerRoadmap {
    pub fn fallback() -> Self {
        Self {
            timeline: "18-24 months".to_string(),
            required_skills: vec![],
            milestones: vec![],
            certifications: vec![],
            experiences: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    pub demand_level: String,
    /// Models answer with a number or a formatted string ("$120k").
    pub average_salary: Value,
    pub growth_trend: String,
    pub top_companies_hiring: Vec<String>,
    pub in_demand_skills: Vec<String>,
    pub insights: Vec<String>,
}

impl MarketInsights {
    pub fn fallback() -> Self {
        Self {
            demand_level: "high".to_string(),
            average_salary: Value::from(120_000),
            growth_trend: "15%".to_string(),
            top_companies_hiring: vec![],
            in_demand_skills: vec![],
            insights: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSalary {
    pub level: String,
    pub salary: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryTrends {
    pub current_average: Number,
    pub range: SalaryRange,
    pub year_over_year_change: String,
    pub experience_levels: Vec<LevelSalary>,
}

impl SalaryTrends {
    pub fn fallback() -> Self {
        Self {
            current_average: 120_000.into(),
            range: SalaryRange {
                min: 90_000.into(),
                max: 160_000.into(),
            },
            year_over_year_change: "8.5%".to_string(),
            experience_levels: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDemand {
    pub skill: String,
    pub current_demand: Number,
    pub growth_rate: String,
    pub outlook: String,
    #[serde(default)]
    pub related_roles: Vec<String>,
}

pub fn fallback_interview_questions() -> Vec<String> {
    strings(&[
        "Tell me about yourself",
        "Why are you interested in this role?",
        "What are your greatest strengths?",
    ])
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAnalysis {
    pub is_interview: bool,
    pub confidence: Number,
    #[serde(default)]
    pub interview_details: InterviewDetails,
    pub suggested_action: String,
}

impl EmailAnalysis {
    pub fn fallback() -> Self {
        Self {
            is_interview: false,
            confidence: 0.into(),
            interview_details: InterviewDetails::default(),
            suggested_action: "No action needed".to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
