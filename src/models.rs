use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// VARK learning style labels produced by the upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningStyle {
    Visual,
    Auditory,
    Reading,
    Kinesthetic,
    Mixed,
}

impl LearningStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "Visual",
            LearningStyle::Auditory => "Auditory",
            LearningStyle::Reading => "Reading",
            LearningStyle::Kinesthetic => "Kinesthetic",
            LearningStyle::Mixed => "Mixed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Visual" => Some(LearningStyle::Visual),
            "Auditory" => Some(LearningStyle::Auditory),
            "Reading" => Some(LearningStyle::Reading),
            "Kinesthetic" => Some(LearningStyle::Kinesthetic),
            "Mixed" => Some(LearningStyle::Mixed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Easy" => Some(Difficulty::Easy),
            "Medium" => Some(Difficulty::Medium),
            "Hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// The seven catalog resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Video,
    Article,
    Interactive,
    Practice,
    Quiz,
    Cheatsheet,
    Tutorial,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Video => "video",
            ResourceType::Article => "article",
            ResourceType::Interactive => "interactive",
            ResourceType::Practice => "practice",
            ResourceType::Quiz => "quiz",
            ResourceType::Cheatsheet => "cheatsheet",
            ResourceType::Tutorial => "tutorial",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "video" => Some(ResourceType::Video),
            "article" => Some(ResourceType::Article),
            "interactive" => Some(ResourceType::Interactive),
            "practice" => Some(ResourceType::Practice),
            "quiz" => Some(ResourceType::Quiz),
            "cheatsheet" => Some(ResourceType::Cheatsheet),
            "tutorial" => Some(ResourceType::Tutorial),
            _ => None,
        }
    }
}

/// The eight struggle tags the platform recognises. The detector rules emit
/// the first seven; `drop_pattern` is assigned by the upstream disengagement
/// predictor and only flows through the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StruggleType {
    QuizFailure,
    LowEngagement,
    TimeSpentHigh,
    RepeatedAccess,
    HelpRequest,
    MultipleAttempts,
    ConfusionIndicator,
    DropPattern,
}

impl StruggleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StruggleType::QuizFailure => "quiz_failure",
            StruggleType::LowEngagement => "low_engagement",
            StruggleType::TimeSpentHigh => "time_spent_high",
            StruggleType::RepeatedAccess => "repeated_access",
            StruggleType::HelpRequest => "help_request",
            StruggleType::MultipleAttempts => "multiple_attempts",
            StruggleType::ConfusionIndicator => "confusion_indicator",
            StruggleType::DropPattern => "drop_pattern",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "quiz_failure" => Some(StruggleType::QuizFailure),
            "low_engagement" => Some(StruggleType::LowEngagement),
            "time_spent_high" => Some(StruggleType::TimeSpentHigh),
            "repeated_access" => Some(StruggleType::RepeatedAccess),
            "help_request" => Some(StruggleType::HelpRequest),
            "multiple_attempts" => Some(StruggleType::MultipleAttempts),
            "confusion_indicator" => Some(StruggleType::ConfusionIndicator),
            "drop_pattern" => Some(StruggleType::DropPattern),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Severity::Low),
            "Medium" => Some(Severity::Medium),
            "High" => Some(Severity::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "Improving",
            Trend::Stable => "Stable",
            Trend::Declining => "Declining",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Improving" => Some(Trend::Improving),
            "Stable" => Some(Trend::Stable),
            "Declining" => Some(Trend::Declining),
            _ => None,
        }
    }
}

/// One day of aggregated engagement sub-scores for a student, produced by the
/// upstream aggregation job and consumed read-only here. Sub-scores are 0-100;
/// the lag and rolling fields stay absent until enough history exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementSnapshot {
    pub student_id: String,
    pub date: NaiveDate,
    pub login_score: f64,
    pub session_score: f64,
    pub interaction_score: f64,
    pub forum_score: f64,
    pub assignment_score: f64,
    pub engagement_score: f64,
    pub engagement_level: String,
    pub trend: Trend,
    pub score_lag_1day: Option<f64>,
    pub score_lag_7days: Option<f64>,
    pub rolling_avg_7days: Option<f64>,
    pub rolling_avg_30days: Option<f64>,
}

/// Student learning profile maintained by the learning-style service. The
/// style label, confidence and probability map come from the upstream
/// classifier; the engine only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: String,
    pub learning_style: LearningStyle,
    pub style_confidence: f64,
    pub style_probabilities: HashMap<String, f64>,
    pub preferred_difficulty: Difficulty,
    pub struggle_topics: Vec<String>,
}

/// Catalog entry owned by the external resource catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningResource {
    pub resource_id: i64,
    pub resource_type: ResourceType,
    pub title: String,
    pub topic: String,
    pub subject: String,
    pub subtopic: Option<String>,
    pub difficulty: Difficulty,
    pub learning_styles: Vec<LearningStyle>,
    pub tags: Vec<String>,
    pub popularity_score: f64,
    pub effectiveness_rating: f64,
    pub avg_helpfulness_rating: f64,
    pub total_views: i64,
    pub total_completions: i64,
    pub is_active: bool,
    pub verified: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// A detected difficulty. Created whole by one detector rule; only the
/// external resolve action mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentStruggle {
    pub struggle_id: Option<i64>,
    pub student_id: String,
    pub topic: String,
    pub concept: String,
    pub struggle_type: StruggleType,
    pub severity: Severity,
    pub confidence: f64,
    pub context: Value,
    pub detection_method: String,
    pub detected_at: DateTime<Utc>,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution_method: Option<String>,
}

/// Fixed-field per-factor breakdown behind every relevance score. Keeping the
/// six factors as named floats makes the weighted-sum contract checkable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub style_match: f64,
    pub topic_relevance: f64,
    pub difficulty_alignment: f64,
    pub effectiveness: f64,
    pub recency: f64,
    pub diversity: f64,
}

/// A catalog resource paired with its relevance score.
#[derive(Debug, Clone)]
pub struct RankedResource {
    pub resource: LearningResource,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Write-once recommendation record; engagement tracking on it is mutated by
/// external callers, never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRecommendation {
    pub student_id: String,
    pub resource_id: i64,
    pub struggle_id: Option<i64>,
    pub reason: String,
    pub relevance_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub rank_position: i32,
    pub priority: Priority,
    pub recommended_at: DateTime<Utc>,
}

/// Slim view of a recently delivered recommendation, fetched for the 7-day
/// exclusion filter and the diversity factor.
#[derive(Debug, Clone)]
pub struct RecentRecommendation {
    pub resource_id: i64,
    pub resource_type: Option<ResourceType>,
}

/// Recommendation joined with its resource for operator-facing output.
#[derive(Debug, Clone)]
pub struct RecommendationView {
    pub title: String,
    pub resource_type: ResourceType,
    pub relevance_score: f64,
    pub rank_position: i32,
    pub priority: Priority,
    pub reason: String,
    pub recommended_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    AssignmentPrep,
    QuizInteraction,
    ForumEngagement,
    GeneralStudy,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::AssignmentPrep => "assignment_prep",
            TaskType::QuizInteraction => "quiz_interaction",
            TaskType::ForumEngagement => "forum_engagement",
            TaskType::GeneralStudy => "general_study",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetail {
    pub session_number: u32,
    pub duration_minutes: u32,
    pub task_type: TaskType,
    pub suggested_time: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaskBreakdown {
    pub assignment_prep_minutes: u32,
    pub quiz_interaction_minutes: u32,
    pub forum_engagement_minutes: u32,
    pub general_study_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySchedule {
    pub date: NaiveDate,
    pub day_name: String,
    pub is_light_day: bool,
    pub total_minutes: u32,
    pub sessions: Vec<SessionDetail>,
    pub task_breakdown: TaskBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySchedule {
    pub student_id: String,
    pub week_start_date: NaiveDate,
    pub week_end_date: NaiveDate,
    pub session_length_minutes: u32,
    pub sessions_per_day: u32,
    pub avg_daily_minutes: u32,
    pub load_reduction_factor: f64,
    pub has_light_days: bool,
    pub features_used: Value,
    pub daily_schedules: Vec<DailySchedule>,
}

// Detector rule inputs. Each rule consumes one immutable event or window
// snapshot; nothing here touches the store.

#[derive(Debug, Clone)]
pub struct QuizOutcome {
    pub student_id: String,
    pub quiz_id: String,
    pub topic: String,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone)]
pub struct EngagementWindow {
    pub student_id: String,
    pub topic: String,
    pub days_checked: i64,
    pub total_session_seconds: i64,
    pub login_count: i64,
}

#[derive(Debug, Clone)]
pub struct ResourceDwell {
    pub student_id: String,
    pub resource_id: i64,
    pub topic: String,
    pub time_spent_seconds: i64,
    pub expected_duration_seconds: i64,
}

#[derive(Debug, Clone)]
pub struct AccessPattern {
    pub student_id: String,
    pub resource_id: i64,
    pub topic: String,
    pub access_count: i64,
    pub days_window: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpSource {
    InstructorMessage,
    ForumPost,
    HelpButton,
}

impl HelpSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            HelpSource::InstructorMessage => "instructor_message",
            HelpSource::ForumPost => "forum_post",
            HelpSource::HelpButton => "help_button",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "instructor_message" => Some(HelpSource::InstructorMessage),
            "forum_post" => Some(HelpSource::ForumPost),
            "help_button" => Some(HelpSource::HelpButton),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HelpSignal {
    pub student_id: String,
    pub topic: String,
    pub concept: String,
    pub source: HelpSource,
}

#[derive(Debug, Clone)]
pub struct AttemptHistory {
    pub student_id: String,
    pub activity_id: String,
    pub topic: String,
    pub attempt_count: i64,
    pub success_rate: f64,
}

#[derive(Debug, Clone)]
pub struct ConfusionSignals {
    pub student_id: String,
    pub topic: String,
    pub clicks_per_minute: f64,
    pub avg_session_seconds: f64,
    pub navigation_changes: i64,
}
