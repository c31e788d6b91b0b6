use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AccessPattern, AttemptHistory, ConfusionSignals, EngagementWindow, HelpSignal, HelpSource,
    QuizOutcome, ResourceDwell, Severity, StruggleType, StudentStruggle,
};

/// Thresholds for the seven detection rules. Defaults reproduce the platform
/// numbers exactly; construct once and pass to every rule call.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub quiz_high_pct: f64,
    pub quiz_medium_pct: f64,
    pub quiz_low_pct: f64,
    pub engagement_window_days: i64,
    pub engagement_high_minutes: f64,
    pub engagement_medium_minutes: f64,
    pub engagement_high_logins: i64,
    pub engagement_medium_logins: i64,
    pub dwell_trigger_ratio: f64,
    pub dwell_high_ratio: f64,
    pub dwell_medium_ratio: f64,
    pub access_trigger_count: i64,
    pub access_high_count: i64,
    pub access_medium_count: i64,
    pub attempts_trigger_count: i64,
    pub attempts_trigger_rate: f64,
    pub attempts_high_count: i64,
    pub attempts_high_rate: f64,
    pub attempts_medium_count: i64,
    pub attempts_medium_rate: f64,
    pub confusion_clicks_per_minute: f64,
    pub confusion_short_session_seconds: f64,
    pub confusion_navigation_changes: i64,
    pub confusion_trigger_score: f64,
    pub confusion_high_score: f64,
    pub confusion_medium_score: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            quiz_high_pct: 40.0,
            quiz_medium_pct: 60.0,
            quiz_low_pct: 70.0,
            engagement_window_days: 7,
            engagement_high_minutes: 15.0,
            engagement_medium_minutes: 30.0,
            engagement_high_logins: 2,
            engagement_medium_logins: 3,
            dwell_trigger_ratio: 2.5,
            dwell_high_ratio: 4.0,
            dwell_medium_ratio: 3.0,
            access_trigger_count: 3,
            access_high_count: 5,
            access_medium_count: 4,
            attempts_trigger_count: 3,
            attempts_trigger_rate: 0.5,
            attempts_high_count: 5,
            attempts_high_rate: 0.3,
            attempts_medium_count: 4,
            attempts_medium_rate: 0.4,
            confusion_clicks_per_minute: 10.0,
            confusion_short_session_seconds: 120.0,
            confusion_navigation_changes: 15,
            confusion_trigger_score: 0.5,
            confusion_high_score: 0.8,
            confusion_medium_score: 0.6,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn build_struggle(
    student_id: &str,
    topic: &str,
    concept: String,
    struggle_type: StruggleType,
    severity: Severity,
    confidence: f64,
    context: serde_json::Value,
    detection_method: &str,
    detected_at: DateTime<Utc>,
) -> StudentStruggle {
    StudentStruggle {
        struggle_id: None,
        student_id: student_id.to_string(),
        topic: topic.to_string(),
        concept,
        struggle_type,
        severity,
        confidence,
        context,
        detection_method: detection_method.to_string(),
        detected_at,
        resolved: false,
        resolved_at: None,
        resolution_method: None,
    }
}

/// Rule 1: quiz failure. Fires below 70% of the maximum score, with severity
/// stepping up at 60% and 40%.
pub fn detect_quiz_failure(
    outcome: &QuizOutcome,
    config: &DetectorConfig,
    detected_at: DateTime<Utc>,
) -> EngineResult<Option<StudentStruggle>> {
    if outcome.max_score <= 0.0 {
        return Err(EngineError::InvalidInput(
            "quiz max_score must be positive".to_string(),
        ));
    }
    if outcome.score < 0.0 {
        return Err(EngineError::InvalidInput(
            "quiz score must not be negative".to_string(),
        ));
    }

    let percentage = (outcome.score / outcome.max_score) * 100.0;

    let (severity, confidence) = if percentage < config.quiz_high_pct {
        (Severity::High, 0.95)
    } else if percentage < config.quiz_medium_pct {
        (Severity::Medium, 0.85)
    } else if percentage < config.quiz_low_pct {
        (Severity::Low, 0.70)
    } else {
        return Ok(None);
    };

    let context = json!({
        "quiz_id": outcome.quiz_id,
        "score": outcome.score,
        "max_score": outcome.max_score,
        "percentage": round1(percentage),
    });

    Ok(Some(build_struggle(
        &outcome.student_id,
        &outcome.topic,
        format!("Quiz: {}", outcome.quiz_id),
        StruggleType::QuizFailure,
        severity,
        confidence,
        context,
        "quiz_score_threshold",
        detected_at,
    )))
}

/// Rule 2: low engagement over a trailing window of daily activity.
pub fn detect_low_engagement(
    window: &EngagementWindow,
    config: &DetectorConfig,
    detected_at: DateTime<Utc>,
) -> EngineResult<Option<StudentStruggle>> {
    if window.days_checked <= 0 {
        return Err(EngineError::InvalidInput(
            "engagement window must cover at least one day".to_string(),
        ));
    }
    if window.total_session_seconds < 0 || window.login_count < 0 {
        return Err(EngineError::InvalidInput(
            "session time and login count must not be negative".to_string(),
        ));
    }

    let avg_minutes_per_day =
        window.total_session_seconds as f64 / (window.days_checked as f64 * 60.0);

    let (severity, confidence) = if avg_minutes_per_day < config.engagement_high_minutes
        && window.login_count < config.engagement_high_logins
    {
        (Severity::High, 0.85)
    } else if avg_minutes_per_day < config.engagement_medium_minutes
        || window.login_count < config.engagement_medium_logins
    {
        (Severity::Medium, 0.75)
    } else {
        return Ok(None);
    };

    let context = json!({
        "days_checked": window.days_checked,
        "avg_time_per_day_min": round1(avg_minutes_per_day),
        "total_logins": window.login_count,
        "total_time_min": round1(window.total_session_seconds as f64 / 60.0),
    });

    Ok(Some(build_struggle(
        &window.student_id,
        &window.topic,
        "General engagement".to_string(),
        StruggleType::LowEngagement,
        severity,
        confidence,
        context,
        "engagement_metrics",
        detected_at,
    )))
}

/// Rule 3: excessive time on a resource. Fires only past 2.5x the expected
/// duration.
pub fn detect_excessive_time(
    dwell: &ResourceDwell,
    config: &DetectorConfig,
    detected_at: DateTime<Utc>,
) -> EngineResult<Option<StudentStruggle>> {
    if dwell.expected_duration_seconds <= 0 {
        return Err(EngineError::InvalidInput(
            "expected duration must be positive".to_string(),
        ));
    }
    if dwell.time_spent_seconds < 0 {
        return Err(EngineError::InvalidInput(
            "time spent must not be negative".to_string(),
        ));
    }

    let ratio = dwell.time_spent_seconds as f64 / dwell.expected_duration_seconds as f64;
    if ratio <= config.dwell_trigger_ratio {
        return Ok(None);
    }

    let (severity, confidence) = if ratio > config.dwell_high_ratio {
        (Severity::High, 0.90)
    } else if ratio > config.dwell_medium_ratio {
        (Severity::Medium, 0.80)
    } else {
        (Severity::Low, 0.70)
    };

    let context = json!({
        "resource_id": dwell.resource_id,
        "time_spent_min": round1(dwell.time_spent_seconds as f64 / 60.0),
        "expected_duration_min": round1(dwell.expected_duration_seconds as f64 / 60.0),
        "time_ratio": round2(ratio),
    });

    Ok(Some(build_struggle(
        &dwell.student_id,
        &dwell.topic,
        format!("Resource {}", dwell.resource_id),
        StruggleType::TimeSpentHigh,
        severity,
        confidence,
        context,
        "time_threshold",
        detected_at,
    )))
}

/// Rule 4: repeated access to the same content without completion.
pub fn detect_repeated_access(
    pattern: &AccessPattern,
    config: &DetectorConfig,
    detected_at: DateTime<Utc>,
) -> EngineResult<Option<StudentStruggle>> {
    if pattern.access_count < 0 || pattern.days_window <= 0 {
        return Err(EngineError::InvalidInput(
            "access count must not be negative and the window must be positive".to_string(),
        ));
    }

    if pattern.access_count < config.access_trigger_count {
        return Ok(None);
    }

    let (severity, confidence) = if pattern.access_count >= config.access_high_count {
        (Severity::High, 0.85)
    } else if pattern.access_count >= config.access_medium_count {
        (Severity::Medium, 0.75)
    } else {
        (Severity::Low, 0.65)
    };

    let context = json!({
        "resource_id": pattern.resource_id,
        "access_count": pattern.access_count,
        "days_window": pattern.days_window,
    });

    Ok(Some(build_struggle(
        &pattern.student_id,
        &pattern.topic,
        format!("Resource {}", pattern.resource_id),
        StruggleType::RepeatedAccess,
        severity,
        confidence,
        context,
        "access_pattern",
        detected_at,
    )))
}

/// Rule 5: explicit help request. Always produces a record; severity follows
/// the request channel and confidence is fixed because the signal is explicit.
pub fn detect_help_request(signal: &HelpSignal, detected_at: DateTime<Utc>) -> StudentStruggle {
    let severity = match signal.source {
        HelpSource::InstructorMessage => Severity::High,
        HelpSource::ForumPost => Severity::Medium,
        HelpSource::HelpButton => Severity::Low,
    };

    let context = json!({
        "help_type": signal.source.as_str(),
        "concept": signal.concept,
    });

    build_struggle(
        &signal.student_id,
        &signal.topic,
        signal.concept.clone(),
        StruggleType::HelpRequest,
        severity,
        0.95,
        context,
        "explicit_help_request",
        detected_at,
    )
}

/// Rule 6: multiple failed attempts. Requires at least 3 attempts with a
/// success rate under 50%.
pub fn detect_multiple_attempts(
    history: &AttemptHistory,
    config: &DetectorConfig,
    detected_at: DateTime<Utc>,
) -> EngineResult<Option<StudentStruggle>> {
    if history.attempt_count < 0 {
        return Err(EngineError::InvalidInput(
            "attempt count must not be negative".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&history.success_rate) {
        return Err(EngineError::InvalidInput(
            "success rate must be between 0 and 1".to_string(),
        ));
    }

    if history.attempt_count < config.attempts_trigger_count
        || history.success_rate >= config.attempts_trigger_rate
    {
        return Ok(None);
    }

    let (severity, confidence) = if history.attempt_count >= config.attempts_high_count
        && history.success_rate < config.attempts_high_rate
    {
        (Severity::High, 0.90)
    } else if history.attempt_count >= config.attempts_medium_count
        || history.success_rate < config.attempts_medium_rate
    {
        (Severity::Medium, 0.80)
    } else {
        (Severity::Low, 0.70)
    };

    let context = json!({
        "activity_id": history.activity_id,
        "attempt_count": history.attempt_count,
        "success_rate": round1(history.success_rate * 100.0),
    });

    Ok(Some(build_struggle(
        &history.student_id,
        &history.topic,
        format!("Activity: {}", history.activity_id),
        StruggleType::MultipleAttempts,
        severity,
        confidence,
        context,
        "attempt_pattern",
        detected_at,
    )))
}

/// Rule 7: confusion indicators. Adds up three behavioural signals (rapid
/// clicking, very short sessions, erratic navigation) and fires at 0.5.
pub fn detect_confusion_indicators(
    signals: &ConfusionSignals,
    config: &DetectorConfig,
    detected_at: DateTime<Utc>,
) -> EngineResult<Option<StudentStruggle>> {
    if signals.clicks_per_minute < 0.0
        || signals.avg_session_seconds < 0.0
        || signals.navigation_changes < 0
    {
        return Err(EngineError::InvalidInput(
            "confusion signals must not be negative".to_string(),
        ));
    }

    let mut confusion_score = 0.0;
    let mut detected_patterns = Vec::new();

    if signals.clicks_per_minute > config.confusion_clicks_per_minute {
        confusion_score += 0.4;
        detected_patterns.push("rapid_clicking");
    }
    if signals.avg_session_seconds < config.confusion_short_session_seconds {
        confusion_score += 0.3;
        detected_patterns.push("short_sessions");
    }
    if signals.navigation_changes > config.confusion_navigation_changes {
        confusion_score += 0.3;
        detected_patterns.push("erratic_navigation");
    }

    if confusion_score < config.confusion_trigger_score {
        return Ok(None);
    }

    let (severity, confidence) = if confusion_score >= config.confusion_high_score {
        (Severity::High, 0.80)
    } else if confusion_score >= config.confusion_medium_score {
        (Severity::Medium, 0.70)
    } else {
        (Severity::Low, 0.60)
    };

    let context = json!({
        "confusion_score": round2(confusion_score),
        "detected_patterns": detected_patterns,
        "clicks_per_minute": signals.clicks_per_minute,
        "avg_session_duration": signals.avg_session_seconds,
        "navigation_changes": signals.navigation_changes,
    });

    Ok(Some(build_struggle(
        &signals.student_id,
        &signals.topic,
        "Behavioral patterns".to_string(),
        StruggleType::ConfusionIndicator,
        severity,
        confidence,
        context,
        "behavioral_analysis",
        detected_at,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn quiz(score: f64, max_score: f64) -> QuizOutcome {
        QuizOutcome {
            student_id: "stu-001".to_string(),
            quiz_id: "quiz-algebra-3".to_string(),
            topic: "Algebra".to_string(),
            score,
            max_score,
        }
    }

    #[test]
    fn quiz_failure_severity_boundaries() {
        let config = DetectorConfig::default();

        let high = detect_quiz_failure(&quiz(39.0, 100.0), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(high.severity, Severity::High);
        assert!((high.confidence - 0.95).abs() < 1e-9);

        let medium = detect_quiz_failure(&quiz(40.0, 100.0), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(medium.severity, Severity::Medium);
        assert!((medium.confidence - 0.85).abs() < 1e-9);

        let low = detect_quiz_failure(&quiz(69.9, 100.0), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(low.severity, Severity::Low);
        assert!((low.confidence - 0.70).abs() < 1e-9);

        assert!(detect_quiz_failure(&quiz(70.0, 100.0), &config, now())
            .unwrap()
            .is_none());
    }

    #[test]
    fn quiz_failure_scales_with_max_score() {
        let config = DetectorConfig::default();
        let struggle = detect_quiz_failure(&quiz(19.0, 50.0), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(struggle.severity, Severity::High);
        assert_eq!(struggle.struggle_type, StruggleType::QuizFailure);
        assert_eq!(struggle.context["percentage"], 38.0);
    }

    #[test]
    fn quiz_failure_rejects_bad_inputs() {
        let config = DetectorConfig::default();
        assert!(matches!(
            detect_quiz_failure(&quiz(10.0, 0.0), &config, now()),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            detect_quiz_failure(&quiz(-1.0, 100.0), &config, now()),
            Err(EngineError::InvalidInput(_))
        ));
    }

    fn window(total_session_seconds: i64, login_count: i64) -> EngagementWindow {
        EngagementWindow {
            student_id: "stu-001".to_string(),
            topic: "Geometry".to_string(),
            days_checked: 7,
            total_session_seconds,
            login_count,
        }
    }

    #[test]
    fn low_engagement_tiers() {
        let config = DetectorConfig::default();

        // 10 min/day, one login
        let high = detect_low_engagement(&window(7 * 10 * 60, 1), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(high.severity, Severity::High);

        // 20 min/day, plenty of logins: medium via the time branch
        let medium = detect_low_engagement(&window(7 * 20 * 60, 6), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(medium.severity, Severity::Medium);

        // 45 min/day, two logins: medium via the login branch
        let via_logins = detect_low_engagement(&window(7 * 45 * 60, 2), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(via_logins.severity, Severity::Medium);

        // 45 min/day, three logins: fine
        assert!(detect_low_engagement(&window(7 * 45 * 60, 3), &config, now())
            .unwrap()
            .is_none());
    }

    fn dwell(time_spent_seconds: i64, expected_duration_seconds: i64) -> ResourceDwell {
        ResourceDwell {
            student_id: "stu-001".to_string(),
            resource_id: 42,
            topic: "Fractions".to_string(),
            time_spent_seconds,
            expected_duration_seconds,
        }
    }

    #[test]
    fn excessive_time_triggers_past_ratio() {
        let config = DetectorConfig::default();

        assert!(detect_excessive_time(&dwell(1500, 600), &config, now())
            .unwrap()
            .is_none());

        let low = detect_excessive_time(&dwell(1700, 600), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(low.severity, Severity::Low);

        let medium = detect_excessive_time(&dwell(1860, 600), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(medium.severity, Severity::Medium);

        let high = detect_excessive_time(&dwell(2500, 600), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(high.severity, Severity::High);
        assert!((high.confidence - 0.90).abs() < 1e-9);
    }

    #[test]
    fn repeated_access_counts() {
        let config = DetectorConfig::default();
        let pattern = |count| AccessPattern {
            student_id: "stu-001".to_string(),
            resource_id: 7,
            topic: "Limits".to_string(),
            access_count: count,
            days_window: 7,
        };

        assert!(detect_repeated_access(&pattern(2), &config, now())
            .unwrap()
            .is_none());
        assert_eq!(
            detect_repeated_access(&pattern(3), &config, now())
                .unwrap()
                .unwrap()
                .severity,
            Severity::Low
        );
        assert_eq!(
            detect_repeated_access(&pattern(4), &config, now())
                .unwrap()
                .unwrap()
                .severity,
            Severity::Medium
        );
        assert_eq!(
            detect_repeated_access(&pattern(5), &config, now())
                .unwrap()
                .unwrap()
                .severity,
            Severity::High
        );
    }

    #[test]
    fn help_request_severity_follows_channel() {
        let signal = |source| HelpSignal {
            student_id: "stu-001".to_string(),
            topic: "Derivatives".to_string(),
            concept: "Chain rule".to_string(),
            source,
        };

        let high = detect_help_request(&signal(HelpSource::InstructorMessage), now());
        assert_eq!(high.severity, Severity::High);
        assert!((high.confidence - 0.95).abs() < 1e-9);

        let medium = detect_help_request(&signal(HelpSource::ForumPost), now());
        assert_eq!(medium.severity, Severity::Medium);

        let low = detect_help_request(&signal(HelpSource::HelpButton), now());
        assert_eq!(low.severity, Severity::Low);
        assert_eq!(low.concept, "Chain rule");
    }

    fn attempts(count: i64, rate: f64) -> AttemptHistory {
        AttemptHistory {
            student_id: "stu-001".to_string(),
            activity_id: "act-9".to_string(),
            topic: "Integrals".to_string(),
            attempt_count: count,
            success_rate: rate,
        }
    }

    #[test]
    fn multiple_attempts_preconditions() {
        let config = DetectorConfig::default();

        // Too few attempts or a passable rate never fires.
        assert!(detect_multiple_attempts(&attempts(2, 0.1), &config, now())
            .unwrap()
            .is_none());
        assert!(detect_multiple_attempts(&attempts(6, 0.5), &config, now())
            .unwrap()
            .is_none());

        let high = detect_multiple_attempts(&attempts(5, 0.2), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(high.severity, Severity::High);

        let medium = detect_multiple_attempts(&attempts(4, 0.45), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(medium.severity, Severity::Medium);

        // 3 attempts at 0.45: below the medium count and above the medium
        // rate, so it stays Low.
        let low = detect_multiple_attempts(&attempts(3, 0.45), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(low.severity, Severity::Low);
    }

    #[test]
    fn confusion_score_is_additive() {
        let config = DetectorConfig::default();
        let signals = |clicks, session_secs, navs| ConfusionSignals {
            student_id: "stu-001".to_string(),
            topic: "Vectors".to_string(),
            clicks_per_minute: clicks,
            avg_session_seconds: session_secs,
            navigation_changes: navs,
        };

        // A single 0.4 signal stays below the 0.5 trigger.
        assert!(
            detect_confusion_indicators(&signals(12.0, 300.0, 5), &config, now())
                .unwrap()
                .is_none()
        );

        // 0.3 + 0.3 = 0.6 → Medium
        let medium = detect_confusion_indicators(&signals(5.0, 90.0, 20), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(medium.severity, Severity::Medium);

        // 0.4 + 0.3 = 0.7 → still Medium
        let seven = detect_confusion_indicators(&signals(12.0, 90.0, 5), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(seven.severity, Severity::Medium);

        // All three → 1.0 → High
        let high = detect_confusion_indicators(&signals(12.0, 90.0, 20), &config, now())
            .unwrap()
            .unwrap();
        assert_eq!(high.severity, Severity::High);
        assert_eq!(high.context["confusion_score"], 1.0);
    }
}
