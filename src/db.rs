use std::collections::HashMap;

use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde_json::Value;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::models::{
    Difficulty, EngagementSnapshot, LearningResource, LearningStyle, Priority,
    RecentRecommendation, RecommendationView, ResourceRecommendation, ResourceType, Severity,
    StruggleType, StudentProfile, StudentStruggle, StudySchedule, Trend,
};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn styles_from_json(value: Value) -> Vec<LearningStyle> {
    value
        .as_array()
        .map(|styles| {
            styles
                .iter()
                .filter_map(|s| s.as_str().and_then(LearningStyle::parse))
                .collect()
        })
        .unwrap_or_default()
}

fn strings_from_json(value: Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn profile_from_row(row: &sqlx::postgres::PgRow) -> anyhow::Result<StudentProfile> {
    let style: String = row.get("learning_style");
    let difficulty: String = row.get("preferred_difficulty");
    let probabilities: Value = row.get("style_probabilities");
    let struggle_topics: Value = row.get("struggle_topics");

    Ok(StudentProfile {
        student_id: row.get("student_id"),
        learning_style: LearningStyle::parse(&style)
            .with_context(|| format!("unknown learning style {style}"))?,
        style_confidence: row.get("style_confidence"),
        style_probabilities: serde_json::from_value::<HashMap<String, f64>>(probabilities)
            .unwrap_or_default(),
        preferred_difficulty: Difficulty::parse(&difficulty)
            .with_context(|| format!("unknown difficulty {difficulty}"))?,
        struggle_topics: strings_from_json(struggle_topics),
    })
}

pub async fn fetch_profile(
    pool: &PgPool,
    student_id: &str,
) -> anyhow::Result<Option<StudentProfile>> {
    let row = sqlx::query(
        "SELECT student_id, learning_style, style_confidence, style_probabilities, \
         preferred_difficulty, struggle_topics \
         FROM intervention_engine.student_profiles WHERE student_id = $1",
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(profile_from_row).transpose()
}

fn resource_from_row(row: &sqlx::postgres::PgRow) -> anyhow::Result<LearningResource> {
    let resource_type: String = row.get("resource_type");
    let difficulty: String = row.get("difficulty_level");
    let learning_styles: Value = row.get("learning_styles");
    let tags: Value = row.get("tags");

    Ok(LearningResource {
        resource_id: row.get("resource_id"),
        resource_type: ResourceType::parse(&resource_type)
            .with_context(|| format!("unknown resource type {resource_type}"))?,
        title: row.get("title"),
        topic: row.get("topic"),
        subject: row.get("subject"),
        subtopic: row.get("subtopic"),
        difficulty: Difficulty::parse(&difficulty)
            .with_context(|| format!("unknown difficulty {difficulty}"))?,
        learning_styles: styles_from_json(learning_styles),
        tags: strings_from_json(tags),
        popularity_score: row.get("popularity_score"),
        effectiveness_rating: row.get("effectiveness_rating"),
        avg_helpfulness_rating: row.get("avg_helpfulness_rating"),
        total_views: row.get("total_views"),
        total_completions: row.get("total_completions"),
        is_active: row.get("is_active"),
        verified: row.get("verified"),
        created_at: row.get("created_at"),
    })
}

/// The active catalog snapshot. Topic filtering and the candidate cap are the
/// ranker's job; the store only knows active versus retired.
pub async fn fetch_catalog(pool: &PgPool) -> anyhow::Result<Vec<LearningResource>> {
    let rows = sqlx::query(
        "SELECT resource_id, resource_type, title, topic, subject, subtopic, \
         difficulty_level, learning_styles, tags, popularity_score, effectiveness_rating, \
         avg_helpfulness_rating, total_views, total_completions, is_active, verified, created_at \
         FROM intervention_engine.learning_resources WHERE is_active = TRUE \
         ORDER BY resource_id",
    )
    .fetch_all(pool)
    .await?;

    debug!(count = rows.len(), "fetched catalog resources");
    rows.iter().map(resource_from_row).collect()
}

pub async fn fetch_recent_recommendations(
    pool: &PgPool,
    student_id: &str,
    days: i64,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<RecentRecommendation>> {
    let cutoff = now - Duration::days(days.max(1));
    let rows = sqlx::query(
        "SELECT r.resource_id, res.resource_type \
         FROM intervention_engine.recommendations r \
         LEFT JOIN intervention_engine.learning_resources res ON res.resource_id = r.resource_id \
         WHERE r.student_id = $1 AND r.recommended_at >= $2",
    )
    .bind(student_id)
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    let mut recent = Vec::new();
    for row in rows {
        let resource_type: Option<String> = row.get("resource_type");
        recent.push(RecentRecommendation {
            resource_id: row.get("resource_id"),
            resource_type: resource_type.as_deref().and_then(ResourceType::parse),
        });
    }
    Ok(recent)
}

fn struggle_from_row(row: &sqlx::postgres::PgRow) -> anyhow::Result<StudentStruggle> {
    let struggle_type: String = row.get("struggle_type");
    let severity: String = row.get("severity");

    Ok(StudentStruggle {
        struggle_id: Some(row.get("struggle_id")),
        student_id: row.get("student_id"),
        topic: row.get("topic"),
        concept: row.get("concept"),
        struggle_type: StruggleType::parse(&struggle_type)
            .with_context(|| format!("unknown struggle type {struggle_type}"))?,
        severity: Severity::parse(&severity)
            .with_context(|| format!("unknown severity {severity}"))?,
        confidence: row.get("confidence_score"),
        context: row.get("context"),
        detection_method: row.get("detection_method"),
        detected_at: row.get("detected_at"),
        resolved: row.get("resolved"),
        resolved_at: row.get("resolved_at"),
        resolution_method: row.get("resolution_method"),
    })
}

pub async fn fetch_struggle(
    pool: &PgPool,
    struggle_id: i64,
) -> anyhow::Result<Option<StudentStruggle>> {
    let row = sqlx::query(
        "SELECT struggle_id, student_id, topic, concept, struggle_type, severity, \
         confidence_score, context, detection_method, detected_at, resolved, resolved_at, \
         resolution_method \
         FROM intervention_engine.student_struggles WHERE struggle_id = $1",
    )
    .bind(struggle_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(struggle_from_row).transpose()
}

/// Unresolved struggles for a student, worst first, optionally narrowed to a
/// topic substring.
pub async fn fetch_unresolved_struggles(
    pool: &PgPool,
    student_id: &str,
    topic: Option<&str>,
) -> anyhow::Result<Vec<StudentStruggle>> {
    let mut query = String::from(
        "SELECT struggle_id, student_id, topic, concept, struggle_type, severity, \
         confidence_score, context, detection_method, detected_at, resolved, resolved_at, \
         resolution_method \
         FROM intervention_engine.student_struggles \
         WHERE student_id = $1 AND resolved = FALSE",
    );
    if topic.is_some() {
        query.push_str(" AND topic ILIKE $2");
    }
    query.push_str(
        " ORDER BY CASE severity WHEN 'High' THEN 3 WHEN 'Medium' THEN 2 ELSE 1 END DESC, \
         detected_at DESC",
    );

    let mut rows = sqlx::query(&query).bind(student_id);
    if let Some(topic) = topic {
        rows = rows.bind(format!("%{topic}%"));
    }

    let records = rows.fetch_all(pool).await?;
    records.iter().map(struggle_from_row).collect()
}

pub async fn save_struggle(pool: &PgPool, struggle: &StudentStruggle) -> anyhow::Result<i64> {
    let row = sqlx::query(
        r#"
        INSERT INTO intervention_engine.student_struggles
        (student_id, topic, concept, struggle_type, severity, confidence_score,
         context, detection_method, detected_at, resolved)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE)
        RETURNING struggle_id
        "#,
    )
    .bind(&struggle.student_id)
    .bind(&struggle.topic)
    .bind(&struggle.concept)
    .bind(struggle.struggle_type.as_str())
    .bind(struggle.severity.as_str())
    .bind(struggle.confidence)
    .bind(&struggle.context)
    .bind(&struggle.detection_method)
    .bind(struggle.detected_at)
    .fetch_one(pool)
    .await?;

    Ok(row.get("struggle_id"))
}

/// External resolve transition: stamps the method and timestamp, nothing else.
pub async fn resolve_struggle(
    pool: &PgPool,
    struggle_id: i64,
    resolution_method: &str,
    resolved_at: DateTime<Utc>,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        "UPDATE intervention_engine.student_struggles \
         SET resolved = TRUE, resolved_at = $2, resolution_method = $3 \
         WHERE struggle_id = $1 AND resolved = FALSE",
    )
    .bind(struggle_id)
    .bind(resolved_at)
    .bind(resolution_method)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn save_recommendations(
    pool: &PgPool,
    recommendations: &[ResourceRecommendation],
) -> anyhow::Result<usize> {
    for recommendation in recommendations {
        sqlx::query(
            r#"
            INSERT INTO intervention_engine.recommendations
            (student_id, resource_id, struggle_id, reason, relevance_score,
             score_breakdown, rank_position, priority, recommended_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&recommendation.student_id)
        .bind(recommendation.resource_id)
        .bind(recommendation.struggle_id)
        .bind(&recommendation.reason)
        .bind(recommendation.relevance_score)
        .bind(serde_json::to_value(recommendation.score_breakdown)?)
        .bind(recommendation.rank_position)
        .bind(recommendation.priority.as_str())
        .bind(recommendation.recommended_at)
        .execute(pool)
        .await?;
    }

    debug!(count = recommendations.len(), "saved recommendations");
    Ok(recommendations.len())
}

pub async fn fetch_recommendation_feed(
    pool: &PgPool,
    student_id: &str,
    days: i64,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<RecommendationView>> {
    let cutoff = now - Duration::days(days.max(1));
    let rows = sqlx::query(
        "SELECT res.title, res.resource_type, r.relevance_score, r.rank_position, \
         r.priority, r.reason, r.recommended_at \
         FROM intervention_engine.recommendations r \
         JOIN intervention_engine.learning_resources res ON res.resource_id = r.resource_id \
         WHERE r.student_id = $1 AND r.recommended_at >= $2 \
         ORDER BY r.recommended_at DESC, r.rank_position ASC",
    )
    .bind(student_id)
    .bind(cutoff)
    .fetch_all(pool)
    .await?;

    let mut feed = Vec::new();
    for row in rows {
        let resource_type: String = row.get("resource_type");
        let priority: String = row.get("priority");
        feed.push(RecommendationView {
            title: row.get("title"),
            resource_type: ResourceType::parse(&resource_type)
                .with_context(|| format!("unknown resource type {resource_type}"))?,
            relevance_score: row.get("relevance_score"),
            rank_position: row.get("rank_position"),
            priority: match priority.as_str() {
                "High" => Priority::High,
                "Medium" => Priority::Medium,
                _ => Priority::Low,
            },
            reason: row.get("reason"),
            recommended_at: row.get("recommended_at"),
        });
    }
    Ok(feed)
}

fn snapshot_from_row(row: &sqlx::postgres::PgRow) -> anyhow::Result<EngagementSnapshot> {
    let trend: String = row.get("engagement_trend");

    Ok(EngagementSnapshot {
        student_id: row.get("student_id"),
        date: row.get("score_date"),
        login_score: row.get("login_score"),
        session_score: row.get("session_score"),
        interaction_score: row.get("interaction_score"),
        forum_score: row.get("forum_score"),
        assignment_score: row.get("assignment_score"),
        engagement_score: row.get("engagement_score"),
        engagement_level: row.get("engagement_level"),
        trend: Trend::parse(&trend).with_context(|| format!("unknown trend {trend}"))?,
        score_lag_1day: row.get("score_lag_1day"),
        score_lag_7days: row.get("score_lag_7days"),
        rolling_avg_7days: row.get("rolling_avg_7days"),
        rolling_avg_30days: row.get("rolling_avg_30days"),
    })
}

/// Trailing engagement history anchored at the student's most recent snapshot,
/// oldest first. Empty when the student has no snapshots at all.
pub async fn fetch_engagement_history(
    pool: &PgPool,
    student_id: &str,
    days: i64,
) -> anyhow::Result<Vec<EngagementSnapshot>> {
    let latest: Option<NaiveDate> = sqlx::query(
        "SELECT MAX(score_date) AS latest FROM intervention_engine.engagement_scores \
         WHERE student_id = $1",
    )
    .bind(student_id)
    .fetch_one(pool)
    .await?
    .get("latest");

    let Some(latest) = latest else {
        return Ok(Vec::new());
    };

    let window_start = latest - Duration::days(days.max(1));
    let rows = sqlx::query(
        "SELECT student_id, score_date, login_score, session_score, interaction_score, \
         forum_score, assignment_score, engagement_score, engagement_level, engagement_trend, \
         score_lag_1day, score_lag_7days, rolling_avg_7days, rolling_avg_30days \
         FROM intervention_engine.engagement_scores \
         WHERE student_id = $1 AND score_date >= $2 AND score_date <= $3 \
         ORDER BY score_date",
    )
    .bind(student_id)
    .bind(window_start)
    .bind(latest)
    .fetch_all(pool)
    .await?;

    rows.iter().map(snapshot_from_row).collect()
}

/// One schedule per student per week: regenerating a week replaces the stored
/// row.
pub async fn save_schedule(pool: &PgPool, schedule: &StudySchedule) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO intervention_engine.study_schedules
        (student_id, week_start_date, week_end_date, session_length_minutes,
         sessions_per_day, avg_daily_minutes, load_reduction_factor, has_light_days,
         features_used, daily_schedules, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
        ON CONFLICT (student_id, week_start_date) DO UPDATE
        SET week_end_date = EXCLUDED.week_end_date,
            session_length_minutes = EXCLUDED.session_length_minutes,
            sessions_per_day = EXCLUDED.sessions_per_day,
            avg_daily_minutes = EXCLUDED.avg_daily_minutes,
            load_reduction_factor = EXCLUDED.load_reduction_factor,
            has_light_days = EXCLUDED.has_light_days,
            features_used = EXCLUDED.features_used,
            daily_schedules = EXCLUDED.daily_schedules,
            updated_at = NOW()
        "#,
    )
    .bind(&schedule.student_id)
    .bind(schedule.week_start_date)
    .bind(schedule.week_end_date)
    .bind(schedule.session_length_minutes as i32)
    .bind(schedule.sessions_per_day as i32)
    .bind(schedule.avg_daily_minutes as i32)
    .bind(schedule.load_reduction_factor)
    .bind(schedule.has_light_days)
    .bind(&schedule.features_used)
    .bind(serde_json::to_value(&schedule.daily_schedules)?)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn fetch_latest_schedule(
    pool: &PgPool,
    student_id: &str,
) -> anyhow::Result<Option<StudySchedule>> {
    let row = sqlx::query(
        "SELECT student_id, week_start_date, week_end_date, session_length_minutes, \
         sessions_per_day, avg_daily_minutes, load_reduction_factor, has_light_days, \
         features_used, daily_schedules \
         FROM intervention_engine.study_schedules \
         WHERE student_id = $1 ORDER BY week_start_date DESC LIMIT 1",
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let daily: Value = row.get("daily_schedules");
    Ok(Some(StudySchedule {
        student_id: row.get("student_id"),
        week_start_date: row.get("week_start_date"),
        week_end_date: row.get("week_end_date"),
        session_length_minutes: row.get::<i32, _>("session_length_minutes") as u32,
        sessions_per_day: row.get::<i32, _>("sessions_per_day") as u32,
        avg_daily_minutes: row.get::<i32, _>("avg_daily_minutes") as u32,
        load_reduction_factor: row.get("load_reduction_factor"),
        has_light_days: row.get("has_light_days"),
        features_used: row.get("features_used"),
        daily_schedules: serde_json::from_value(daily)
            .context("stored daily schedules are malformed")?,
    }))
}

/// Import daily engagement snapshots from a CSV export of the aggregation job.
pub async fn import_snapshots_csv(
    pool: &PgPool,
    csv_path: &std::path::Path,
) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        student_id: String,
        score_date: NaiveDate,
        login_score: f64,
        session_score: f64,
        interaction_score: f64,
        forum_score: f64,
        assignment_score: f64,
        engagement_score: f64,
        engagement_level: String,
        engagement_trend: String,
        score_lag_1day: Option<f64>,
        score_lag_7days: Option<f64>,
        rolling_avg_7days: Option<f64>,
        rolling_avg_30days: Option<f64>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        Trend::parse(&row.engagement_trend)
            .with_context(|| format!("unknown trend {}", row.engagement_trend))?;

        let result = sqlx::query(
            r#"
            INSERT INTO intervention_engine.engagement_scores
            (student_id, score_date, login_score, session_score, interaction_score,
             forum_score, assignment_score, engagement_score, engagement_level,
             engagement_trend, score_lag_1day, score_lag_7days, rolling_avg_7days,
             rolling_avg_30days)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (student_id, score_date) DO NOTHING
            "#,
        )
        .bind(&row.student_id)
        .bind(row.score_date)
        .bind(row.login_score)
        .bind(row.session_score)
        .bind(row.interaction_score)
        .bind(row.forum_score)
        .bind(row.assignment_score)
        .bind(row.engagement_score)
        .bind(&row.engagement_level)
        .bind(&row.engagement_trend)
        .bind(row.score_lag_1day)
        .bind(row.score_lag_7days)
        .bind(row.rolling_avg_7days)
        .bind(row.rolling_avg_30days)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let profiles = vec![
        (
            "stu-001",
            "Visual",
            0.82,
            serde_json::json!({"Visual": 0.82, "Auditory": 0.06, "Reading": 0.07, "Kinesthetic": 0.05}),
            "Medium",
            serde_json::json!(["Fractions"]),
        ),
        (
            "stu-002",
            "Mixed",
            0.41,
            serde_json::json!({"Visual": 0.41, "Auditory": 0.32, "Reading": 0.15, "Kinesthetic": 0.12}),
            "Easy",
            serde_json::json!([]),
        ),
        (
            "stu-003",
            "Reading",
            0.77,
            serde_json::json!({"Visual": 0.10, "Auditory": 0.05, "Reading": 0.77, "Kinesthetic": 0.08}),
            "Hard",
            serde_json::json!(["Limits", "Derivatives"]),
        ),
    ];

    for (student_id, style, confidence, probabilities, difficulty, topics) in profiles {
        sqlx::query(
            r#"
            INSERT INTO intervention_engine.student_profiles
            (student_id, learning_style, style_confidence, style_probabilities,
             preferred_difficulty, struggle_topics)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (student_id) DO UPDATE
            SET learning_style = EXCLUDED.learning_style,
                style_confidence = EXCLUDED.style_confidence,
                style_probabilities = EXCLUDED.style_probabilities,
                preferred_difficulty = EXCLUDED.preferred_difficulty,
                struggle_topics = EXCLUDED.struggle_topics
            "#,
        )
        .bind(student_id)
        .bind(style)
        .bind(confidence)
        .bind(probabilities)
        .bind(difficulty)
        .bind(topics)
        .execute(pool)
        .await?;
    }

    let resources = vec![
        (
            "video",
            "Visualizing Fractions",
            "Fractions",
            Some("Equivalent fractions"),
            "Easy",
            serde_json::json!(["Visual"]),
            serde_json::json!(["fractions", "number-sense"]),
            4.6,
            4.4,
            820i64,
            615i64,
            true,
        ),
        (
            "article",
            "Fractions Step by Step",
            "Fractions",
            None,
            "Medium",
            serde_json::json!(["Reading"]),
            serde_json::json!(["fractions"]),
            4.2,
            4.0,
            340,
            190,
            false,
        ),
        (
            "interactive",
            "Limit Explorer",
            "Limits",
            Some("One-sided limits"),
            "Hard",
            serde_json::json!(["Visual", "Kinesthetic"]),
            serde_json::json!(["limits", "calculus"]),
            4.8,
            4.7,
            510,
            430,
            true,
        ),
        (
            "practice",
            "Derivative Drills",
            "Derivatives",
            None,
            "Medium",
            serde_json::json!(["Kinesthetic"]),
            serde_json::json!(["derivatives", "calculus"]),
            4.1,
            3.9,
            275,
            140,
            false,
        ),
        (
            "quiz",
            "Algebra Checkpoint",
            "Algebra",
            Some("Linear equations"),
            "Medium",
            serde_json::json!(["Reading", "Visual"]),
            serde_json::json!(["algebra"]),
            3.9,
            3.8,
            1020,
            560,
            false,
        ),
    ];

    for (
        resource_type,
        title,
        topic,
        subtopic,
        difficulty,
        styles,
        tags,
        effectiveness,
        helpfulness,
        views,
        completions,
        verified,
    ) in resources
    {
        sqlx::query(
            r#"
            INSERT INTO intervention_engine.learning_resources
            (resource_type, title, topic, subject, subtopic, difficulty_level,
             learning_styles, tags, popularity_score, effectiveness_rating,
             avg_helpfulness_rating, total_views, total_completions, is_active,
             verified, created_at)
            VALUES ($1, $2, $3, 'Math', $4, $5, $6, $7, $8, $9, $10, $11, $12, TRUE, $13, NOW())
            ON CONFLICT (title) DO NOTHING
            "#,
        )
        .bind(resource_type)
        .bind(title)
        .bind(topic)
        .bind(subtopic)
        .bind(difficulty)
        .bind(styles)
        .bind(tags)
        .bind(views as f64 / 10.0)
        .bind(effectiveness)
        .bind(helpfulness)
        .bind(views)
        .bind(completions)
        .bind(verified)
        .execute(pool)
        .await?;
    }

    // Two weeks of declining engagement for the first seed student.
    let base_date = NaiveDate::from_ymd_opt(2026, 2, 2).context("invalid date")?;
    for offset in 0..14i64 {
        let score = 72.0 - offset as f64 * 2.0;
        let date = base_date + Duration::days(offset);
        sqlx::query(
            r#"
            INSERT INTO intervention_engine.engagement_scores
            (student_id, score_date, login_score, session_score, interaction_score,
             forum_score, assignment_score, engagement_score, engagement_level,
             engagement_trend, score_lag_1day, score_lag_7days, rolling_avg_7days,
             rolling_avg_30days)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (student_id, score_date) DO NOTHING
            "#,
        )
        .bind("stu-001")
        .bind(date)
        .bind(55.0)
        .bind(62.0)
        .bind(48.0)
        .bind(22.0)
        .bind(35.0)
        .bind(score)
        .bind("Medium")
        .bind("Declining")
        .bind(score + 2.0)
        .bind(score + 14.0)
        .bind(score + 6.0)
        .bind(score + 16.0)
        .execute(pool)
        .await?;
    }

    Ok(())
}
