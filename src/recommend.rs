use chrono::{DateTime, Utc};

use crate::models::{
    Difficulty, LearningResource, LearningStyle, Priority, RankedResource, RecentRecommendation,
    ResourceRecommendation, ScoreBreakdown, StudentProfile, StudentStruggle,
};

/// Weights and thresholds for the six-factor ranking. Weights sum to 1.0 so
/// the total relevance score stays in [0, 1].
#[derive(Debug, Clone)]
pub struct RankerConfig {
    pub style_match_weight: f64,
    pub topic_relevance_weight: f64,
    pub difficulty_alignment_weight: f64,
    pub effectiveness_weight: f64,
    pub recency_weight: f64,
    pub diversity_weight: f64,
    pub high_priority_threshold: f64,
    pub medium_priority_threshold: f64,
    pub candidate_limit: usize,
    pub recent_window_days: i64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            style_match_weight: 0.30,
            topic_relevance_weight: 0.25,
            difficulty_alignment_weight: 0.20,
            effectiveness_weight: 0.15,
            recency_weight: 0.05,
            diversity_weight: 0.05,
            high_priority_threshold: 0.80,
            medium_priority_threshold: 0.65,
            candidate_limit: 50,
            recent_window_days: 7,
        }
    }
}

/// Rank catalog resources for a student. A supplied struggle overrides the
/// topic with the struggle's own topic; resources recommended within the
/// recent window are excluded outright. Returns at most `max_count` results
/// (clamped to 1-10), best first.
pub fn generate_recommendations(
    profile: &StudentProfile,
    topic: Option<&str>,
    struggle: Option<&StudentStruggle>,
    catalog: &[LearningResource],
    recent: &[RecentRecommendation],
    max_count: usize,
    now: DateTime<Utc>,
    config: &RankerConfig,
) -> Vec<RankedResource> {
    let struggle_topic = struggle.map(|s| s.topic.as_str());
    let topic = struggle_topic.or(topic);

    let candidates = candidate_resources(catalog, topic, config.candidate_limit);

    let recent_ids: Vec<i64> = recent.iter().map(|r| r.resource_id).collect();
    let recent_types: Vec<&str> = recent
        .iter()
        .filter_map(|r| r.resource_type.map(|t| t.as_str()))
        .collect();

    let mut scored = Vec::new();
    for resource in candidates {
        if recent_ids.contains(&resource.resource_id) {
            continue;
        }

        let breakdown = ScoreBreakdown {
            style_match: score_style_match(resource, profile),
            topic_relevance: score_topic_relevance(resource, topic, profile),
            difficulty_alignment: score_difficulty_alignment(resource, profile),
            effectiveness: score_effectiveness(resource),
            recency: score_recency(resource, now),
            diversity: score_diversity(resource, &recent_types),
        };
        let total_score = weighted_total(&breakdown, config);

        scored.push(RankedResource {
            resource: resource.clone(),
            total_score,
            breakdown,
        });
    }

    // Stable sort keeps the effectiveness/popularity pre-order for ties.
    scored.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    scored.truncate(max_count.clamp(1, 10));
    scored
}

/// Active resources matching the topic filter, pre-sorted by effectiveness
/// then popularity and capped.
pub fn candidate_resources<'a>(
    catalog: &'a [LearningResource],
    topic: Option<&str>,
    limit: usize,
) -> Vec<&'a LearningResource> {
    let topic_lower = topic.map(|t| t.to_lowercase());

    let mut candidates: Vec<&LearningResource> = catalog
        .iter()
        .filter(|r| r.is_active)
        .filter(|r| match &topic_lower {
            Some(needle) => r.topic.to_lowercase().contains(needle),
            None => true,
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.effectiveness_rating
            .partial_cmp(&a.effectiveness_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                b.popularity_score
                    .partial_cmp(&a.popularity_score)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });

    candidates.truncate(limit);
    candidates
}

pub fn weighted_total(breakdown: &ScoreBreakdown, config: &RankerConfig) -> f64 {
    breakdown.style_match * config.style_match_weight
        + breakdown.topic_relevance * config.topic_relevance_weight
        + breakdown.difficulty_alignment * config.difficulty_alignment_weight
        + breakdown.effectiveness * config.effectiveness_weight
        + breakdown.recency * config.recency_weight
        + breakdown.diversity * config.diversity_weight
}

/// Factor 1: learning style match. Exact matches score with the classifier's
/// confidence; Mixed students fall back to their strongest supported style.
pub fn score_style_match(resource: &LearningResource, profile: &StudentProfile) -> f64 {
    if resource.learning_styles.is_empty() {
        return 0.5;
    }

    if resource.learning_styles.contains(&profile.learning_style) {
        return 0.8 + 0.2 * profile.style_confidence;
    }

    if profile.learning_style == LearningStyle::Mixed {
        let mut match_score: f64 = 0.0;
        for style in &resource.learning_styles {
            if let Some(prob) = profile.style_probabilities.get(style.as_str()) {
                match_score = match_score.max(*prob);
            }
        }
        return match_score;
    }

    0.3
}

/// Factor 2: topic relevance against the requested topic, falling back to the
/// profile's struggle-topic history when no topic is given.
pub fn score_topic_relevance(
    resource: &LearningResource,
    topic: Option<&str>,
    profile: &StudentProfile,
) -> f64 {
    let Some(topic) = topic else {
        if profile.struggle_topics.contains(&resource.topic) {
            return 0.9;
        }
        return 0.5;
    };

    let topic_lower = topic.to_lowercase();
    let resource_topic_lower = resource.topic.to_lowercase();

    if topic_lower == resource_topic_lower {
        return 1.0;
    }
    if resource_topic_lower.contains(&topic_lower) || topic_lower.contains(&resource_topic_lower) {
        return 0.8;
    }
    if let Some(subtopic) = &resource.subtopic {
        if subtopic.to_lowercase().contains(&topic_lower) {
            return 0.7;
        }
    }
    for tag in &resource.tags {
        if tag.to_lowercase().contains(&topic_lower) {
            return 0.6;
        }
    }

    0.2
}

/// Factor 3: difficulty alignment via a fixed cross-pair table.
pub fn score_difficulty_alignment(resource: &LearningResource, profile: &StudentProfile) -> f64 {
    match (profile.preferred_difficulty, resource.difficulty) {
        (preferred, actual) if preferred == actual => 1.0,
        (Difficulty::Medium, Difficulty::Easy) | (Difficulty::Medium, Difficulty::Hard) => 0.7,
        (Difficulty::Easy, Difficulty::Medium) => 0.6,
        (Difficulty::Easy, Difficulty::Hard) => 0.3,
        (Difficulty::Hard, Difficulty::Medium) => 0.8,
        (Difficulty::Hard, Difficulty::Easy) => 0.4,
        _ => 0.5,
    }
}

/// Factor 4: historical effectiveness. Ratings are on a 0-5 scale; the
/// completion rate defaults to 0.5 when a resource has no views yet.
pub fn score_effectiveness(resource: &LearningResource) -> f64 {
    let effectiveness = resource.effectiveness_rating / 5.0;
    let helpfulness = resource.avg_helpfulness_rating / 5.0;

    let completion_rate = if resource.total_views > 0 {
        resource.total_completions as f64 / resource.total_views as f64
    } else {
        0.5
    };

    let mut score = effectiveness * 0.4 + helpfulness * 0.3 + completion_rate * 0.3;
    if resource.verified {
        score = (score * 1.1).min(1.0);
    }
    score
}

/// Factor 5: recency tiers by resource age.
pub fn score_recency(resource: &LearningResource, now: DateTime<Utc>) -> f64 {
    let Some(created_at) = resource.created_at else {
        return 0.5;
    };

    let age_days = (now - created_at).num_days();
    match age_days {
        _ if age_days <= 30 => 1.0,
        _ if age_days <= 90 => 0.8,
        _ if age_days <= 180 => 0.6,
        _ => 0.4,
    }
}

/// Factor 6: diversity bonus for resource types missing from the recent
/// recommendation window.
pub fn score_diversity(resource: &LearningResource, recent_types: &[&str]) -> f64 {
    let type_count = recent_types
        .iter()
        .filter(|t| **t == resource.resource_type.as_str())
        .count();

    match type_count {
        0 => 1.0,
        1 => 0.7,
        2 => 0.4,
        _ => 0.2,
    }
}

/// Priority tier for a total relevance score.
pub fn priority_for_score(score: f64, config: &RankerConfig) -> Priority {
    if score >= config.high_priority_threshold {
        Priority::High
    } else if score >= config.medium_priority_threshold {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Deterministic, ordered reason text: style and topic clauses when those
/// factors score high, a struggle note when a struggle was supplied, an
/// effectiveness note, and always a trailing difficulty clause.
pub fn recommendation_reason(
    resource: &LearningResource,
    breakdown: &ScoreBreakdown,
    struggle_id: Option<i64>,
) -> String {
    let mut reasons = Vec::new();

    if breakdown.style_match >= 0.8 {
        if let Some(style) = resource.learning_styles.first() {
            reasons.push(format!("Matches your {} learning style", style.as_str()));
        }
    }
    if breakdown.topic_relevance >= 0.8 {
        reasons.push(format!("Highly relevant to {}", resource.topic));
    }
    if struggle_id.is_some() {
        reasons.push("Recommended to help with your recent struggle".to_string());
    }
    if breakdown.effectiveness >= 0.8 {
        reasons.push(format!(
            "Highly rated ({:.1}/5.0)",
            resource.effectiveness_rating
        ));
    }
    reasons.push(format!("{} difficulty level", resource.difficulty.as_str()));

    reasons.join(" • ")
}

/// Turn ranked resources into write-once recommendation records with 1-based
/// ranks, priority tiers and reason text.
pub fn build_recommendations(
    student_id: &str,
    ranked: &[RankedResource],
    struggle_id: Option<i64>,
    recommended_at: DateTime<Utc>,
    config: &RankerConfig,
) -> Vec<ResourceRecommendation> {
    ranked
        .iter()
        .enumerate()
        .map(|(index, item)| ResourceRecommendation {
            student_id: student_id.to_string(),
            resource_id: item.resource.resource_id,
            struggle_id,
            reason: recommendation_reason(&item.resource, &item.breakdown, struggle_id),
            relevance_score: (item.total_score * 1000.0).round() / 1000.0,
            score_breakdown: item.breakdown,
            rank_position: index as i32 + 1,
            priority: priority_for_score(item.total_score, config),
            recommended_at,
        })
        .collect()
}
