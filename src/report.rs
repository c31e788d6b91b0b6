use std::collections::HashMap;
use std::fmt::Write;

use crate::models::{RecommendationView, Severity, StudentStruggle, StudySchedule};

#[derive(Debug, Clone)]
pub struct StruggleTypeSummary {
    pub struggle_type: String,
    pub count: usize,
    pub high_count: usize,
}

pub fn summarize_by_type(struggles: &[StudentStruggle]) -> Vec<StruggleTypeSummary> {
    let mut map: HashMap<&'static str, (usize, usize)> = HashMap::new();

    for struggle in struggles {
        let entry = map.entry(struggle.struggle_type.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if struggle.severity == Severity::High {
            entry.1 += 1;
        }
    }

    let mut summaries: Vec<StruggleTypeSummary> = map
        .into_iter()
        .map(|(struggle_type, (count, high_count))| StruggleTypeSummary {
            struggle_type: struggle_type.to_string(),
            count,
            high_count,
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count).then(a.struggle_type.cmp(&b.struggle_type)));
    summaries
}

pub fn build_report(
    student_id: &str,
    struggles: &[StudentStruggle],
    recommendations: &[RecommendationView],
    schedule: Option<&StudySchedule>,
) -> String {
    let summaries = summarize_by_type(struggles);

    let mut output = String::new();

    let _ = writeln!(output, "# Intervention Report");
    let _ = writeln!(output, "Generated for student {student_id}");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Unresolved Struggles");

    if struggles.is_empty() {
        let _ = writeln!(output, "No unresolved struggles on record.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} open ({} high severity)",
                summary.struggle_type, summary.count, summary.high_count
            );
        }
        let _ = writeln!(output);
        for struggle in struggles.iter().take(10) {
            let _ = writeln!(
                output,
                "- [{}] {} / {} (confidence {:.2}, detected {})",
                struggle.severity.as_str(),
                struggle.topic,
                struggle.concept,
                struggle.confidence,
                struggle.detected_at.date_naive()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Current Recommendations");

    if recommendations.is_empty() {
        let _ = writeln!(output, "No recommendations delivered this week.");
    } else {
        for view in recommendations.iter().take(10) {
            let _ = writeln!(
                output,
                "- #{} {} ({}) score {:.3} [{}]: {}",
                view.rank_position,
                view.title,
                view.resource_type.as_str(),
                view.relevance_score,
                view.priority.as_str(),
                view.reason
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Weekly Study Schedule");

    match schedule {
        None => {
            let _ = writeln!(output, "No schedule generated yet.");
        }
        Some(schedule) => {
            let _ = writeln!(
                output,
                "Week {} to {}: {} min sessions, {} per day, avg {} min/day (load factor {:.2})",
                schedule.week_start_date,
                schedule.week_end_date,
                schedule.session_length_minutes,
                schedule.sessions_per_day,
                schedule.avg_daily_minutes,
                schedule.load_reduction_factor
            );
            let _ = writeln!(output);
            for day in &schedule.daily_schedules {
                let light = if day.is_light_day { " (light day)" } else { "" };
                let _ = writeln!(
                    output,
                    "- {} {}: {} min{}",
                    day.day_name, day.date, day.total_minutes, light
                );
                for session in &day.sessions {
                    let _ = writeln!(
                        output,
                        "  - Session {}: {} min, {}, {}",
                        session.session_number,
                        session.duration_minutes,
                        session.task_type.as_str(),
                        session.suggested_time
                    );
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{detect_help_request, detect_quiz_failure, DetectorConfig};
    use crate::models::{HelpSignal, HelpSource, QuizOutcome};
    use chrono::Utc;

    fn sample_struggles() -> Vec<StudentStruggle> {
        let config = DetectorConfig::default();
        let quiz = detect_quiz_failure(
            &QuizOutcome {
                student_id: "stu-001".to_string(),
                quiz_id: "quiz-7".to_string(),
                topic: "Algebra".to_string(),
                score: 30.0,
                max_score: 100.0,
            },
            &config,
            Utc::now(),
        )
        .unwrap()
        .unwrap();

        let help = detect_help_request(
            &HelpSignal {
                student_id: "stu-001".to_string(),
                topic: "Algebra".to_string(),
                concept: "Factoring".to_string(),
                source: HelpSource::ForumPost,
            },
            Utc::now(),
        );

        vec![quiz, help]
    }

    #[test]
    fn summaries_count_by_type() {
        let struggles = sample_struggles();
        let summaries = summarize_by_type(&struggles);

        assert_eq!(summaries.len(), 2);
        let quiz = summaries
            .iter()
            .find(|s| s.struggle_type == "quiz_failure")
            .unwrap();
        assert_eq!(quiz.count, 1);
        assert_eq!(quiz.high_count, 1);
    }

    #[test]
    fn report_covers_all_sections() {
        let struggles = sample_struggles();
        let report = build_report("stu-001", &struggles, &[], None);

        assert!(report.contains("# Intervention Report"));
        assert!(report.contains("stu-001"));
        assert!(report.contains("quiz_failure"));
        assert!(report.contains("No recommendations delivered this week."));
        assert!(report.contains("No schedule generated yet."));
    }

    #[test]
    fn empty_report_is_well_formed() {
        let report = build_report("stu-404", &[], &[], None);
        assert!(report.contains("No unresolved struggles on record."));
    }
}
