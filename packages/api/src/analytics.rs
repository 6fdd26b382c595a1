//! Result statistics for staff pages.
//!
//! Everything here works on completed [`AttemptSummary`] rows as returned by
//! `GET /api/quiz-attempts/quiz/{id}/summary`; callers pass the raw list and
//! the functions keep only completed attempts.

use std::cmp::Ordering;

use crate::models::{AttemptSummary, User};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuizStats {
    pub total_attempts: usize,
    pub passed: usize,
    pub average_score: i64,
    pub highest_score: i64,
    pub lowest_score: i64,
    /// Rounded percentage of attempts that passed.
    pub pass_rate: i64,
    /// Mean duration in whole minutes, over attempts with both timestamps.
    pub average_minutes: i64,
}

pub fn completed(attempts: &[AttemptSummary]) -> Vec<AttemptSummary> {
    attempts.iter().filter(|a| a.is_completed()).cloned().collect()
}

impl QuizStats {
    pub fn from_attempts(attempts: &[AttemptSummary]) -> Self {
        let done: Vec<&AttemptSummary> = attempts.iter().filter(|a| a.is_completed()).collect();
        if done.is_empty() {
            return Self::default();
        }
        let scores: Vec<f64> = done.iter().map(|a| a.score.unwrap_or(0.0)).collect();
        let total = done.len();
        let passed = done.iter().filter(|a| a.passed.unwrap_or(false)).count();
        let highest = scores.iter().copied().fold(f64::MIN, f64::max);
        let lowest = scores.iter().copied().fold(f64::MAX, f64::min);

        let durations: Vec<i64> = done.iter().filter_map(|a| a.time_taken_secs()).collect();
        let average_minutes = if durations.is_empty() {
            0
        } else {
            (durations.iter().sum::<i64>() as f64 / durations.len() as f64 / 60.0).round() as i64
        };

        Self {
            total_attempts: total,
            passed,
            average_score: (scores.iter().sum::<f64>() / total as f64).round() as i64,
            highest_score: highest.round() as i64,
            lowest_score: lowest.round() as i64,
            pass_rate: (passed as f64 / total as f64 * 100.0).round() as i64,
            average_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub rank: usize,
    pub attempt: AttemptSummary,
}

impl Ranking {
    /// "1st", "2nd", "3rd", "4th", ...
    pub fn ordinal(&self) -> String {
        ordinal(self.rank)
    }
}

pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Completed attempts ranked by score, faster attempts first on ties.
pub fn rank_attempts(attempts: &[AttemptSummary]) -> Vec<Ranking> {
    let mut done = completed(attempts);
    done.sort_by(|a, b| {
        score_of(b)
            .partial_cmp(&score_of(a))
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                // Untimed attempts go after timed ones with the same score.
                let a = duration_of(a).unwrap_or(i64::MAX);
                let b = duration_of(b).unwrap_or(i64::MAX);
                a.cmp(&b)
            })
    });
    done.into_iter()
        .enumerate()
        .map(|(i, attempt)| Ranking {
            rank: i + 1,
            attempt,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Score,
    Time,
    Date,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Score, SortKey::Time, SortKey::Date];

    pub fn key(self) -> &'static str {
        match self {
            SortKey::Score => "score",
            SortKey::Time => "time",
            SortKey::Date => "date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Score => "Score",
            SortKey::Time => "Time Taken",
            SortKey::Date => "Submission Date",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }
}

pub fn sort_attempts(attempts: &mut [AttemptSummary], key: SortKey, ascending: bool) {
    attempts.sort_by(|a, b| {
        let ord = match key {
            SortKey::Score => score_of(a).partial_cmp(&score_of(b)).unwrap_or(Ordering::Equal),
            // Attempts without both timestamps count as zero.
            SortKey::Time => duration_of(a).unwrap_or(0).cmp(&duration_of(b).unwrap_or(0)),
            SortKey::Date => a
                .completed_at
                .or(a.started_at)
                .cmp(&b.completed_at.or(b.started_at)),
        };
        if ascending { ord } else { ord.reverse() }
    });
}

fn score_of(a: &AttemptSummary) -> f64 {
    a.score.unwrap_or(0.0)
}

fn duration_of(a: &AttemptSummary) -> Option<i64> {
    a.time_taken_secs()
}

/// `"Xm Ys"`, or `"N/A"` without a duration.
pub fn format_duration(secs: Option<i64>) -> String {
    match secs {
        Some(s) => format!("{}m {}s", s / 60, s % 60),
        None => "N/A".to_string(),
    }
}

/// Name to show for an attempt: the embedded user when present, else the
/// flattened name, else the username.
pub fn attempt_display_name(a: &AttemptSummary) -> String {
    match &a.user {
        Some(user) => user.full_name(),
        None if !a.user_full_name.trim().is_empty() => a.user_full_name.trim().to_string(),
        None => format!("User #{}", a.user_id),
    }
}

fn attempt_email(a: &AttemptSummary) -> &str {
    a.user.as_ref().map(|u: &User| u.email.as_str()).unwrap_or("")
}

/// File name for a quiz export: whitespace runs become underscores.
pub fn csv_filename(quiz_title: &str) -> String {
    let stem: Vec<&str> = quiz_title.split_whitespace().collect();
    format!("{}_results.csv", stem.join("_"))
}

/// CSV of the given attempts in their current order. Every cell is quoted;
/// embedded quotes are doubled.
pub fn results_csv(attempts: &[AttemptSummary], question_count: u32) -> String {
    let mut lines = vec![
        "Name,Email,Score (%),Points,Pass/Fail,Time Taken,Submitted At".to_string(),
    ];
    for a in attempts {
        let cells = [
            attempt_display_name(a),
            attempt_email(a).to_string(),
            a.display_score().to_string(),
            format!(
                "{}/{}",
                a.correct_answers.unwrap_or(0),
                a.total_questions.unwrap_or(question_count)
            ),
            if a.passed.unwrap_or(false) { "Pass" } else { "Fail" }.to_string(),
            format_duration(a.time_taken_secs()),
            a.completed_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        ];
        let row: Vec<String> = cells
            .iter()
            .map(|c| format!("\"{}\"", c.replace('"', "\"\"")))
            .collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}
