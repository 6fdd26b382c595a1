use api::analytics::QuizStats;
use api::models::{Quiz, QuizStatus};
use api::ApiError;
use chrono::NaiveDateTime;
use dioxus::prelude::*;
use ui::components::{Badge, BadgeVariant, Button, Card, EmptyState, Input, LoadingScreen, Select};
use ui::icons::{FaCalendar, FaEye, FaMagnifyingGlass};
use ui::time::{format_date, now};
use ui::{use_client, use_error_reporter, AppClient, Icon};

use crate::views::filters::matches_query;
use crate::Route;

/// A quiz with the statistics of its completed attempts.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOverview {
    pub quiz: Quiz,
    pub stats: QuizStats,
}

async fn load_overview(client: &AppClient) -> Result<Vec<QuizOverview>, ApiError> {
    let quizzes = client.quizzes().list(false).await?;
    let mut rows = Vec::with_capacity(quizzes.len());
    for quiz in quizzes {
        let attempts = client.attempts().summaries_by_quiz(quiz.id).await?;
        rows.push(QuizOverview {
            stats: QuizStats::from_attempts(&attempts),
            quiz,
        });
    }
    Ok(rows)
}

pub fn filter_overview(
    rows: &[QuizOverview],
    query: &str,
    status: Option<QuizStatus>,
    now: NaiveDateTime,
) -> Vec<QuizOverview> {
    rows.iter()
        .filter(|r| {
            let topic = r.quiz.topic_title.as_deref().unwrap_or_default();
            matches_query(query, &[&r.quiz.title, &r.quiz.description, topic])
                && status.is_none_or(|s| r.quiz.status(now) == s)
        })
        .cloned()
        .collect()
}

pub fn pass_rate_variant(rate: i64) -> BadgeVariant {
    if rate >= 75 {
        BadgeVariant::Success
    } else if rate >= 50 {
        BadgeVariant::Warning
    } else {
        BadgeVariant::Danger
    }
}

fn status_options() -> Vec<(String, String)> {
    let mut options = vec![("all".to_string(), "All Status".to_string())];
    options.extend(
        [QuizStatus::Active, QuizStatus::Upcoming, QuizStatus::Expired, QuizStatus::Inactive]
            .into_iter()
            .map(|s| (s.key().to_string(), s.label().to_string())),
    );
    options
}

#[component]
pub fn QuizResultsOverview() -> Element {
    let client = use_client();
    let reporter = use_error_reporter();

    let mut query = use_signal(String::new);
    let mut status = use_signal(|| Option::<QuizStatus>::None);

    let overview = use_resource(move || {
        let client = client.clone();
        async move {
            load_overview(&client).await.unwrap_or_else(|e| {
                reporter.report(&e, "Failed to load quizzes");
                Vec::new()
            })
        }
    });

    let Some(rows) = overview() else {
        return rsx! { LoadingScreen {} };
    };
    let reference = now();
    let visible = filter_overview(&rows, &query(), status(), reference);
    let status_value = status().map(|s| s.key()).unwrap_or("all");
    let heading = format!("All Quizzes ({})", visible.len());

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header",
                h1 { "Quiz Results Overview" }
                p { class: "muted", "View and analyze quiz performance across all quizzes" }
            }

            div {
                class: "filter-bar",
                div {
                    class: "search-box",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    Input {
                        placeholder: "Search quizzes...",
                        value: query(),
                        oninput: move |e: FormEvent| query.set(e.value()),
                    }
                }
                Select {
                    value: "{status_value}",
                    options: status_options(),
                    onchange: move |e: FormEvent| status.set(QuizStatus::from_key(&e.value())),
                }
            }

            Card {
                title: heading,
                if visible.is_empty() {
                    EmptyState { title: "No quizzes found" }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Quiz" }
                                th { "Topic" }
                                th { "Status" }
                                th { "Schedule" }
                                th { class: "text-center", "Participants" }
                                th { class: "text-center", "Avg Score" }
                                th { class: "text-center", "Pass Rate" }
                                th { class: "text-right", "Action" }
                            }
                        }
                        tbody {
                            for row in visible {
                                OverviewRow { key: "{row.quiz.id}", row, reference }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn OverviewRow(row: QuizOverview, reference: NaiveDateTime) -> Element {
    let nav = use_navigator();
    let quiz = &row.quiz;
    let id = quiz.id;
    let status = quiz.status(reference);
    let stats = row.stats;
    let topic = quiz.topic_title.clone().unwrap_or_else(|| "N/A".to_string());

    rsx! {
        tr {
            td {
                p { strong { "{quiz.title}" } }
                p { class: "muted clamp", "{quiz.description}" }
            }
            td { Badge { variant: BadgeVariant::Outline, "{topic}" } }
            td { Badge { variant: BadgeVariant::for_quiz_status(status), "{status.label()}" } }
            td {
                class: "muted",
                if let Some(start) = quiz.start_time {
                    p { Icon { icon: FaCalendar, width: 12, height: 12 } " {format_date(start)}" }
                }
                if let Some(end) = quiz.end_time {
                    p { "to {format_date(end)}" }
                }
                if quiz.start_time.is_none() && quiz.end_time.is_none() {
                    span { "No schedule" }
                }
            }
            td { class: "text-center", "{stats.total_attempts}" }
            td { class: "text-center", "{stats.average_score}%" }
            td {
                class: "text-center",
                Badge { variant: pass_rate_variant(stats.pass_rate), "{stats.pass_rate}%" }
            }
            td {
                class: "text-right",
                Button {
                    disabled: stats.total_attempts == 0,
                    onclick: move |_| { nav.push(Route::QuizResultsDetail { id }); },
                    Icon { icon: FaEye, width: 14, height: 14 }
                    " View Results"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn row(id: i64, title: &str, active: bool, start_offset_days: i64) -> QuizOverview {
        let start = reference() + Duration::days(start_offset_days);
        let quiz: Quiz = serde_json::from_value(serde_json::json!({
            "id": id, "title": title, "description": "", "topicTitle": "Networking",
            "durationMinutes": 30, "passingScore": 60, "active": active,
            "startTime": start.format("%Y-%m-%dT%H:%M:%S").to_string()
        }))
        .unwrap();
        QuizOverview {
            quiz,
            stats: QuizStats::default(),
        }
    }

    #[test]
    fn test_filter_by_schedule_status() {
        let rows = vec![
            row(1, "TCP handshakes", true, -1),
            row(2, "QUIC streams", true, 3),
            row(3, "UDP", false, -1),
        ];
        assert_eq!(filter_overview(&rows, "", None, reference()).len(), 3);
        let upcoming = filter_overview(&rows, "", Some(QuizStatus::Upcoming), reference());
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].quiz.id, 2);
        assert_eq!(filter_overview(&rows, "networking", Some(QuizStatus::Inactive), reference()).len(), 1);
    }

    #[test]
    fn test_pass_rate_bands() {
        assert_eq!(pass_rate_variant(80), BadgeVariant::Success);
        assert_eq!(pass_rate_variant(50), BadgeVariant::Warning);
        assert_eq!(pass_rate_variant(49), BadgeVariant::Danger);
    }
}
