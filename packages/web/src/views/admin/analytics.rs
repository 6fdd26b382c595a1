use api::analytics::{attempt_display_name, completed, rank_attempts, QuizStats, Ranking};
use api::models::{AttemptSummary, Quiz};
use dioxus::prelude::*;
use ui::components::{Badge, BadgeVariant, Card, EmptyState, LoadingScreen, Select, StatCard};
use ui::icons::{FaAward, FaTrophy};
use ui::time::format_optional;
use ui::{use_client, use_error_reporter, Icon};

use crate::views::filters::parse_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AnalyticsTab {
    #[default]
    Rankings,
    Attempts,
}

/// Podium badge for the top three, plain ordinal after that.
pub fn rank_variant(rank: usize) -> BadgeVariant {
    match rank {
        1 => BadgeVariant::Warning,
        2 | 3 => BadgeVariant::Info,
        _ => BadgeVariant::Outline,
    }
}

fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

fn username_of(attempt: &AttemptSummary) -> Option<String> {
    attempt.user.as_ref().map(|u| u.username.clone())
}

/// The stat cards shared by the analytics and results pages.
#[component]
pub fn QuizStatCards(stats: QuizStats, #[props(default)] detailed: bool) -> Element {
    rsx! {
        div {
            class: "stat-grid",
            StatCard { label: "Total Attempts", value: "{stats.total_attempts}" }
            StatCard { label: "Average Score", value: "{stats.average_score}%" }
            if detailed {
                StatCard { label: "Highest Score", value: "{stats.highest_score}%" }
                StatCard { label: "Lowest Score", value: "{stats.lowest_score}%" }
            }
            StatCard { label: "Pass Rate", value: "{stats.pass_rate}%" }
            StatCard { label: "Avg. Time", value: "{stats.average_minutes} min" }
        }
    }
}

#[component]
pub fn QuizAnalytics() -> Element {
    let client = use_client();
    let reporter = use_error_reporter();

    let mut selected = use_signal(|| Option::<i64>::None);
    let mut tab = use_signal(AnalyticsTab::default);

    let quiz_client = client.clone();
    let quizzes = use_resource(move || {
        let client = quiz_client.clone();
        async move {
            match client.quizzes().list(false).await {
                Ok(quizzes) => {
                    if let Some(first) = quizzes.first() {
                        selected.set(Some(first.id));
                    }
                    quizzes
                }
                Err(e) => {
                    reporter.report(&e, "Failed to load quizzes");
                    Vec::new()
                }
            }
        }
    });

    let attempts = use_resource(move || {
        let client = client.clone();
        let quiz_id = selected();
        async move {
            let id = quiz_id?;
            match client.attempts().summaries_by_quiz(id).await {
                Ok(all) => Some(completed(&all)),
                Err(e) => {
                    reporter.report(&e, "Failed to load quiz data");
                    None
                }
            }
        }
    });

    let Some(quizzes) = quizzes() else {
        return rsx! { LoadingScreen {} };
    };
    let options: Vec<(String, String)> = quizzes
        .iter()
        .map(|q| {
            let label = match &q.topic_title {
                Some(topic) => format!("{} - {}", q.title, topic),
                None => q.title.clone(),
            };
            (q.id.to_string(), label)
        })
        .collect();
    let selected_quiz: Option<Quiz> = selected().and_then(|id| quizzes.iter().find(|q| q.id == id).cloned());
    let selected_value = selected().map(|id| id.to_string()).unwrap_or_default();
    let attempts: Option<Vec<AttemptSummary>> = attempts().flatten();

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header",
                h1 { "Quiz Analytics" }
                p { class: "muted", "View quiz results, rankings, and performance metrics" }
            }

            Card {
                title: "Select Quiz",
                description: "Choose a quiz to view its analytics",
                if quizzes.is_empty() {
                    p { class: "muted", "No quizzes available" }
                } else {
                    Select {
                        value: selected_value,
                        options,
                        onchange: move |e: FormEvent| selected.set(parse_id(&e.value())),
                    }
                }
            }

            if let Some(quiz) = selected_quiz {
                Card {
                    title: quiz.title.clone(),
                    description: quiz.description.clone(),
                    div {
                        class: "fact-grid",
                        div { class: "fact", span { class: "muted", "Duration" } strong { "{quiz.duration_minutes} min" } }
                        div { class: "fact", span { class: "muted", "Questions" } strong { "{quiz.total_questions()}" } }
                        div { class: "fact", span { class: "muted", "Passing Score" } strong { "{quiz.passing_score}%" } }
                    }
                }

                {match attempts {
                    None => rsx! { LoadingScreen {} },
                    Some(done) => {
                        let stats = QuizStats::from_attempts(&done);
                        let rankings = rank_attempts(&done);
                        rsx! {
                            QuizStatCards { stats }

                            div {
                                class: "tabs",
                                button {
                                    class: if tab() == AnalyticsTab::Rankings { "tab tab--active" } else { "tab" },
                                    onclick: move |_| tab.set(AnalyticsTab::Rankings),
                                    "Rankings"
                                }
                                button {
                                    class: if tab() == AnalyticsTab::Attempts { "tab tab--active" } else { "tab" },
                                    onclick: move |_| tab.set(AnalyticsTab::Attempts),
                                    "All Attempts"
                                }
                            }

                            if tab() == AnalyticsTab::Rankings {
                                RankingTable { title: quiz.title.clone(), rankings }
                            } else {
                                AttemptTable { attempts: done }
                            }
                        }
                    }
                }}
            }
        }
    }
}

#[component]
fn RankingTable(title: String, rankings: Vec<Ranking>) -> Element {
    let description = format!("Leaderboard for {title}");
    rsx! {
        Card {
            title: "Top Performers",
            description,
            if rankings.is_empty() {
                EmptyState { title: "No attempts yet" }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Rank" }
                            th { "Student" }
                            th { "Score" }
                            th { "Correct/Total" }
                            th { "Status" }
                            th { "Completed At" }
                        }
                    }
                    tbody {
                        for ranking in rankings {
                            RankingRow { key: "{ranking.attempt.id}", ranking }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RankingRow(ranking: Ranking) -> Element {
    let attempt = &ranking.attempt;
    let name = attempt_display_name(attempt);
    let initials = initials_of(&name);
    let passed = attempt.passed.unwrap_or(false);
    let correct = attempt.correct_answers.unwrap_or(0);
    let total = attempt.total_questions.unwrap_or(0);
    let finished = format_optional(attempt.completed_at);

    rsx! {
        tr {
            td {
                Badge {
                    variant: rank_variant(ranking.rank),
                    {match ranking.rank {
                        1 => rsx! { Icon { icon: FaTrophy, width: 10, height: 10 } " " },
                        2 | 3 => rsx! { Icon { icon: FaAward, width: 10, height: 10 } " " },
                        _ => rsx! {},
                    }}
                    "{ranking.ordinal()}"
                }
            }
            td {
                div {
                    class: "person",
                    span { class: "avatar", "{initials}" }
                    div {
                        p { "{name}" }
                        if let Some(username) = username_of(attempt) {
                            p { class: "muted", "@{username}" }
                        }
                    }
                }
            }
            td { Badge { variant: BadgeVariant::for_result(passed), "{attempt.display_score()}%" } }
            td { "{correct}/{total}" }
            td {
                if passed {
                    Badge { variant: BadgeVariant::Success, "Passed" }
                } else {
                    Badge { variant: BadgeVariant::Danger, "Failed" }
                }
            }
            td { class: "muted", "{finished}" }
        }
    }
}

#[component]
fn AttemptTable(attempts: Vec<AttemptSummary>) -> Element {
    rsx! {
        Card {
            title: "All Attempts",
            description: "Every completed attempt for this quiz",
            if attempts.is_empty() {
                EmptyState { title: "No attempts yet" }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Student" }
                            th { "Score" }
                            th { "Started At" }
                            th { "Completed At" }
                            th { "Status" }
                        }
                    }
                    tbody {
                        for attempt in attempts {
                            tr {
                                key: "{attempt.id}",
                                td { "{attempt_display_name(&attempt)}" }
                                td {
                                    Badge {
                                        variant: BadgeVariant::for_result(attempt.passed.unwrap_or(false)),
                                        "{attempt.display_score()}%"
                                    }
                                }
                                td { class: "muted", "{format_optional(attempt.started_at)}" }
                                td { class: "muted", "{format_optional(attempt.completed_at)}" }
                                td {
                                    Badge {
                                        variant: BadgeVariant::for_attempt_status(attempt.status),
                                        "{attempt.status.label()}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_from_display_name() {
        assert_eq!(initials_of("Grace Brewster Hopper"), "GB");
        assert_eq!(initials_of("ada"), "A");
        assert_eq!(initials_of("  "), "");
    }

    #[test]
    fn test_podium_variants() {
        assert_eq!(rank_variant(1), BadgeVariant::Warning);
        assert_eq!(rank_variant(3), BadgeVariant::Info);
        assert_eq!(rank_variant(4), BadgeVariant::Outline);
    }
}
