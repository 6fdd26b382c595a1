//! Result summary and per-question review, shared by the learner's result
//! page and the staff view of a user's attempt.

use api::analytics::format_duration;
use api::models::{result_passed, result_score, Question, Quiz, QuizAttempt, ResultTally, UserAnswer};
use api::ApiError;
use dioxus::prelude::*;
use ui::components::{Badge, BadgeVariant, Card, StatCard};
use ui::icons::{FaCircleCheck, FaCircleExclamation, FaCircleXmark, FaTrophy};
use ui::{AppClient, Icon};

/// Everything a result page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultData {
    pub quiz: Quiz,
    pub attempt: QuizAttempt,
    pub answers: Vec<UserAnswer>,
}

impl ResultData {
    pub fn tally(&self) -> ResultTally {
        ResultTally::new(&self.quiz.questions, &self.answers)
    }

    pub fn score(&self) -> u32 {
        result_score(&self.attempt, &self.tally())
    }

    pub fn passed(&self) -> bool {
        result_passed(&self.attempt, &self.tally(), self.quiz.passing_score)
    }

    fn answer_for(&self, question_id: i64) -> Option<&UserAnswer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }
}

pub async fn load_result(client: &AppClient, attempt_id: i64) -> Result<ResultData, ApiError> {
    let attempt = client.attempts().get_with_answers(attempt_id).await?;
    let quiz = client.quizzes().get_with_questions(attempt.quiz_id).await?;
    let answers = match client.user_answers().by_attempt(attempt_id).await {
        Ok(answers) => answers,
        Err(ApiError::SessionExpired) => return Err(ApiError::SessionExpired),
        Err(e) => {
            tracing::warn!("Falling back to embedded answers for attempt {}: {}", attempt_id, e);
            attempt.user_answers.clone()
        }
    };
    Ok(ResultData {
        quiz,
        attempt,
        answers,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    Unanswered,
}

impl Verdict {
    pub fn of(answer: Option<&UserAnswer>) -> Self {
        match answer {
            Some(a) if a.correct => Verdict::Correct,
            Some(_) => Verdict::Incorrect,
            None => Verdict::Unanswered,
        }
    }

    fn badge(self) -> BadgeVariant {
        match self {
            Verdict::Correct => BadgeVariant::Success,
            Verdict::Incorrect => BadgeVariant::Danger,
            Verdict::Unanswered => BadgeVariant::Neutral,
        }
    }
}

/// Class of one answer option in the review: the correct option is always
/// highlighted, a wrong pick is marked red.
pub fn option_class(is_correct: bool, is_selected: bool) -> &'static str {
    match (is_correct, is_selected) {
        (true, _) => "review-option review-option--correct",
        (false, true) => "review-option review-option--wrong",
        (false, false) => "review-option",
    }
}

pub fn plural(n: impl Into<f64>, word: &str) -> String {
    let n = n.into();
    if n > 1.0 {
        format!("{n} {word}s")
    } else {
        format!("{n} {word}")
    }
}

/// Pass/fail banner, score and the four stat cards.
#[component]
pub fn ResultSummary(data: ResultData) -> Element {
    let tally = data.tally();
    let score = data.score();
    let passed = data.passed();
    let elapsed = format_duration(data.attempt.time_taken_secs());
    let points = format!("{} out of {} points", tally.points_earned, tally.total_points);
    let unanswered = plural(tally.unanswered as u32, "question");
    let banner = if passed { "result-banner--passed" } else { "result-banner--failed" };

    rsx! {
        Card {
            class: "result-banner {banner}",
            if passed {
                Icon { icon: FaTrophy, width: 40, height: 40 }
                h2 { "Congratulations!" }
                p { "You passed the quiz!" }
            } else {
                Icon { icon: FaCircleXmark, width: 40, height: 40 }
                h2 { "Not Passed" }
                p { "Keep practicing and try again!" }
            }
            div { class: "result-score", "{score}%" }
            p { class: "muted", "Your Score" }
            p { class: "muted", "{points}" }
        }

        div {
            class: "stat-grid",
            StatCard { label: "Correct", value: "{tally.correct}" }
            StatCard { label: "Incorrect", value: "{tally.incorrect}" }
            StatCard { label: "Time Taken", value: elapsed }
            StatCard { label: "To Pass", value: "{data.quiz.passing_score}%" }
        }

        if tally.unanswered > 0 {
            div {
                class: "notice notice--warning",
                Icon { icon: FaCircleExclamation, width: 16, height: 16 }
                " {unanswered} left unanswered"
            }
        }
    }
}

/// Every question with the correct option, the user's pick and the
/// explanation for misses.
#[component]
pub fn AnswerReview(data: ResultData, #[props(default)] staff_view: bool) -> Element {
    let mut questions: Vec<Question> = data.quiz.questions.clone();
    questions.sort_by_key(|q| q.display_order);

    rsx! {
        Card {
            title: "Detailed Review",
            description: "Review all questions with correct answers and explanations",
            div {
                class: "review-list",
                for (index, question) in questions.into_iter().enumerate() {
                    ReviewItem {
                        key: "{question.id}",
                        index,
                        answer: data.answer_for(question.id).cloned(),
                        question,
                        staff_view,
                    }
                }
            }
        }
    }
}

#[component]
fn ReviewItem(index: usize, question: Question, answer: Option<UserAnswer>, staff_view: bool) -> Element {
    let choice = if staff_view { "User's Answer" } else { "Your Choice" };
    let verdict = Verdict::of(answer.as_ref());
    let selected = answer.as_ref().and_then(|a| a.selected_answer_id);
    let worth = plural(question.points, "point");
    let earned = answer.as_ref().map(|a| plural(a.points_earned, "point"));
    let explanation = question
        .explanation
        .clone()
        .filter(|e| !e.is_empty() && verdict != Verdict::Correct);
    let options: Vec<(i64, String, bool)> = question
        .ordered_answers()
        .into_iter()
        .map(|a| (a.id, a.answer_text.clone(), a.correct))
        .collect();

    rsx! {
        div {
            class: "review-item",
            div {
                class: "review-head",
                Badge { variant: verdict.badge(), "Q{index + 1}" }
                div {
                    class: "review-question",
                    p { strong { "{question.question_text}" } }
                    p {
                        class: "muted",
                        "{worth}"
                        if let Some(earned) = earned {
                            " · Earned: {earned}"
                        }
                    }
                }
                {match verdict {
                    Verdict::Correct => rsx! { Icon { icon: FaCircleCheck, width: 18, height: 18 } },
                    Verdict::Incorrect => rsx! { Icon { icon: FaCircleXmark, width: 18, height: 18 } },
                    Verdict::Unanswered => rsx! { Icon { icon: FaCircleExclamation, width: 18, height: 18 } },
                }}
            }
            div {
                class: "review-options",
                for (id, text, correct) in options {
                    div {
                        key: "{id}",
                        class: option_class(correct, selected == Some(id)),
                        span { "{text}" }
                        if correct {
                            Badge { variant: BadgeVariant::Success, "Correct Answer" }
                        }
                        if selected == Some(id) {
                            Badge { variant: BadgeVariant::Info, "{choice}" }
                        }
                    }
                }
            }
            if let Some(explanation) = explanation {
                div { class: "notice notice--info", strong { "Explanation: " } "{explanation}" }
            }
            if verdict == Verdict::Unanswered {
                div { class: "notice notice--warning", "This question was not answered" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_answer(correct: bool) -> UserAnswer {
        let points = if correct { 2.0 } else { 0.0 };
        serde_json::from_value(serde_json::json!({
            "id": 1, "questionId": 2, "selectedAnswerId": 3,
            "correct": correct, "pointsEarned": points
        }))
        .unwrap()
    }

    #[test]
    fn test_verdicts() {
        assert_eq!(Verdict::of(Some(&user_answer(true))), Verdict::Correct);
        assert_eq!(Verdict::of(Some(&user_answer(false))), Verdict::Incorrect);
        assert_eq!(Verdict::of(None), Verdict::Unanswered);
    }

    #[test]
    fn test_option_highlighting() {
        assert_eq!(option_class(true, true), "review-option review-option--correct");
        assert_eq!(option_class(false, true), "review-option review-option--wrong");
        assert_eq!(option_class(false, false), "review-option");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1u32, "point"), "1 point");
        assert_eq!(plural(3u32, "question"), "3 questions");
        assert_eq!(plural(0.5, "point"), "0.5 point");
    }
}
