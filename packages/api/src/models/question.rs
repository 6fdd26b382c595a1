//! Questions and answer options of a quiz.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: i64,
    pub answer_text: String,
    /// Only sent to staff and on result pages.
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub question_id: Option<i64>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSummary {
    pub id: i64,
    pub answer_text: String,
    #[serde(default)]
    pub display_order: i32,
}

/// Answer option inside a question create body, or the body of an answer
/// create/update on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDraft {
    pub answer_text: String,
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub quiz_id: Option<i64>,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

fn default_points() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl Question {
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.correct)
    }

    pub fn answer(&self, answer_id: i64) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == answer_id)
    }

    /// Answers in display order.
    pub fn ordered_answers(&self) -> Vec<&Answer> {
        let mut answers: Vec<&Answer> = self.answers.iter().collect();
        answers.sort_by_key(|a| a.display_order);
        answers
    }
}

/// Body of `POST /api/quizzes/{quizId}/questions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub quiz_id: i64,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    pub answers: Vec<AnswerDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl QuestionDraft {
    /// An empty form with four blank options.
    pub fn blank(quiz_id: i64) -> Self {
        Self {
            question_text: String::new(),
            explanation: None,
            quiz_id,
            points: 1,
            display_order: None,
            answers: vec![AnswerDraft::default(); 4],
            active: Some(true),
        }
    }

    pub fn from_question(question: &Question) -> Self {
        Self {
            question_text: question.question_text.clone(),
            explanation: question.explanation.clone(),
            quiz_id: question.quiz_id.unwrap_or_default(),
            points: question.points,
            display_order: Some(question.display_order),
            answers: question
                .ordered_answers()
                .into_iter()
                .map(|a| AnswerDraft {
                    answer_text: a.answer_text.clone(),
                    correct: a.correct,
                    display_order: Some(a.display_order),
                })
                .collect(),
            active: Some(question.active),
        }
    }

    /// Mark exactly one option as correct.
    pub fn set_correct(&mut self, index: usize) {
        for (i, answer) in self.answers.iter_mut().enumerate() {
            answer.correct = i == index;
        }
    }

    /// Assign `displayOrder` from the option position.
    pub fn number_answers(&mut self) {
        for (i, answer) in self.answers.iter_mut().enumerate() {
            answer.display_order = Some(i as i32);
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.question_text.trim().is_empty() {
            return Err("Please enter a question".to_string());
        }
        if self.answers.len() < 2 || self.answers.iter().any(|a| a.answer_text.trim().is_empty())
        {
            return Err("Please fill in all answer options".to_string());
        }
        if self.answers.iter().filter(|a| a.correct).count() != 1 {
            return Err("Please mark one answer as correct".to_string());
        }
        if self.points == 0 {
            return Err("Points must be a positive number".to_string());
        }
        Ok(())
    }

    /// Question fields only, for `PUT`; answers are updated separately.
    pub fn to_update(&self) -> QuestionUpdate {
        QuestionUpdate {
            question_text: Some(self.question_text.clone()),
            explanation: self.explanation.clone().filter(|e| !e.trim().is_empty()),
            points: Some(self.points),
            display_order: None,
            active: None,
        }
    }
}

/// Body of `PUT /api/quizzes/{quizId}/questions/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> QuestionDraft {
        let mut draft = QuestionDraft::blank(3);
        draft.question_text = "Which keyword moves a closure's captures?".into();
        for (i, a) in draft.answers.iter_mut().enumerate() {
            a.answer_text = format!("option {i}");
        }
        draft.set_correct(2);
        draft
    }

    #[test]
    fn test_validation_messages() {
        let mut draft = filled();
        assert!(draft.validate().is_ok());

        draft.answers[1].answer_text = " ".into();
        assert_eq!(draft.validate().unwrap_err(), "Please fill in all answer options");

        let mut draft = filled();
        draft.answers[2].correct = false;
        assert_eq!(draft.validate().unwrap_err(), "Please mark one answer as correct");

        let mut draft = filled();
        draft.answers[0].correct = true;
        assert!(draft.validate().is_err());

        let mut draft = filled();
        draft.points = 0;
        assert!(draft.validate().is_err());

        let mut draft = filled();
        draft.answers.truncate(1);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_set_correct_is_exclusive() {
        let mut draft = filled();
        draft.set_correct(0);
        let flags: Vec<bool> = draft.answers.iter().map(|a| a.correct).collect();
        assert_eq!(flags, vec![true, false, false, false]);
    }

    #[test]
    fn test_create_body_shape() {
        let mut draft = filled();
        draft.number_answers();
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["quizId"], 3);
        assert_eq!(body["answers"][3]["displayOrder"], 3);
        assert_eq!(body["answers"][2]["correct"], true);
        assert!(body.get("explanation").is_none());
    }

    #[test]
    fn test_round_trip_from_question() {
        let question: Question = serde_json::from_str(
            r#"{"id":1,"questionText":"Q","quizId":3,"points":2,
                "answers":[{"id":11,"answerText":"b","correct":true,"displayOrder":1},
                           {"id":10,"answerText":"a","correct":false,"displayOrder":0}]}"#,
        )
        .unwrap();
        assert!(question.active);
        assert_eq!(question.correct_answer().map(|a| a.id), Some(11));
        let draft = QuestionDraft::from_question(&question);
        assert_eq!(draft.answers[0].answer_text, "a");
        assert_eq!(draft.to_update().points, Some(2));
    }
}
