use api::models::{AnswerDraft, Question, QuestionDraft, Quiz};
use api::ApiError;
use dioxus::prelude::*;
use ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, ConfirmDialog, EmptyState, Input, Label,
    LoadingScreen, ModalOverlay, Textarea,
};
use ui::icons::{FaArrowLeft, FaCircleCheck, FaPen, FaPlus, FaTrash, FaXmark};
use ui::{use_client, use_error_reporter, use_toast, AppClient, Icon};

use crate::Route;

const MIN_OPTIONS: usize = 2;
const MAX_OPTIONS: usize = 6;

/// Form state of the question dialog. `answer_ids` runs parallel to
/// `draft.answers`; `None` marks an option added in this edit.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionEditor {
    pub question_id: Option<i64>,
    pub draft: QuestionDraft,
    pub answer_ids: Vec<Option<i64>>,
    pub removed: Vec<i64>,
}

impl QuestionEditor {
    pub fn create(quiz_id: i64, display_order: usize) -> Self {
        let mut draft = QuestionDraft::blank(quiz_id);
        draft.display_order = Some(display_order as i32);
        let answer_ids = vec![None; draft.answers.len()];
        Self {
            question_id: None,
            draft,
            answer_ids,
            removed: Vec::new(),
        }
    }

    pub fn edit(question: &Question) -> Self {
        let mut draft = QuestionDraft::from_question(question);
        let mut answer_ids: Vec<Option<i64>> =
            question.ordered_answers().iter().map(|a| Some(a.id)).collect();
        while draft.answers.len() < MIN_OPTIONS {
            draft.answers.push(AnswerDraft::default());
            answer_ids.push(None);
        }
        Self {
            question_id: Some(question.id),
            draft,
            answer_ids,
            removed: Vec::new(),
        }
    }

    pub fn add_option(&mut self) {
        if self.draft.answers.len() < MAX_OPTIONS {
            self.draft.answers.push(AnswerDraft::default());
            self.answer_ids.push(None);
        }
    }

    pub fn remove_option(&mut self, index: usize) {
        if self.draft.answers.len() <= MIN_OPTIONS || index >= self.draft.answers.len() {
            return;
        }
        self.draft.answers.remove(index);
        if let Some(id) = self.answer_ids.remove(index) {
            self.removed.push(id);
        }
    }

    /// Requests that bring the stored answers in line with the form.
    pub fn answer_changes(&self) -> Vec<AnswerChange> {
        let mut draft = self.draft.clone();
        draft.number_answers();
        let mut changes: Vec<AnswerChange> =
            self.removed.iter().map(|id| AnswerChange::Delete(*id)).collect();
        for (answer, id) in draft.answers.into_iter().zip(&self.answer_ids) {
            changes.push(match id {
                Some(id) => AnswerChange::Update(*id, answer),
                None => AnswerChange::Create(answer),
            });
        }
        changes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnswerChange {
    Create(AnswerDraft),
    Update(i64, AnswerDraft),
    Delete(i64),
}

async fn save_question(client: &AppClient, quiz_id: i64, editor: &QuestionEditor) -> Result<(), ApiError> {
    match editor.question_id {
        None => {
            let mut draft = editor.draft.clone();
            draft.number_answers();
            let question = client.questions().create(quiz_id, &draft).await?;
            tracing::info!("Created question {} on quiz {}", question.id, quiz_id);
        }
        Some(question_id) => {
            client
                .questions()
                .update(quiz_id, question_id, &editor.draft.to_update())
                .await?;
            for change in editor.answer_changes() {
                match change {
                    AnswerChange::Create(answer) => {
                        client.answers().create(question_id, &answer).await?;
                    }
                    AnswerChange::Update(id, answer) => {
                        client.answers().update(question_id, id, &answer).await?;
                    }
                    AnswerChange::Delete(id) => client.answers().delete(question_id, id).await?,
                }
            }
        }
    }
    Ok(())
}

#[component]
pub fn QuizQuestions(quiz_id: i64) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();
    let nav = use_navigator();

    let mut editor = use_signal(|| Option::<QuestionEditor>::None);
    let mut deleting = use_signal(|| Option::<i64>::None);
    let mut busy = use_signal(|| false);

    let load_client = client.clone();
    let mut data = use_resource(use_reactive!(|quiz_id| {
        let client = load_client.clone();
        async move {
            let quiz = client.quizzes().get(quiz_id).await;
            let questions = client.questions().list(quiz_id).await;
            match (quiz, questions) {
                (Ok(quiz), Ok(mut questions)) => {
                    questions.sort_by_key(|q| q.display_order);
                    Some((quiz, questions))
                }
                (Err(e), _) | (_, Err(e)) => {
                    reporter.report(&e, "Failed to load quiz data");
                    None
                }
            }
        }
    }));

    let on_delete = move |_| {
        let Some(id) = deleting() else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            busy.set(true);
            match client.questions().delete(quiz_id, id).await {
                Ok(()) => {
                    toast.success("Question deleted successfully");
                    data.restart();
                }
                Err(e) => reporter.report(&e, "Failed to delete question"),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let Some(loaded) = data() else {
        return rsx! { LoadingScreen {} };
    };
    let Some((quiz, questions)) = loaded else {
        return rsx! {
            div {
                class: "page page--narrow",
                EmptyState { title: "Quiz not found" }
                Button { onclick: move |_| { nav.push(Route::QuizManagement {}); }, "Back to Quizzes" }
            }
        };
    };
    let count = questions.len();
    let total_points: u32 = questions.iter().map(|q| q.points).sum();

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header page-header--actions",
                div {
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| { nav.push(Route::QuizManagement {}); },
                        Icon { icon: FaArrowLeft, width: 14, height: 14 }
                        " Back to Quizzes"
                    }
                    h1 { "{quiz.title}" }
                    p { class: "muted", "{count} questions · {total_points} points" }
                }
                Button {
                    onclick: move |_| editor.set(Some(QuestionEditor::create(quiz_id, count))),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    " Add Question"
                }
            }

            if count == 0 {
                EmptyState { title: "No questions yet", message: "Add the first question to this quiz" }
            } else {
                div {
                    class: "item-list",
                    for (index, question) in questions.into_iter().enumerate() {
                        QuestionRow {
                            key: "{question.id}",
                            index,
                            question,
                            on_edit: move |q: Question| editor.set(Some(QuestionEditor::edit(&q))),
                            on_delete: move |id| deleting.set(Some(id)),
                        }
                    }
                }
            }

            if let Some(open) = editor() {
                QuestionDialog {
                    quiz: quiz.clone(),
                    initial: open,
                    on_close: move |_| editor.set(None),
                    on_saved: move |_| {
                        editor.set(None);
                        data.restart();
                    },
                }
            }

            if deleting().is_some() {
                ConfirmDialog {
                    title: "Delete Question?",
                    message: "This action cannot be undone. The question and its answers will be permanently deleted.",
                    confirm_label: "Delete",
                    destructive: true,
                    busy: busy(),
                    on_confirm: on_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

#[component]
pub(super) fn QuestionRow(
    index: usize,
    question: Question,
    on_edit: EventHandler<Question>,
    on_delete: EventHandler<i64>,
) -> Element {
    let id = question.id;
    let target = question.clone();
    let answers: Vec<(i64, String, bool)> = question
        .ordered_answers()
        .into_iter()
        .map(|a| (a.id, a.answer_text.clone(), a.correct))
        .collect();

    rsx! {
        div {
            class: "card item",
            Badge { variant: BadgeVariant::Outline, "Q{index + 1}" }
            div {
                class: "item-main",
                p { strong { "{question.question_text}" } }
                ul {
                    class: "option-list",
                    for (answer_id, text, correct) in answers {
                        li {
                            key: "{answer_id}",
                            class: if correct { "option option--correct" } else { "option" },
                            if correct {
                                Icon { icon: FaCircleCheck, width: 12, height: 12 }
                            }
                            " {text}"
                        }
                    }
                }
                p { class: "muted", "{question.points} point(s)" }
            }
            div {
                class: "item-actions",
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Edit",
                    onclick: move |_| on_edit.call(target.clone()),
                    Icon { icon: FaPen, width: 14, height: 14 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Delete",
                    onclick: move |_| on_delete.call(id),
                    Icon { icon: FaTrash, width: 14, height: 14 }
                }
            }
        }
    }
}

#[component]
pub(super) fn QuestionDialog(
    quiz: Quiz,
    initial: QuestionEditor,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();
    let mut form = use_signal(|| initial.clone());
    let mut saving = use_signal(|| false);
    let quiz_id = quiz.id;

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let editor = form();
        if let Err(message) = editor.draft.validate() {
            toast.error(message);
            return;
        }
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            let result = save_question(&client, quiz_id, &editor).await;
            saving.set(false);
            match result {
                Ok(()) => {
                    toast.success(if editor.question_id.is_some() {
                        "Question updated successfully"
                    } else {
                        "Question created successfully"
                    });
                    on_saved.call(());
                }
                Err(e) => reporter.report(&e, "Failed to save question"),
            }
        });
    };

    let current = form();
    let editing = current.question_id.is_some();
    let option_count = current.draft.answers.len();
    let options: Vec<(usize, AnswerDraft)> = current.draft.answers.iter().cloned().enumerate().collect();

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            wide: true,
            form {
                class: "form modal-body",
                onsubmit,
                h2 { class: "modal-title", if editing { "Edit Question" } else { "Add Question" } }
                p { class: "muted", "{quiz.title}" }
                div {
                    class: "field",
                    Label { html_for: "question-text", "Question *" }
                    Textarea {
                        id: "question-text",
                        placeholder: "Enter your question...",
                        value: current.draft.question_text.clone(),
                        disabled: saving(),
                        oninput: move |e: FormEvent| form.write().draft.question_text = e.value(),
                    }
                }
                div {
                    class: "field",
                    Label { "Answer options * (select the correct one)" }
                    for (index, answer) in options {
                        div {
                            key: "{index}",
                            class: "option-editor",
                            input {
                                r#type: "radio",
                                name: "correct-answer",
                                title: "Correct answer",
                                checked: answer.correct,
                                disabled: saving(),
                                onchange: move |_| form.write().draft.set_correct(index),
                            }
                            Input {
                                placeholder: "Option {index + 1}",
                                value: answer.answer_text.clone(),
                                disabled: saving(),
                                oninput: move |e: FormEvent| {
                                    if let Some(a) = form.write().draft.answers.get_mut(index) {
                                        a.answer_text = e.value();
                                    }
                                },
                            }
                            Button {
                                variant: ButtonVariant::Ghost,
                                title: "Remove option",
                                disabled: saving() || option_count <= MIN_OPTIONS,
                                onclick: move |_| form.write().remove_option(index),
                                Icon { icon: FaXmark, width: 12, height: 12 }
                            }
                        }
                    }
                    if option_count < MAX_OPTIONS {
                        Button {
                            variant: ButtonVariant::Outline,
                            disabled: saving(),
                            onclick: move |_| form.write().add_option(),
                            Icon { icon: FaPlus, width: 12, height: 12 }
                            " Add option"
                        }
                    }
                }
                div {
                    class: "form-row",
                    div {
                        class: "field",
                        Label { html_for: "question-points", "Points *" }
                        Input {
                            id: "question-points",
                            input_type: "number",
                            value: current.draft.points.to_string(),
                            disabled: saving(),
                            oninput: move |e: FormEvent| form.write().draft.points = e.value().parse().unwrap_or(0),
                        }
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "question-explanation", "Explanation (optional)" }
                    Textarea {
                        id: "question-explanation",
                        placeholder: "Shown to learners who miss this question",
                        value: current.draft.explanation.clone().unwrap_or_default(),
                        disabled: saving(),
                        oninput: move |e: FormEvent| {
                            let value = e.value();
                            form.write().draft.explanation = (!value.trim().is_empty()).then_some(value);
                        },
                    }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: saving(),
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        submit: true,
                        disabled: saving(),
                        if saving() { "Saving..." } else if editing { "Update Question" } else { "Add Question" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        serde_json::from_str(
            r#"{"id":40,"questionText":"What does `?` do?","quizId":7,"points":2,"displayOrder":0,
                "active":true,"answers":[
                  {"id":2,"answerText":"Propagates errors","correct":true,"displayOrder":1},
                  {"id":1,"answerText":"Panics","correct":false,"displayOrder":0}
                ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_new_question_form() {
        let editor = QuestionEditor::create(7, 3);
        assert_eq!(editor.draft.display_order, Some(3));
        assert_eq!(editor.answer_ids, vec![None; 4]);
        assert!(editor.draft.validate().is_err());
    }

    #[test]
    fn test_edit_keeps_answer_ids_in_display_order() {
        let editor = QuestionEditor::edit(&question());
        assert_eq!(editor.answer_ids, vec![Some(1), Some(2)]);
        assert_eq!(editor.draft.answers[1].answer_text, "Propagates errors");
    }

    #[test]
    fn test_option_bounds() {
        let mut editor = QuestionEditor::edit(&question());
        editor.remove_option(0);
        assert_eq!(editor.draft.answers.len(), 2);
        assert!(editor.removed.is_empty());

        for _ in 0..10 {
            editor.add_option();
        }
        assert_eq!(editor.draft.answers.len(), MAX_OPTIONS);
        assert_eq!(editor.answer_ids.len(), MAX_OPTIONS);
    }

    #[test]
    fn test_answer_changes_cover_removed_updated_and_new() {
        let mut editor = QuestionEditor::edit(&question());
        editor.add_option();
        editor.draft.answers[2].answer_text = "Returns early".into();
        editor.remove_option(0);

        let changes = editor.answer_changes();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0], AnswerChange::Delete(1));
        match &changes[1] {
            AnswerChange::Update(id, answer) => {
                assert_eq!(*id, 2);
                assert_eq!(answer.display_order, Some(0));
            }
            other => panic!("unexpected change {other:?}"),
        }
        match &changes[2] {
            AnswerChange::Create(answer) => {
                assert_eq!(answer.answer_text, "Returns early");
                assert_eq!(answer.display_order, Some(1));
            }
            other => panic!("unexpected change {other:?}"),
        }
    }
}
