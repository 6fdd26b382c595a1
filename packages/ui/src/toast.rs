use std::time::Duration;

use dioxus::prelude::*;

use crate::time::sleep;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    /// Seconds left on screen.
    remaining: u32,
}

/// Toasts currently on screen, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn push(&mut self, level: ToastLevel, message: &str, secs: u32) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            level,
            message: message.to_string(),
            remaining: secs.max(1),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }

    /// Age every toast by one second and drop expired ones.
    pub fn tick(&mut self) {
        for toast in &mut self.entries {
            toast.remaining = toast.remaining.saturating_sub(1);
        }
        self.entries.retain(|t| t.remaining > 0);
    }

    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handle for raising toasts from any view.
#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: Signal<Toasts>,
    duration_secs: u32,
}

impl Toaster {
    pub fn show(mut self, level: ToastLevel, message: impl AsRef<str>) {
        let message = message.as_ref();
        if level == ToastLevel::Error {
            tracing::debug!("error toast: {}", message);
        }
        self.toasts.write().push(level, message, self.duration_secs);
    }

    pub fn success(self, message: impl AsRef<str>) {
        self.show(ToastLevel::Success, message);
    }

    pub fn info(self, message: impl AsRef<str>) {
        self.show(ToastLevel::Info, message);
    }

    pub fn warning(self, message: impl AsRef<str>) {
        self.show(ToastLevel::Warning, message);
    }

    pub fn error(self, message: impl AsRef<str>) {
        self.show(ToastLevel::Error, message);
    }
}

pub fn use_toast() -> Toaster {
    use_context::<Toaster>()
}

/// Provides [`Toaster`] to its children and renders the toast stack.
#[component]
pub fn ToastProvider(#[props(default = 4)] duration_secs: u32, children: Element) -> Element {
    let mut toasts = use_signal(Toasts::default);
    use_context_provider(|| Toaster {
        toasts,
        duration_secs,
    });

    use_future(move || async move {
        loop {
            sleep(Duration::from_secs(1)).await;
            if !toasts.peek().is_empty() {
                toasts.write().tick();
            }
        }
    });

    let entries = toasts().entries().to_vec();

    rsx! {
        {children}

        div {
            class: "toast-stack",
            for (id, level, message) in entries.into_iter().map(|t| (t.id, t.level, t.message)) {
                div {
                    key: "{id}",
                    class: match level {
                        ToastLevel::Error => "toast toast--error",
                        ToastLevel::Warning => "toast toast--warning",
                        ToastLevel::Success => "toast toast--success",
                        ToastLevel::Info => "toast toast--info",
                    },
                    role: "status",
                    span { class: "toast-message", "{message}" }
                    button {
                        class: "toast-close",
                        title: "Dismiss",
                        onclick: move |_| toasts.write().dismiss(id),
                        "×"
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
    fn test_toasts_expire_after_their_duration() {
        let mut toasts = Toasts::default();
        toasts.push(ToastLevel::Info, "short", 1);
        toasts.push(ToastLevel::Error, "long", 3);
        toasts.tick();
        assert_eq!(toasts.entries().len(), 1);
        assert_eq!(toasts.entries()[0].message, "long");
        toasts.tick();
        toasts.tick();
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_dismiss_and_unique_ids() {
        let mut toasts = Toasts::default();
        let a = toasts.push(ToastLevel::Success, "a", 4);
        let b = toasts.push(ToastLevel::Success, "b", 4);
        assert_ne!(a, b);
        toasts.dismiss(a);
        assert_eq!(toasts.entries().iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_zero_duration_still_shows_once() {
        let mut toasts = Toasts::default();
        toasts.push(ToastLevel::Warning, "w", 0);
        assert_eq!(toasts.entries().len(), 1);
        toasts.tick();
        assert!(toasts.is_empty());
    }
}
