//! Form and layout primitives shared by every view.

mod badge;
pub use badge::{Badge, BadgeVariant};

mod button;
pub use button::{Button, ButtonVariant};

mod card;
pub use card::{Card, EmptyState, StatCard};

mod dialog;
pub use dialog::{ConfirmDialog, ModalOverlay};

mod input;
pub use input::{Checkbox, Input, Label, Select, Textarea};

mod spinner;
pub use spinner::{LoadingScreen, Spinner};
