use std::time::Duration;

/// Fixed delay before the status notifier hides itself.
pub const STATUS_HIDE_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    Success,
    #[default]
    Error,
}

/// Status notifier state. Every `show` bumps the generation so that only the
/// hide scheduled by the most recent show takes effect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct StatusBanner {
    pub(crate) visible: bool,
    pub(crate) text: String,
    pub(crate) kind: StatusKind,
    generation: u64,
}

impl StatusBanner {
    pub(crate) fn show(&mut self, text: String, kind: StatusKind) -> u64 {
        self.generation += 1;
        self.visible = true;
        self.text = text;
        self.kind = kind;
        self.generation
    }

    pub(crate) fn hide_if_current(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }
}
