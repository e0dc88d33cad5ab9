//! The add-to-cart submit button.

/// Markup shown while the request is in flight.
pub const SPINNER_HTML: &str = r#"<i class="fas fa-spinner fa-spin"></i>"#;
/// Markup shown once the item is in the cart.
pub const ADDED_HTML: &str = r#"<i class="fas fa-check"></i>"#;
/// Class added to the button once the item is in the cart.
pub const ADDED_CLASS: &str = "added-to-cart";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlPhase {
    #[default]
    Idle,
    Submitting,
    Added,
}

/// Button state across one submission. The original markup is kept so a
/// failed request can put it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    original_html: String,
    phase: ControlPhase,
}

impl SubmitControl {
    pub fn new(original_html: impl Into<String>) -> Self {
        Self {
            original_html: original_html.into(),
            phase: ControlPhase::Idle,
        }
    }

    pub fn phase(&self) -> ControlPhase {
        self.phase
    }

    /// Enter the submitting state. Returns false if a submission is already
    /// running or already succeeded.
    pub fn begin(&mut self) -> bool {
        if self.phase != ControlPhase::Idle {
            return false;
        }
        self.phase = ControlPhase::Submitting;
        true
    }

    /// Back to the pre-submit markup, enabled.
    pub fn restore(&mut self) {
        self.phase = ControlPhase::Idle;
    }

    /// Item added: show the check mark and stay disabled until reload.
    pub fn mark_added(&mut self) {
        self.phase = ControlPhase::Added;
    }

    pub fn disabled(&self) -> bool {
        self.phase != ControlPhase::Idle
    }

    pub fn inner_html(&self) -> &str {
        match self.phase {
            ControlPhase::Idle => &self.original_html,
            ControlPhase::Submitting => SPINNER_HTML,
            ControlPhase::Added => ADDED_HTML,
        }
    }

    pub fn added_class(&self) -> Option<&'static str> {
        (self.phase == ControlPhase::Added).then_some(ADDED_CLASS)
    }
}
