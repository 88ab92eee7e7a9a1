//! Wizard Steps
//!
//! The interview runs through four linear steps. Any step can be opened
//! directly from the step navigation; nothing gates moving forward.

/// One step of the interview wizard
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Intro,
    Reflection,
    Ratings,
    Conclusion,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Intro,
        WizardStep::Reflection,
        WizardStep::Ratings,
        WizardStep::Conclusion,
    ];

    /// Zero-based position
    pub fn index(&self) -> usize {
        match self {
            WizardStep::Intro => 0,
            WizardStep::Reflection => 1,
            WizardStep::Ratings => 2,
            WizardStep::Conclusion => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::Intro => "Introduction",
            WizardStep::Reflection => "Self-reflection",
            WizardStep::Ratings => "Ratings",
            WizardStep::Conclusion => "Conclusion",
        }
    }

    /// Step at `index`, if any
    pub fn goto(index: usize) -> Option<WizardStep> {
        WizardStep::ALL.get(index).copied()
    }

    /// Following step; the last step stays put
    pub fn next(&self) -> WizardStep {
        WizardStep::goto(self.index() + 1).unwrap_or(*self)
    }

    /// Preceding step; the first step stays put
    pub fn previous(&self) -> WizardStep {
        self.index()
            .checked_sub(1)
            .and_then(WizardStep::goto)
            .unwrap_or(*self)
    }

    pub fn is_first(&self) -> bool {
        self.index() == 0
    }

    pub fn is_last(&self) -> bool {
        self.index() == WizardStep::ALL.len() - 1
    }
}

/// Sidebar tab
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SidebarTab {
    #[default]
    Notes,
    Star,
    Vesier,
}

impl SidebarTab {
    pub const ALL: [SidebarTab; 3] = [SidebarTab::Notes, SidebarTab::Star, SidebarTab::Vesier];

    pub fn label(&self) -> &'static str {
        match self {
            SidebarTab::Notes => "Notes",
            SidebarTab::Star => "STAR",
            SidebarTab::Vesier => "VeSiEr",
        }
    }
}

/// What the save indicator shows for the open candidate
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Failed(String),
}

impl SaveStatus {
    pub fn label(&self) -> String {
        match self {
            SaveStatus::Idle => String::new(),
            SaveStatus::Saving => "Saving…".to_string(),
            SaveStatus::Saved => "All changes saved".to_string(),
            SaveStatus::Failed(reason) => format!("Not saved: {}", reason),
        }
    }
}

/// Counts the field saves in flight; a failure sticks until a later save succeeds
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveTracker {
    pending: u32,
    saved: bool,
    failure: Option<String>,
}

impl SaveTracker {
    pub fn started(&mut self) {
        self.pending += 1;
    }

    pub fn finished(&mut self, result: Result<(), String>) {
        self.pending = self.pending.saturating_sub(1);
        match result {
            Ok(()) => {
                self.saved = true;
                self.failure = None;
            }
            Err(reason) => self.failure = Some(reason),
        }
    }

    pub fn status(&self) -> SaveStatus {
        if self.pending > 0 {
            SaveStatus::Saving
        } else if let Some(reason) = &self.failure {
            SaveStatus::Failed(reason.clone())
        } else if self.saved {
            SaveStatus::Saved
        } else {
            SaveStatus::Idle
        }
    }
}
