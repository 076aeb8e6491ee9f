//! Modal prompt protocol between the game lifecycle and the display layer
//!
//! The engine never draws anything: when a game ends or the player asks to
//! leave, it publishes a [`DialogPrompt`] and stays suspended until the
//! display layer answers with a [`DialogOutcome`]. Mapping an outcome back
//! to a lifecycle transition is a pure function, so the whole flow is
//! testable without a terminal.

/// What pressing a dialog button asks the lifecycle to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// Dismiss the popup and leave the session as it is
    ClosePopup,
    /// Reset the session and play again
    Restart,
    /// Tear the session down and notify the host
    ToMainMenu,
    /// Continue a paused game
    ResumeGame,
}

/// Visual weight of a dialog button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Plain,
    Primary,
    Warn,
}

/// One button in a modal prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogButton {
    pub label: &'static str,
    pub style: ButtonStyle,
    pub action: DialogAction,
}

/// How an open prompt was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// A button was activated
    Chosen(DialogAction),
    /// The prompt was closed without picking a button
    Dismissed,
}

/// A modal prompt shown over the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogPrompt {
    pub message: String,
    pub buttons: Vec<DialogButton>,
    /// Action applied when the prompt is dismissed without a choice
    pub dismiss_action: DialogAction,
}

impl DialogPrompt {
    /// Prompt shown when the snake runs into itself
    pub fn game_over(score: u32) -> Self {
        Self {
            message: format!("Game over! Your score: {score}"),
            buttons: Self::terminal_buttons(),
            dismiss_action: DialogAction::ClosePopup,
        }
    }

    /// Prompt shown when the snake fills the whole board
    pub fn victory(score: u32) -> Self {
        Self {
            message: format!("You won, the board is full! Score: {score}"),
            buttons: Self::terminal_buttons(),
            dismiss_action: DialogAction::ClosePopup,
        }
    }

    /// Prompt shown when the player asks to leave a game in progress
    pub fn confirm_exit() -> Self {
        Self {
            message: "Leave the game and return to the main menu?".to_owned(),
            buttons: vec![
                DialogButton {
                    label: "Resume",
                    style: ButtonStyle::Primary,
                    action: DialogAction::ResumeGame,
                },
                DialogButton {
                    label: "Main menu",
                    style: ButtonStyle::Warn,
                    action: DialogAction::ToMainMenu,
                },
            ],
            dismiss_action: DialogAction::ResumeGame,
        }
    }

    fn terminal_buttons() -> Vec<DialogButton> {
        vec![
            DialogButton {
                label: "Close",
                style: ButtonStyle::Plain,
                action: DialogAction::ClosePopup,
            },
            DialogButton {
                label: "Restart",
                style: ButtonStyle::Primary,
                action: DialogAction::Restart,
            },
            DialogButton {
                label: "Main menu",
                style: ButtonStyle::Warn,
                action: DialogAction::ToMainMenu,
            },
        ]
    }

    /// The action a given outcome resolves to
    pub fn action_for(&self, outcome: DialogOutcome) -> DialogAction {
        match outcome {
            DialogOutcome::Chosen(action) => action,
            DialogOutcome::Dismissed => self.dismiss_action,
        }
    }
}
