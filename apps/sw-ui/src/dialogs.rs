//! Modal notices and confirmations.
//!
//! egui can not block inside a button handler, so a confirmation is shown as a
//! window first and the action runs on the frame the operator answers it,
//! through [`ModalDialogs::answered`].

use std::collections::VecDeque;
use sw_dashboard::Dialogs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirm {
    Reset,
}

#[derive(Default)]
pub struct ModalDialogs {
    notices: VecDeque<String>,
    pending: Option<(PendingConfirm, String)>,
}

/// [`Dialogs`] with the confirmation already answered.
pub struct Answered<'a> {
    answer: bool,
    notices: &'a mut VecDeque<String>,
}

impl Dialogs for Answered<'_> {
    fn notify(&mut self, message: &str) {
        self.notices.push_back(message.to_string());
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        self.answer
    }
}

impl ModalDialogs {
    pub fn answered(&mut self, answer: bool) -> Answered<'_> {
        Answered {
            answer,
            notices: &mut self.notices,
        }
    }

    pub fn ask(&mut self, what: PendingConfirm, prompt: &str) {
        self.pending = Some((what, prompt.to_string()));
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some() || !self.notices.is_empty()
    }

    /// Draw the open dialog, if any. Returns a confirmation once answered.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<(PendingConfirm, bool)> {
        let mut answer = None;
        if let Some((what, prompt)) = &self.pending {
            egui::Window::new("Confirm")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(prompt.as_str());
                    ui.horizontal(|ui| {
                        if ui.button("OK").clicked() {
                            answer = Some((*what, true));
                        }
                        if ui.button("Cancel").clicked() {
                            answer = Some((*what, false));
                        }
                    });
                });
        } else if let Some(notice) = self.notices.front() {
            let mut dismissed = false;
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(notice.as_str());
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            if dismissed {
                self.notices.pop_front();
            }
        }

        if answer.is_some() {
            self.pending = None;
        }
        answer
    }
}
