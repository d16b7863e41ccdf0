use crate::state::notice::{Notice, NoticeKind};

/// What the user did with the notice this frame.
pub enum NoticeResponse {
    Dismiss,
    Copy(String),
}

fn accent(kind: NoticeKind) -> egui::Color32 {
    match kind {
        NoticeKind::Error => egui::Color32::from_rgb(255, 80, 80),
        NoticeKind::Warning => egui::Color32::from_rgb(240, 180, 40),
        NoticeKind::Info => egui::Color32::from_rgb(90, 160, 255),
    }
}

/// Show `notice` as a modal over the whole window.
///
/// Returns `None` while the notice stays open.
pub fn show_notice(ctx: &egui::Context, notice: &Notice) -> Option<NoticeResponse> {
    let mut result = None;

    let modal = egui::Modal::new(egui::Id::new("notice_modal")).show(ctx, |ui| {
        ui.set_width(380.0);
        ui.label(
            egui::RichText::new(&notice.title)
                .heading()
                .color(accent(notice.kind)),
        );
        ui.add_space(8.0);
        ui.label(&notice.message);
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            let ok = egui::Button::new(egui::RichText::new("OK").strong())
                .min_size(egui::vec2(90.0, 28.0));
            if ui.add(ok).clicked() {
                result = Some(NoticeResponse::Dismiss);
            }
            if let Some(text) = &notice.copy_text {
                if ui.add(egui::Button::new("Copy").min_size(egui::vec2(90.0, 28.0))).clicked() {
                    result = Some(NoticeResponse::Copy(text.clone()));
                }
            }
        });
    });

    if result.is_none() && modal.should_close() {
        result = Some(NoticeResponse::Dismiss);
    }
    result
}
