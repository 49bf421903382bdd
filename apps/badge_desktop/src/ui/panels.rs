//! Form, result and notification surfaces of the registration window.

use eframe::egui;
use shared::domain::{ExhibitionId, FormField};

use crate::controller::events::NotificationSeverity;
use crate::ui::app::{BadgeDesktopApp, CardPreview};

const CARD_MAX_HEIGHT: f32 = 520.0;

fn severity_color(severity: NotificationSeverity) -> egui::Color32 {
    match severity {
        NotificationSeverity::Info => egui::Color32::from_rgb(66, 153, 225),
        NotificationSeverity::Success => egui::Color32::from_rgb(56, 161, 105),
        NotificationSeverity::Warning => egui::Color32::from_rgb(221, 107, 32),
        NotificationSeverity::Error => egui::Color32::from_rgb(229, 62, 62),
    }
}

impl BadgeDesktopApp {
    pub(crate) fn show_registration_form(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Please select exhibition").strong());

        let selected_text = if self.state.is_loading() {
            "Loading...".to_string()
        } else {
            self.state
                .selected_exhibition()
                .map(|exhibition| exhibition.abbreviation.clone())
                .unwrap_or_else(|| "Select option".to_string())
        };

        let mut picked: Option<ExhibitionId> = None;
        ui.add_enabled_ui(self.state.can_select(), |ui| {
            egui::ComboBox::from_id_salt("exhibition_select")
                .selected_text(selected_text)
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for (id, label) in self.state.selector_options() {
                        let is_selected = self.state.selected_id() == Some(&id);
                        if ui.selectable_label(is_selected, label).clicked() {
                            picked = Some(id);
                        }
                    }
                });
        });
        if let Some(id) = picked {
            self.state.select_exhibition(&id);
        }
        ui.small(egui::RichText::new("Must choose.").weak());

        ui.add_space(24.0);

        for field in FormField::ALL {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(field.label()).strong());
                if field.is_required() {
                    ui.colored_label(ui.visuals().error_fg_color, "*");
                }
            });

            let mut value = self.state.form().get(field).to_string();
            let edit = egui::TextEdit::singleline(&mut value)
                .id_salt(("registration_field", field.label()))
                .hint_text(field.placeholder())
                .desired_width(f32::INFINITY);
            if ui.add(edit).changed() {
                self.state.edit_field(field, value);
            }
        }

        let missing = self.state.form().missing_required();
        if !missing.is_empty() {
            ui.add_space(6.0);
            let names: Vec<&str> = missing.iter().map(|field| field.label()).collect();
            ui.small(
                egui::RichText::new(format!("Required: {}", names.join(", ")))
                    .color(ui.visuals().warn_fg_color),
            );
        }

        ui.add_space(16.0);
        let busy = self.state.is_busy();
        let mut submit_clicked = false;
        ui.horizontal(|ui| {
            let label = if busy { "Submitting" } else { "Submit" };
            let button = egui::Button::new(egui::RichText::new(label).strong())
                .min_size(egui::vec2(120.0, 32.0));
            if ui.add_enabled(self.state.can_submit(), button).clicked() {
                submit_clicked = true;
            }
            if busy {
                ui.spinner();
            }
        });
        if submit_clicked {
            self.try_submit();
        }
    }

    pub(crate) fn show_result_panel(&mut self, ui: &mut egui::Ui) {
        match &mut self.card {
            CardPreview::Empty => {
                ui.label(
                    egui::RichText::new("Select an exhibition to preview its card.").weak(),
                );
            }
            CardPreview::Loading { .. } => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading card...");
                });
            }
            CardPreview::Failed { reason, .. } => {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("Couldn't load card: {reason}"),
                );
            }
            CardPreview::Ready {
                url,
                image,
                texture,
                ..
            } => {
                if texture.is_none() {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    *texture = Some(ui.ctx().load_texture(
                        format!("card_{url}"),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                if let Some(texture) = texture.as_ref() {
                    ui.add(
                        egui::Image::new(texture)
                            .max_width(ui.available_width())
                            .max_height(CARD_MAX_HEIGHT),
                    )
                    .on_hover_text("CARD");
                }
            }
        }

        if !self.state.is_refresh() {
            return;
        }

        ui.add_space(12.0);
        let can_download = self.can_download();
        let mut download_clicked = false;
        let mut reset_clicked = false;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_download, egui::Button::new("Download"))
                .clicked()
            {
                download_clicked = true;
            }
            ui.add_space(24.0);
            if ui.button("Reset").clicked() {
                reset_clicked = true;
            }
        });

        if download_clicked {
            self.download_card();
        }
        if reset_clicked {
            self.reset_registration();
        }
    }

    pub(crate) fn show_notification_dialog(&mut self, ctx: &egui::Context) {
        let Some(notification) = self.state.notification().cloned() else {
            return;
        };

        let mut dismissed = false;
        let response = egui::Modal::new(egui::Id::new("notification_dialog")).show(ctx, |ui| {
            ui.set_min_width(320.0);
            ui.label(
                egui::RichText::new(&notification.title)
                    .strong()
                    .size(18.0)
                    .color(severity_color(notification.severity)),
            );
            ui.add_space(8.0);
            ui.label(&notification.description);
            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

        if dismissed || response.should_close() {
            tracing::debug!(
                severity = notification.severity.label(),
                "notification dismissed"
            );
            self.state.dismiss_notification();
        }
    }
}
