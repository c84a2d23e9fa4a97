use std::{
    collections::BTreeMap,
    time::{Duration, Instant},
};

use eframe::egui;
use form_core::{FormController, FormEvent, PersonDraft};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{Person, PersonId},
    error::{Field, FieldError},
};
use tracing::warn;

pub const SETTINGS_STORAGE_KEY: &str = "person_roster_desktop_settings";

/// How long a toast stays visible before it auto-dismisses.
const NOTIFICATION_DURATION: Duration = Duration::from_millis(5000);

const FORM_PANEL_WIDTH: f32 = 340.0;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub title: String,
    pub demo: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            title: "Person Roster".to_string(),
            demo: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ThemeSettings {
    accent_color: egui::Color32,
    list_row_shading: bool,
}

impl ThemeSettings {
    fn defaults() -> Self {
        Self {
            accent_color: egui::Color32::from_rgb(67, 136, 204),
            list_row_shading: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct UiReadabilitySettings {
    text_scale: f32,
    compact_density: bool,
}

impl UiReadabilitySettings {
    fn defaults() -> Self {
        Self {
            text_scale: 1.0,
            compact_density: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedAppSettings {
    accent_color: [u8; 4],
    list_row_shading: bool,
    text_scale: f32,
    compact_density: bool,
}

impl Default for PersistedAppSettings {
    fn default() -> Self {
        let theme = ThemeSettings::defaults();
        let readability = UiReadabilitySettings::defaults();
        Self {
            accent_color: [
                theme.accent_color.r(),
                theme.accent_color.g(),
                theme.accent_color.b(),
                theme.accent_color.a(),
            ],
            list_row_shading: theme.list_row_shading,
            text_scale: readability.text_scale,
            compact_density: readability.compact_density,
        }
    }
}

impl PersistedAppSettings {
    fn into_runtime(self) -> (ThemeSettings, UiReadabilitySettings) {
        (
            ThemeSettings {
                accent_color: egui::Color32::from_rgba_unmultiplied(
                    self.accent_color[0],
                    self.accent_color[1],
                    self.accent_color[2],
                    self.accent_color[3],
                ),
                list_row_shading: self.list_row_shading,
            },
            UiReadabilitySettings {
                text_scale: self.text_scale.clamp(0.8, 1.4),
                compact_density: self.compact_density,
            },
        )
    }

    fn from_runtime(theme: ThemeSettings, readability: UiReadabilitySettings) -> Self {
        Self {
            accent_color: [
                theme.accent_color.r(),
                theme.accent_color.g(),
                theme.accent_color.b(),
                theme.accent_color.a(),
            ],
            list_row_shading: theme.list_row_shading,
            text_scale: readability.text_scale.clamp(0.8, 1.4),
            compact_density: readability.compact_density,
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    shown_at: Instant,
}

impl Toast {
    /// Time left before auto-dismissal, or `None` once expired.
    fn remaining(&self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.shown_at);
        NOTIFICATION_DURATION.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}

fn toast_message(event: &FormEvent) -> String {
    match event {
        FormEvent::Submitted => "Form submitted".to_string(),
        FormEvent::Modified { name, surname } => {
            format!("Person {name} {surname} has been modified")
        }
        FormEvent::Deleted { name, surname } => {
            format!("Person {name} {surname} has been deleted")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowAction {
    Edit(PersonId),
    Delete(PersonId),
}

struct RecordRow {
    id: PersonId,
    cells: [String; 7],
    editing: bool,
}

fn person_cells(person: &Person) -> [String; 7] {
    let fields = &person.fields;
    [
        fields.name.clone(),
        fields.surname.clone(),
        fields.age.to_string(),
        fields.national_id.clone(),
        fields.birthdate.format("%Y-%m-%d").to_string(),
        fields.favorite_color.clone(),
        fields.sex.clone(),
    ]
}

fn draft_cells(draft: &PersonDraft) -> [String; 7] {
    [
        draft.name.clone(),
        draft.surname.clone(),
        draft.age.clone(),
        draft.national_id.clone(),
        draft.birthdate.clone(),
        draft.favorite_color.clone(),
        draft.sex.clone(),
    ]
}

/// One row per stored record, in store order. The record under edit shows
/// the draft's values exactly as typed, so the list is a live preview of
/// the in-progress edit.
fn collect_rows(controller: &FormController) -> Vec<RecordRow> {
    controller
        .store()
        .list()
        .iter()
        .map(|person| {
            let editing = controller.editing() == Some(person.id);
            let cells = if editing {
                draft_cells(controller.draft())
            } else {
                person_cells(person)
            };
            RecordRow {
                id: person.id,
                cells,
                editing,
            }
        })
        .collect()
}

fn seed_demo_records(controller: &mut FormController) {
    let samples = [
        ("Ana", "Lopez", "30", "123456789", "2000-01-01", "rojo", "F"),
        ("Bruno", "Marti", "42", "987654321", "1983-06-14", "verde", "M"),
        ("Carla", "Vega", "27", "456123789", "1998-11-02", "azul", "F"),
    ];
    for (name, surname, age, national_id, birthdate, favorite_color, sex) in samples {
        let draft = controller.draft_mut();
        draft.name = name.to_string();
        draft.surname = surname.to_string();
        draft.age = age.to_string();
        draft.national_id = national_id.to_string();
        draft.birthdate = birthdate.to_string();
        draft.favorite_color = favorite_color.to_string();
        draft.sex = sex.to_string();
        if !controller.submit_create() {
            warn!(name, surname, "demo record failed validation; skipped");
        }
    }
    // Seeding is not a user action; drop the queued notifications.
    controller.drain_events();
}

fn scaled_text_styles(scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    for font in styles.values_mut() {
        font.size *= scale;
    }
    styles
}

fn form_text_field(
    ui: &mut egui::Ui,
    id: &'static str,
    field: Field,
    hint: &str,
    value: &mut String,
    error: Option<&FieldError>,
    show_empty_errors: bool,
) -> egui::Response {
    ui.label(egui::RichText::new(field.label()).strong());
    let edit = egui::TextEdit::singleline(value)
        .id_salt(id)
        .hint_text(
            egui::RichText::new(hint).color(ui.visuals().weak_text_color().gamma_multiply(0.85)),
        )
        .desired_width(f32::INFINITY);
    let response = ui.add_sized([ui.available_width(), 30.0], edit);

    // Empty-field errors only appear after a refused submission; anything
    // typed shows its hint immediately.
    if let Some(error) = error {
        if show_empty_errors || !value.trim().is_empty() {
            ui.small(
                egui::RichText::new(error.to_string()).color(ui.visuals().error_fg_color),
            );
        }
    }
    ui.add_space(4.0);
    response
}

pub struct FormApp {
    controller: FormController,
    toast: Option<Toast>,
    submit_attempted: bool,

    settings_open: bool,
    theme: ThemeSettings,
    applied_theme: Option<ThemeSettings>,
    readability: UiReadabilitySettings,
    applied_readability: Option<UiReadabilitySettings>,
}

impl FormApp {
    pub fn bootstrap(startup: StartupConfig, persisted: Option<PersistedAppSettings>) -> Self {
        let (theme, readability) = persisted.unwrap_or_default().into_runtime();
        let mut controller = FormController::new();
        if startup.demo {
            seed_demo_records(&mut controller);
        }
        Self {
            controller,
            toast: None,
            submit_attempted: false,
            settings_open: false,
            theme,
            applied_theme: None,
            readability,
            applied_readability: None,
        }
    }

    fn process_form_events(&mut self) {
        // A newer toast replaces the current one and restarts its timer.
        for event in self.controller.drain_events() {
            self.toast = Some(Toast {
                message: toast_message(&event),
                shown_at: Instant::now(),
            });
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme)
            && self.applied_readability == Some(self.readability)
        {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.text_styles = scaled_text_styles(self.readability.text_scale);
        style.visuals.selection.bg_fill = self.theme.accent_color.gamma_multiply(0.9);
        style.visuals.hyperlink_color = self.theme.accent_color;

        if self.readability.compact_density {
            style.spacing.item_spacing = egui::vec2(6.0, 4.0);
            style.spacing.button_padding = egui::vec2(8.0, 5.0);
            style.spacing.interact_size = egui::vec2(40.0, 24.0);
        } else {
            style.spacing.item_spacing = egui::vec2(8.0, 6.0);
            style.spacing.button_padding = egui::vec2(10.0, 6.0);
            style.spacing.interact_size = egui::vec2(40.0, 30.0);
        }
        ctx.set_style(style);
        self.applied_theme = Some(self.theme);
        self.applied_readability = Some(self.readability);
    }

    fn try_submit_create(&mut self) {
        if self.controller.submit_create() {
            self.submit_attempted = false;
        } else {
            self.submit_attempted = true;
        }
    }

    fn try_commit_edit(&mut self) {
        if self.controller.commit_edit() {
            self.submit_attempted = false;
        } else {
            self.submit_attempted = true;
        }
    }

    fn cancel_edit(&mut self) {
        self.controller.cancel_edit();
        self.submit_attempted = false;
    }

    fn show_form_panel(&mut self, ui: &mut egui::Ui) {
        let validation = self.controller.draft().validate();
        let show_empty_errors = self.submit_attempted;
        let editing_name = self
            .controller
            .editing()
            .and_then(|id| self.controller.store().get(id))
            .map(Person::full_name);

        ui.add_space(6.0);
        match &editing_name {
            Some(name) => {
                ui.label(
                    egui::RichText::new(format!("Editing {name}"))
                        .color(self.theme.accent_color)
                        .strong(),
                );
                ui.weak("Changes preview live in the list until saved.");
            }
            None => {
                ui.heading("New person");
                ui.weak("Fill every field to add a record.");
            }
        }
        ui.add_space(8.0);

        let any_field_has_focus;
        {
            let draft = self.controller.draft_mut();
            let responses = [
                form_text_field(
                    ui,
                    "field_name",
                    Field::Name,
                    "Ana",
                    &mut draft.name,
                    validation.name.as_ref(),
                    show_empty_errors,
                ),
                form_text_field(
                    ui,
                    "field_surname",
                    Field::Surname,
                    "Lopez",
                    &mut draft.surname,
                    validation.surname.as_ref(),
                    show_empty_errors,
                ),
                form_text_field(
                    ui,
                    "field_age",
                    Field::Age,
                    "30",
                    &mut draft.age,
                    validation.age.as_ref(),
                    show_empty_errors,
                ),
                form_text_field(
                    ui,
                    "field_national_id",
                    Field::NationalId,
                    "123456789",
                    &mut draft.national_id,
                    validation.national_id.as_ref(),
                    show_empty_errors,
                ),
                form_text_field(
                    ui,
                    "field_birthdate",
                    Field::Birthdate,
                    "2000-01-01",
                    &mut draft.birthdate,
                    validation.birthdate.as_ref(),
                    show_empty_errors,
                ),
                form_text_field(
                    ui,
                    "field_favorite_color",
                    Field::FavoriteColor,
                    "rojo",
                    &mut draft.favorite_color,
                    validation.favorite_color.as_ref(),
                    show_empty_errors,
                ),
                form_text_field(
                    ui,
                    "field_sex",
                    Field::Sex,
                    "F",
                    &mut draft.sex,
                    validation.sex.as_ref(),
                    show_empty_errors,
                ),
            ];
            any_field_has_focus = responses.iter().any(|response| response.has_focus());
        }

        ui.add_space(8.0);

        // Enter anywhere in the form triggers the active submit path.
        let enter_pressed = ui.ctx().input(|i| i.key_pressed(egui::Key::Enter));
        let submit_via_keyboard = any_field_has_focus && enter_pressed;

        if editing_name.is_some() {
            let mut save_clicked = false;
            let mut cancel_clicked = false;
            ui.horizontal(|ui| {
                let save = egui::Button::new(egui::RichText::new("Save changes").strong())
                    .fill(self.theme.accent_color)
                    .min_size(egui::vec2(ui.available_width() * 0.6, 34.0));
                save_clicked = ui.add(save).clicked();
                cancel_clicked = ui
                    .add(egui::Button::new("Cancel").min_size(egui::vec2(0.0, 34.0)))
                    .clicked();
            });
            if save_clicked || submit_via_keyboard {
                self.try_commit_edit();
            } else if cancel_clicked {
                self.cancel_edit();
            }
        } else {
            let submit = egui::Button::new(egui::RichText::new("Add person").strong())
                .fill(self.theme.accent_color)
                .min_size(egui::vec2(ui.available_width(), 34.0));
            if ui.add(submit).clicked() || submit_via_keyboard {
                self.try_submit_create();
            }
        }
    }

    fn show_records_panel(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.heading("Records");
            ui.weak(format!("{} stored", self.controller.store().len()));
        });
        ui.separator();

        if self.controller.store().is_empty() {
            ui.weak("No records yet. Fill the form to add the first person.");
            return;
        }

        let rows = collect_rows(&self.controller);
        let mut action: Option<RowAction> = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("records_grid")
                    .striped(self.theme.list_row_shading)
                    .num_columns(8)
                    .spacing(egui::vec2(14.0, 6.0))
                    .show(ui, |ui| {
                        for field in Field::ALL {
                            ui.label(egui::RichText::new(field.label()).strong());
                        }
                        ui.label("");
                        ui.end_row();

                        for row in &rows {
                            for (index, cell) in row.cells.iter().enumerate() {
                                if row.editing && index == 0 {
                                    ui.label(
                                        egui::RichText::new(cell)
                                            .color(self.theme.accent_color)
                                            .italics(),
                                    );
                                } else if row.editing {
                                    ui.label(egui::RichText::new(cell).italics());
                                } else {
                                    ui.label(cell);
                                }
                            }
                            ui.horizontal(|ui| {
                                if row.editing {
                                    ui.small(
                                        egui::RichText::new("editing")
                                            .color(self.theme.accent_color),
                                    );
                                } else if ui.small_button("Edit").clicked() {
                                    action = Some(RowAction::Edit(row.id));
                                }
                                if ui.small_button("Delete").clicked() {
                                    action = Some(RowAction::Delete(row.id));
                                }
                            });
                            ui.end_row();
                        }
                    });
            });

        match action {
            Some(RowAction::Edit(id)) => {
                self.controller.start_edit(id);
                self.submit_attempted = false;
            }
            Some(RowAction::Delete(id)) => {
                self.controller.delete_record(id);
            }
            None => {}
        }
    }

    fn show_toast(&mut self, ctx: &egui::Context) {
        let Some(toast) = &self.toast else {
            return;
        };
        let remaining = toast.remaining(Instant::now());
        let message = toast.message.clone();
        let Some(remaining) = remaining else {
            self.toast = None;
            return;
        };
        ctx.request_repaint_after(remaining);

        let mut dismissed = false;
        egui::TopBottomPanel::bottom("toast_panel")
            .show_separator_line(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(ui.visuals().extreme_bg_color)
                    .stroke(egui::Stroke::new(1.0, self.theme.accent_color))
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(10, 8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(&message);
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button("Dismiss").clicked() {
                                        dismissed = true;
                                    }
                                },
                            );
                        });
                    });
            });
        if dismissed {
            self.toast = None;
        }
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        let mut settings_open = self.settings_open;
        egui::Window::new("Settings")
            .open(&mut settings_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Accent color");
                ui.color_edit_button_srgba(&mut self.theme.accent_color);
                ui.small("Used for the edited row, toasts, and primary actions.");
                ui.checkbox(
                    &mut self.theme.list_row_shading,
                    "Shaded backgrounds for list rows",
                );
                ui.separator();
                ui.label("Readability");
                ui.add(
                    egui::Slider::new(&mut self.readability.text_scale, 0.8..=1.4)
                        .text("Text scale")
                        .step_by(0.05),
                );
                ui.checkbox(&mut self.readability.compact_density, "Compact UI density");

                if ui.button("Reset all settings to defaults").clicked() {
                    self.theme = ThemeSettings::defaults();
                    self.readability = UiReadabilitySettings::defaults();
                }
            });
        self.settings_open = settings_open;
    }
}

impl eframe::App for FormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme_if_needed(ctx);
        self.process_form_events();
        self.show_settings_window(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Person Roster");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙ Settings").clicked() {
                        self.settings_open = true;
                    }
                });
            });
        });

        self.show_toast(ctx);

        egui::SidePanel::left("form_panel")
            .resizable(false)
            .default_width(FORM_PANEL_WIDTH)
            .show(ctx, |ui| {
                self.show_form_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_records_panel(ui);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let persisted = PersistedAppSettings::from_runtime(self.theme, self.readability);
        if let Ok(text) = serde_json::to_string(&persisted) {
            storage.set_string(SETTINGS_STORAGE_KEY, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_core::FormController;

    #[test]
    fn toast_messages_name_the_affected_person() {
        assert_eq!(toast_message(&FormEvent::Submitted), "Form submitted");
        assert_eq!(
            toast_message(&FormEvent::Modified {
                name: "Ana".to_string(),
                surname: "Lopez".to_string(),
            }),
            "Person Ana Lopez has been modified"
        );
        assert_eq!(
            toast_message(&FormEvent::Deleted {
                name: "Ana".to_string(),
                surname: "Lopez".to_string(),
            }),
            "Person Ana Lopez has been deleted"
        );
    }

    #[test]
    fn toast_expires_after_the_notification_duration() {
        let shown_at = Instant::now();
        let toast = Toast {
            message: "Form submitted".to_string(),
            shown_at,
        };
        assert!(toast.remaining(shown_at).is_some());
        assert!(toast
            .remaining(shown_at + NOTIFICATION_DURATION - Duration::from_millis(1))
            .is_some());
        assert!(toast.remaining(shown_at + NOTIFICATION_DURATION).is_none());
    }

    #[test]
    fn demo_seeding_creates_records_without_pending_toasts() {
        let mut controller = FormController::new();
        seed_demo_records(&mut controller);
        assert_eq!(controller.store().len(), 3);
        assert!(controller.drain_events().is_empty());
        assert!(controller.draft().is_empty());
    }

    #[test]
    fn record_rows_show_live_draft_values_for_the_record_under_edit() {
        let mut controller = FormController::new();
        seed_demo_records(&mut controller);
        let id = controller.store().list()[0].id;
        controller.start_edit(id);
        controller.draft_mut().age = "31".to_string();

        let rows = collect_rows(&controller);
        assert!(rows[0].editing);
        assert_eq!(rows[0].cells[2], "31");
        // The store still holds the committed value until the edit is saved.
        assert_eq!(controller.store().get(id).expect("person").fields.age, 30);
        assert!(!rows[1].editing);
        assert_eq!(rows[1].cells[2], "42");
    }

    #[test]
    fn persisted_settings_round_trip_and_clamp_text_scale() {
        let persisted = PersistedAppSettings {
            accent_color: [10, 20, 30, 255],
            list_row_shading: false,
            text_scale: 9.0,
            compact_density: true,
        };
        let (theme, readability) = persisted.into_runtime();
        assert_eq!(theme.accent_color, egui::Color32::from_rgb(10, 20, 30));
        assert!(!theme.list_row_shading);
        assert_eq!(readability.text_scale, 1.4);
        assert!(readability.compact_density);

        let back = PersistedAppSettings::from_runtime(theme, readability);
        assert_eq!(back.accent_color, [10, 20, 30, 255]);
        assert_eq!(back.text_scale, 1.4);

        let json = serde_json::to_string(&back).expect("serialize settings");
        let reparsed: PersistedAppSettings = serde_json::from_str(&json).expect("parse settings");
        assert_eq!(reparsed, back);
    }

    #[test]
    fn demo_birthdates_parse_as_dates_in_the_store() {
        let mut controller = FormController::new();
        seed_demo_records(&mut controller);
        let first = &controller.store().list()[0];
        assert_eq!(
            first.fields.birthdate,
            chrono::NaiveDate::from_ymd_opt(2000, 1, 1).expect("date")
        );
    }
}
