use chrono::Local;
use eframe::egui;
use panel_sheet::config::{AppConfig, Theme};
use panel_sheet::export::{self, Artifact, Exporter, ReportExporter, TsvExporter};
use panel_sheet::models::Table;
use panel_sheet::naming::ExportNaming;
use panel_sheet::report::ReportFormat;
use panel_sheet::tsv::{self, BLANK_TSV, CONTRACT, SAMPLE_TSV};
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::ui::table_view::TableView;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(230, 150, 20);

pub struct PanelApp {
    config: AppConfig,
    raw_tsv: String,
    table_view: TableView,

    // Advanced tab grid, reseeded whenever the input text changes
    editor_table: Table,
    editor_seed: String,

    // UI state
    current_tab: AppTab,
    filter_text: String,
    status_message: String,
    export_dir_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppTab {
    Input,
    Output,
    Advanced,
    Settings,
}

impl PanelApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            warn!("Could not load config, using defaults: {}", e);
            AppConfig::default()
        });

        let export_dir_text = config
            .export_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        Self {
            config,
            raw_tsv: SAMPLE_TSV.to_string(),
            table_view: TableView::new(),
            editor_table: Table::default(),
            editor_seed: String::new(),
            current_tab: AppTab::Input,
            filter_text: String::new(),
            status_message: "Ready".to_string(),
            export_dir_text,
        }
    }

    fn save_config(&mut self) {
        match self.config.save() {
            Ok(_) => info!("Configuration saved"),
            Err(e) => {
                error!("Failed to save config: {}", e);
                self.status_message = format!("Failed to save config: {}", e);
            }
        }
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        let mut visuals = match self.config.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        // Amber accent
        visuals.selection.bg_fill = ACCENT.gamma_multiply(0.45);
        visuals.hyperlink_color = ACCENT;
        visuals.widgets.active.bg_fill = ACCENT;
        ctx.set_visuals(visuals);
    }

    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.spacing_mut().item_spacing.x = 2.0;

            let tabs = [
                (AppTab::Input, "✏ In", "Paste or type TSV"),
                (AppTab::Output, "📤 Out", "Preview and export"),
                (AppTab::Advanced, "🧮 Advanced", "Edit as a table"),
                (AppTab::Settings, "🛠 Settings", "Project, report and export preferences"),
            ];

            for (tab, label, tooltip) in tabs {
                let is_active = self.current_tab == tab;
                let button = egui::Button::new(label)
                    .selected(is_active)
                    .min_size(egui::Vec2::new(110.0, 30.0));

                if ui.add(button).on_hover_text(tooltip).clicked() {
                    self.current_tab = tab;
                }
            }
        });
    }

    fn render_input_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Panel schedule");
        ui.weak(CONTRACT);
        ui.add_space(6.0);
        ui.label("Paste or type TSV here (Tab between columns).");

        ui.horizontal(|ui| {
            if ui.button("🗑 Clear").clicked() {
                self.raw_tsv = BLANK_TSV.to_string();
            }
            if ui.button("📋 Example").clicked() {
                self.raw_tsv = SAMPLE_TSV.to_string();
            }
            ui.separator();
            if ui
                .checkbox(&mut self.config.include_header, "Header in export")
                .changed()
            {
                self.save_config();
            }
        });

        ui.add_space(6.0);

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add_sized(
                [ui.available_width(), ui.available_height().max(360.0)],
                egui::TextEdit::multiline(&mut self.raw_tsv)
                    .font(egui::TextStyle::Monospace)
                    .hint_text("ID<TAB>Label<TAB>Meta")
                    .desired_width(f32::INFINITY),
            );
        });
    }

    fn render_output_tab(&mut self, ui: &mut egui::Ui, table: &Table) {
        let tsv_out = match export::export_to_clipboard(table, self.config.include_header) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to serialize table: {}", e);
                String::new()
            }
        };

        ui.horizontal(|ui| {
            ui.label("Export:");

            if ui.button("💾 Save TSV").on_hover_text("Ctrl+S").clicked() {
                self.export_tsv(table);
            }

            let report_label = format!("🖨 Save {} report", self.config.report_format);
            if ui.button(report_label).on_hover_text("Ctrl+P").clicked() {
                self.export_report(table, self.config.report_format);
            }

            if ui.button("📋 Copy TSV").clicked() {
                ui.output_mut(|o| o.copied_text = tsv_out.clone());
                self.status_message = "TSV copied to clipboard".to_string();
            }

            ui.separator();
            if ui
                .checkbox(&mut self.config.include_header, "Header in export")
                .changed()
            {
                self.save_config();
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("🔍 Filter:");
            ui.add(
                egui::TextEdit::singleline(&mut self.filter_text)
                    .desired_width(240.0)
                    .hint_text("Search rows..."),
            );
            if !self.filter_text.is_empty() && ui.button("✕").clicked() {
                self.filter_text.clear();
            }
        });

        ui.add_space(6.0);

        let preview_height = (ui.available_height() * 0.55).max(160.0);
        ui.allocate_ui(egui::vec2(ui.available_width(), preview_height), |ui| {
            self.table_view.render_preview(ui, table, &self.filter_text);
        });

        ui.separator();
        ui.strong("TSV out");

        let mut shown = tsv_out;
        egui::ScrollArea::vertical()
            .id_salt("tsv_out")
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut shown)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY)
                        .interactive(false),
                );
            });
    }

    fn render_advanced_tab(&mut self, ui: &mut egui::Ui, table: &Table) {
        if self.editor_seed != self.raw_tsv {
            self.editor_table = table.clone();
            self.editor_seed = self.raw_tsv.clone();
        }

        ui.label("Edit the rows as a table. Apply to write them back to the input text.");

        ui.horizontal(|ui| {
            if ui.button("⬅ Apply to input").clicked() {
                match tsv::serialize(&self.editor_table, true) {
                    Ok(text) => {
                        self.raw_tsv = text.clone();
                        self.editor_seed = text;
                        self.status_message =
                            format!("Input updated with {} rows", self.editor_table.len());
                    }
                    Err(e) => {
                        error!("Failed to serialize edited table: {}", e);
                        self.status_message = format!("Could not apply edits: {}", e);
                    }
                }
            }

            if ui.button("↺ Revert").clicked() {
                self.editor_table = table.clone();
            }
        });

        ui.separator();

        if self.table_view.render_editor(ui, &mut self.editor_table) {
            self.status_message = "Unapplied edits in Advanced tab".to_string();
        }
    }

    fn render_settings_tab(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("🛠 Settings");
            ui.separator();
            ui.add_space(8.0);

            let mut dirty = false;

            ui.group(|ui| {
                ui.label("📋 Project");
                ui.separator();

                egui::Grid::new("project_grid").num_columns(2).show(ui, |ui| {
                    ui.label("Project name:");
                    dirty |= ui
                        .add(
                            egui::TextEdit::singleline(&mut self.config.project_name)
                                .hint_text("e.g. Villa Ek"),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("Panel name:");
                    dirty |= ui
                        .add(
                            egui::TextEdit::singleline(&mut self.config.panel_name)
                                .hint_text("optional"),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("Report title:");
                    dirty |= ui
                        .text_edit_singleline(&mut self.config.report_title)
                        .changed();
                    ui.end_row();
                });
            });

            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label("📤 Export");
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Report format:");
                    egui::ComboBox::from_id_salt("report_format")
                        .selected_text(self.config.report_format.to_string())
                        .show_ui(ui, |ui| {
                            for format in [ReportFormat::Pdf, ReportFormat::Html] {
                                dirty |= ui
                                    .selectable_value(
                                        &mut self.config.report_format,
                                        format,
                                        format.to_string(),
                                    )
                                    .clicked();
                            }
                        });
                });

                ui.horizontal(|ui| {
                    ui.label("Export folder:");
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.export_dir_text)
                            .desired_width(320.0)
                            .hint_text("Downloads"),
                    );
                    if response.changed() {
                        let trimmed = self.export_dir_text.trim();
                        self.config.export_dir =
                            (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
                        dirty = true;
                    }
                });
                ui.weak(format!(
                    "Files are saved to {}",
                    self.config.resolved_export_dir().display()
                ));
            });

            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label("🖨 Report layout (mm)");
                ui.separator();

                let report = &mut self.config.report;
                egui::Grid::new("layout_grid").num_columns(2).show(ui, |ui| {
                    let field = |ui: &mut egui::Ui, label: &str, value: &mut f32| {
                        ui.label(label);
                        let changed = ui
                            .add(egui::DragValue::new(value).speed(0.5).range(0.0..=400.0))
                            .changed();
                        ui.end_row();
                        changed
                    };

                    dirty |= field(ui, "Margin", &mut report.margin_mm);
                    dirty |= field(ui, "ID column", &mut report.id_column_mm);
                    dirty |= field(ui, "Row height", &mut report.row_height_mm);
                    dirty |= field(ui, "Label padding", &mut report.label_padding_mm);
                    dirty |= field(ui, "Footer band", &mut report.footer_band_mm);

                    ui.label("Max label characters");
                    dirty |= ui
                        .add(egui::DragValue::new(&mut report.max_label_chars).range(1..=1000))
                        .changed();
                    ui.end_row();
                });

                if ui.button("Reset layout").clicked() {
                    *report = Default::default();
                    dirty = true;
                }
            });

            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label("🎨 Theme");
                ui.separator();
                ui.horizontal(|ui| {
                    dirty |= ui
                        .selectable_value(&mut self.config.theme, Theme::Light, "Light")
                        .clicked();
                    dirty |= ui
                        .selectable_value(&mut self.config.theme, Theme::Dark, "Dark")
                        .clicked();
                });
            });

            let problems = self.config.validate();
            if !problems.is_empty() {
                ui.add_space(8.0);
                ui.group(|ui| {
                    ui.label("⚠ Configuration issues");
                    ui.separator();
                    for problem in &problems {
                        ui.colored_label(egui::Color32::from_rgb(244, 67, 54), format!("• {}", problem));
                    }
                });
            }

            if dirty {
                self.save_config();
            }
        });
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui, table: &Table) {
        ui.horizontal(|ui| {
            ui.label(&self.status_message);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(10.0);
                ui.label(format!(
                    "v{} | {} rows",
                    env!("CARGO_PKG_VERSION"),
                    table.len()
                ));
            });
        });
    }

    fn export_tsv(&mut self, table: &Table) {
        let exporter = TsvExporter::new().with_header(self.config.include_header);
        self.deliver(&exporter, table);
    }

    fn export_report(&mut self, table: &Table, format: ReportFormat) {
        let exporter = ReportExporter::new(
            format,
            self.config.effective_title(),
            Local::now().date_naive(),
        )
        .with_layout(self.config.report.clone());
        self.deliver(&exporter, table);
    }

    fn deliver(&mut self, exporter: &dyn Exporter, table: &Table) {
        let naming = ExportNaming::new(
            self.config.project_name.clone(),
            self.config.panel_name.clone(),
            Local::now().naive_local(),
        );
        let dir = self.config.resolved_export_dir();

        match Artifact::build(exporter, table, &naming).and_then(|a| a.save_into(&dir)) {
            Ok(path) => {
                self.status_message = format!("Saved {}", path.display());
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.status_message = format!("❌ Export failed: {}", e);
            }
        }
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context, table: &Table) {
        let (save, print) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::S),
                i.modifiers.command && i.key_pressed(egui::Key::P),
            )
        });

        if save {
            self.export_tsv(table);
        }
        if print {
            self.export_report(table, self.config.report_format);
        }
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Parsed fresh every frame from the current input text
        let table = tsv::normalize(&self.raw_tsv);

        self.handle_keyboard_shortcuts(ctx, &table);
        self.apply_theme(ctx);

        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_tab_bar(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_status_bar(ui, &table);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_tab {
            AppTab::Input => self.render_input_tab(ui),
            AppTab::Output => self.render_output_tab(ui, &table),
            AppTab::Advanced => self.render_advanced_tab(ui, &table),
            AppTab::Settings => self.render_settings_tab(ui),
        });
    }
}

