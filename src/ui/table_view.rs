use eframe::egui;
use egui_extras::{Column, TableBuilder};
use panel_sheet::models::{Row, Table};

const ROW_HEIGHT: f32 = 24.0;

pub struct TableView {
    pending_insert: Option<usize>,
    pending_remove: Option<usize>,
}

impl TableView {
    pub fn new() -> Self {
        Self {
            pending_insert: None,
            pending_remove: None,
        }
    }

    /// Read-only grid of the parsed table.
    pub fn render_preview(&mut self, ui: &mut egui::Ui, table: &Table, filter: &str) {
        let rows = table.get_filtered(filter);

        ui.horizontal(|ui| {
            ui.heading("Preview");
            ui.separator();
            if filter.is_empty() {
                ui.label(format!("{} rows", table.len()));
            } else {
                ui.label(format!("Showing {} of {} rows", rows.len(), table.len()));
            }
        });

        ui.separator();

        let available_height = ui.available_height();

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(90.0).at_least(60.0))
            .column(Column::initial(320.0).at_least(150.0))
            .column(Column::remainder().at_least(120.0))
            .max_scroll_height(available_height)
            .header(ROW_HEIGHT, |mut header| {
                for name in Table::HEADERS {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let entry = rows[row.index()];
                    for value in entry.fields() {
                        row.col(|ui| {
                            ui.label(value);
                        });
                    }
                });
            });
    }

    /// Editable grid; returns true when any cell or the row set changed.
    pub fn render_editor(&mut self, ui: &mut egui::Ui, table: &mut Table) -> bool {
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label(format!("{} rows", table.len()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("➕ Add row").clicked() {
                    table.push(Row::default());
                    changed = true;
                }
                if ui
                    .button("🧹 Drop blank rows")
                    .on_hover_text("Remove rows where every field is empty")
                    .clicked()
                {
                    changed |= table.remove_blank_rows() > 0;
                }
            });
        });

        ui.separator();

        let available_height = ui.available_height();

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(36.0))
            .column(Column::initial(90.0).at_least(60.0))
            .column(Column::initial(320.0).at_least(150.0))
            .column(Column::remainder().at_least(120.0))
            .column(Column::exact(60.0))
            .max_scroll_height(available_height)
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for name in Table::HEADERS {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
                header.col(|_ui| {});
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.rows.len(), |mut row| {
                    let index = row.index();

                    row.col(|ui| {
                        ui.weak((index + 1).to_string());
                    });

                    for column in 0..Table::HEADERS.len() {
                        row.col(|ui| {
                            if let Some(value) = table.rows[index].field_mut(column) {
                                let response = ui.add(
                                    egui::TextEdit::singleline(value)
                                        .desired_width(f32::INFINITY),
                                );
                                if response.changed() {
                                    changed = true;
                                }
                            }
                        });
                    }

                    row.col(|ui| {
                        if ui.small_button("+").on_hover_text("Insert blank row above").clicked() {
                            self.pending_insert = Some(index);
                        }
                        if ui.small_button("✕").on_hover_text("Remove row").clicked() {
                            self.pending_remove = Some(index);
                        }
                    });
                });
            });

        if let Some(index) = self.pending_insert.take() {
            table.insert_blank(index);
            changed = true;
        }
        if let Some(index) = self.pending_remove.take() {
            changed |= table.remove(index).is_some();
        }

        changed
    }
}
