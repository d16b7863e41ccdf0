use egui_extras::{Column, TableBuilder};

use crate::data::dataset::TabularDataset;
use crate::state::theme::Theme;

/// The grid on screen: a copy of the headers and rows last rendered.
#[derive(Debug, Default)]
pub struct TableView {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableView {
    /// Replace everything displayed with `dataset`, in its column and row order.
    pub fn render(&mut self, dataset: &TabularDataset) {
        self.clear();
        self.headers.extend_from_slice(dataset.columns());
        self.rows.extend(dataset.rows().iter().cloned());
    }

    pub fn clear(&mut self) {
        self.headers.clear();
        self.rows.clear();
    }

    #[cfg(test)]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_blank(&self) -> bool {
        self.headers.is_empty()
    }

    /// Column name for a header index, `None` if the index hits no header.
    pub fn resolve_header(&self, index: usize) -> Option<&str> {
        self.headers.get(index).map(String::as_str)
    }

    /// Draw the grid. Returns the column whose header was clicked this frame.
    pub fn show(&self, ui: &mut egui::Ui, selected: Option<&str>, theme: &Theme) -> Option<String> {
        if self.is_blank() {
            return None;
        }

        let clicked_col: std::cell::Cell<Option<usize>> = std::cell::Cell::new(None);
        let max_height = ui.available_height();

        egui::ScrollArea::horizontal()
            .id_salt("data_table_hscroll")
            .show(ui, |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .columns(Column::auto().at_least(80.0).clip(true), self.headers.len())
                    .min_scrolled_height(0.0)
                    .max_scroll_height(max_height)
                    .header(22.0, |mut header| {
                        for (idx, name) in self.headers.iter().enumerate() {
                            header.col(|ui| {
                                let is_selected = selected == Some(name.as_str());
                                let mut text = egui::RichText::new(name).strong();
                                if is_selected {
                                    text = text.color(theme.selected_header());
                                }
                                if ui.selectable_label(is_selected, text).clicked() {
                                    clicked_col.set(Some(idx));
                                }
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(18.0, self.rows.len(), |mut row| {
                            let cells = &self.rows[row.index()];
                            for cell in cells {
                                row.col(|ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    });
            });

        clicked_col
            .get()
            .and_then(|idx| self.resolve_header(idx))
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader;
    use crate::processing::filter;
    use pretty_assertions::assert_eq;

    fn dataset() -> TabularDataset {
        loader::parse("a;b;c\n7;1;x\n2;3;y\n9;7;z\n", b';').unwrap()
    }

    #[test]
    fn render_matches_dataset_order() {
        let mut view = TableView::default();
        view.render(&dataset());
        assert_eq!(view.headers(), &["a", "b", "c"]);
        assert_eq!(view.rows()[2], vec!["9".to_string(), "7".into(), "z".into()]);
    }

    #[test]
    fn render_replaces_previous_rows() {
        let mut view = TableView::default();
        view.render(&dataset());
        view.render(&loader::parse("q\n1\n", b';').unwrap());
        assert_eq!(view.headers(), &["q"]);
        assert_eq!(view.rows(), &[vec!["1".to_string()]]);
    }

    #[test]
    fn header_index_outside_columns_resolves_to_nothing() {
        let mut view = TableView::default();
        view.render(&dataset());
        assert_eq!(view.resolve_header(1), Some("b"));
        assert_eq!(view.resolve_header(3), None);
    }

    #[test]
    fn filter_then_reset_renders_like_fresh_load() {
        let original = dataset();
        let mut fresh = TableView::default();
        fresh.render(&original);

        for query in ["7", "y", "nothing"] {
            let mut view = TableView::default();
            let filtered = filter::apply(&original, query);
            view.render(&filtered);
            if query == "7" {
                assert_eq!(view.rows().len(), 2);
            }

            view.render(&filter::reset(&original));
            assert_eq!(view.rows(), fresh.rows());
            assert_eq!(view.headers(), fresh.headers());
        }
    }
}
