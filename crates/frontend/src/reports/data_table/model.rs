//! Модель таблицы отчёта: колонки, фильтры, сортировка, группировка.
//!
//! Все функции чистые и работают с индексами в исходном срезе строк,
//! компонент `DataTable` только отображает результат.

use super::format::{column_header, format_cell, raw_text};
use crate::shared::config::TableConfig;
use contracts::reports::ReportRow;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Ключ группы (первая колонка)
    Group,
    /// Значение берётся из первой строки группы и показывается в строке группы
    Summary,
    /// Показывается в строках-деталях
    Detail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub key: String,
    pub header: String,
    pub role: ColumnRole,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableLayout {
    pub columns: Vec<ColumnSpec>,
}

impl TableLayout {
    pub fn group_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.role == ColumnRole::Group)
            .map(|c| c.key.as_str())
    }
}

/// Фильтры по колонкам: ключ колонки -> подстрока
pub type ColumnFilters = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayRow {
    Group {
        key: String,
        /// индекс первой строки группы (после сортировки)
        first: usize,
        len: usize,
        expanded: bool,
    },
    Leaf {
        index: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Empty,
    Text(String),
    GroupToggle {
        key: String,
        count: usize,
        expanded: bool,
    },
}

/// Колонки определяются по ключам первой строки
pub fn derive_layout(rows: &[ReportRow], cfg: &TableConfig) -> TableLayout {
    let Some(first) = rows.first() else {
        return TableLayout::default();
    };

    let grouped = first.contains_key(&cfg.group_column);
    let mut columns = Vec::with_capacity(first.len());

    if grouped {
        columns.push(ColumnSpec {
            key: cfg.group_column.clone(),
            header: cfg.group_header.clone(),
            role: ColumnRole::Group,
        });
    }

    for key in first.keys().filter(|k| **k != cfg.group_column) {
        let role = if grouped && cfg.summary_columns.iter().any(|c| c == key) {
            ColumnRole::Summary
        } else {
            ColumnRole::Detail
        };
        columns.push(ColumnSpec {
            key: key.clone(),
            header: column_header(key),
            role,
        });
    }

    TableLayout { columns }
}

/// Клик по заголовку: asc -> desc -> без сортировки
pub fn next_sort(current: Option<&SortState>, column: &str) -> Option<SortState> {
    match current {
        Some(s) if s.column == column => match s.direction {
            SortDirection::Asc => Some(SortState {
                column: column.to_string(),
                direction: SortDirection::Desc,
            }),
            SortDirection::Desc => None,
        },
        _ => Some(SortState {
            column: column.to_string(),
            direction: SortDirection::Asc,
        }),
    }
}

pub fn matches_filters(row: &ReportRow, filters: &ColumnFilters) -> bool {
    filters
        .iter()
        .filter(|(_, needle)| !needle.is_empty())
        .all(|(column, needle)| {
            raw_text(row.get(column))
                .map(|text| text.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false)
        })
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Порядок типов внутри колонки: числа, строки, логические, остальное
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        _ => 3,
    }
}

/// Полный порядок: сначала по типу, затем внутри типа
fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a)
            .cmp(&type_rank(b))
            .then_with(|| a.to_string().cmp(&b.to_string())),
    }
}

/// Сравнение строк по колонке; пустые значения всегда в конце
pub fn compare_rows(a: &ReportRow, b: &ReportRow, column: &str, direction: SortDirection) -> Ordering {
    match (present(a.get(column)), present(b.get(column))) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ord = compare_present(x, y);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

pub fn group_key(row: &ReportRow, column: &str) -> String {
    raw_text(row.get(column)).unwrap_or_else(|| "-".to_string())
}

/// Строки для отображения.
///
/// Фильтры применяются к строкам-деталям до группировки. Группы идут в
/// порядке первого появления; сортировка по колонке группы меняет порядок
/// групп, по любой другой колонке - порядок строк внутри группы.
pub fn build_display_rows(
    rows: &[ReportRow],
    layout: &TableLayout,
    filters: &ColumnFilters,
    sort: Option<&SortState>,
    expanded: &HashSet<String>,
) -> Vec<DisplayRow> {
    let by_sort = |a: &usize, b: &usize, s: &SortState| {
        compare_rows(&rows[*a], &rows[*b], &s.column, s.direction)
    };

    let mut leaves: Vec<usize> = (0..rows.len())
        .filter(|&i| matches_filters(&rows[i], filters))
        .collect();

    let Some(group_column) = layout.group_column() else {
        if let Some(s) = sort {
            leaves.sort_by(|a, b| by_sort(a, b, s));
        }
        return leaves.into_iter().map(|index| DisplayRow::Leaf { index }).collect();
    };

    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for index in leaves {
        let key = group_key(&rows[index], group_column);
        match positions.get(&key) {
            Some(&pos) => groups[pos].1.push(index),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![index]));
            }
        }
    }

    if let Some(s) = sort {
        if s.column == group_column {
            groups.sort_by(|(_, a), (_, b)| by_sort(&a[0], &b[0], s));
        } else {
            for (_, members) in groups.iter_mut() {
                members.sort_by(|a, b| by_sort(a, b, s));
            }
        }
    }

    let mut display = Vec::new();
    for (key, members) in groups {
        let is_expanded = expanded.contains(&key);
        display.push(DisplayRow::Group {
            key,
            first: members[0],
            len: members.len(),
            expanded: is_expanded,
        });
        if is_expanded {
            display.extend(members.into_iter().map(|index| DisplayRow::Leaf { index }));
        }
    }
    display
}

pub fn cell_content(row: &DisplayRow, column: &ColumnSpec, rows: &[ReportRow]) -> CellContent {
    match (row, column.role) {
        (DisplayRow::Group { key, len, expanded, .. }, ColumnRole::Group) => {
            CellContent::GroupToggle {
                key: key.clone(),
                count: *len,
                expanded: *expanded,
            }
        }
        (DisplayRow::Group { first, .. }, ColumnRole::Summary) => {
            CellContent::Text(format_cell(rows[*first].get(&column.key), &column.key))
        }
        (DisplayRow::Leaf { index }, ColumnRole::Detail) => {
            CellContent::Text(format_cell(rows[*index].get(&column.key), &column.key))
        }
        _ => CellContent::Empty,
    }
}

pub fn toggle_expanded(expanded: &mut HashSet<String>, key: &str) {
    if !expanded.remove(key) {
        expanded.insert(key.to_string());
    }
}

/// Состояние просмотра таблицы: сортировка, фильтры, раскрытые группы
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableViewState {
    pub sort: Option<SortState>,
    pub filters: ColumnFilters,
    pub expanded: HashSet<String>,
}

impl TableViewState {
    pub fn cycle_sort(&mut self, column: &str) {
        self.sort = next_sort(self.sort.as_ref(), column);
    }

    /// Пустое значение снимает фильтр колонки
    pub fn set_filter(&mut self, column: String, value: String) {
        if value.is_empty() {
            self.filters.remove(&column);
        } else {
            self.filters.insert(column, value);
        }
    }

    pub fn toggle_group(&mut self, key: &str) {
        toggle_expanded(&mut self.expanded, key);
    }

    /// Пришли новые строки: все группы свёрнуты, сортировка и фильтры остаются
    pub fn rows_replaced(&mut self) {
        self.expanded.clear();
    }

    pub fn filter_value(&self, column: &str) -> String {
        self.filters.get(column).cloned().unwrap_or_default()
    }

    pub fn display_rows(&self, rows: &[ReportRow], layout: &TableLayout) -> Vec<DisplayRow> {
        build_display_rows(rows, layout, &self.filters, self.sort.as_ref(), &self.expanded)
    }
}

/// "(1 producto)" / "(3 productos)"
pub fn products_label(count: usize) -> String {
    format!("({} producto{})", count, if count != 1 { "s" } else { "" })
}

pub fn row_count_label(visible: usize, total: usize) -> String {
    format!(
        "Mostrando {} fila{} (Total: {} productos)",
        visible,
        if visible != 1 { "s" } else { "" },
        total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::AppConfig;
    use serde_json::json;

    fn table_config() -> TableConfig {
        AppConfig::embedded().unwrap().table
    }

    fn row(value: Value) -> ReportRow {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn preventas() -> Vec<ReportRow> {
        vec![
            row(json!({"Pre_Venta": "PV-002", "Estado": "Pendiente", "Fecha": "2024-03-15T10:00:00", "Producto": "Paracetamol 500mg", "Cantidad": 2})),
            row(json!({"Pre_Venta": "PV-001", "Estado": "Atendido", "Fecha": "2024-03-14T09:15:00", "Producto": "Amoxicilina 250mg", "Cantidad": 10})),
            row(json!({"Pre_Venta": "PV-002", "Estado": "Pendiente", "Fecha": "2024-03-15T10:00:00", "Producto": "Ibuprofeno 400mg", "Cantidad": 1})),
            row(json!({"Pre_Venta": "PV-003", "Estado": null, "Fecha": "2024-03-16T18:30:00", "Producto": "Omeprazol 20mg", "Cantidad": 5})),
        ]
    }

    fn saldos() -> Vec<ReportRow> {
        vec![
            row(json!({"Codigo": "03245", "Medicamento": "Paracetamol", "Saldo": 120})),
            row(json!({"Codigo": "01110", "Medicamento": "amoxicilina", "Saldo": null})),
            row(json!({"Codigo": "00077", "Medicamento": "Ibuprofeno", "Saldo": 8})),
        ]
    }

    fn leaf_indexes(display: &[DisplayRow]) -> Vec<usize> {
        display
            .iter()
            .filter_map(|r| match r {
                DisplayRow::Leaf { index } => Some(*index),
                _ => None,
            })
            .collect()
    }

    fn group_keys(display: &[DisplayRow]) -> Vec<&str> {
        display
            .iter()
            .filter_map(|r| match r {
                DisplayRow::Group { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_layout_with_group_column() {
        let layout = derive_layout(&preventas(), &table_config());
        let keys: Vec<_> = layout.columns.iter().map(|c| (c.key.as_str(), c.role)).collect();
        assert_eq!(
            keys,
            vec![
                ("Pre_Venta", ColumnRole::Group),
                ("Estado", ColumnRole::Summary),
                ("Fecha", ColumnRole::Summary),
                ("Producto", ColumnRole::Detail),
                ("Cantidad", ColumnRole::Detail),
            ]
        );
        assert_eq!(layout.columns[0].header, "Pre-Venta");
        assert_eq!(layout.columns[3].header, "PRODUCTO");
        assert_eq!(layout.group_column(), Some("Pre_Venta"));
    }

    #[test]
    fn test_layout_without_group_column_is_flat() {
        let layout = derive_layout(&saldos(), &table_config());
        assert!(layout.group_column().is_none());
        assert!(layout.columns.iter().all(|c| c.role == ColumnRole::Detail));
        assert_eq!(layout.columns.len(), 3);
    }

    #[test]
    fn test_layout_uses_first_row_only() {
        let mut rows = saldos();
        rows[1].insert("Lote".to_string(), json!("L-1"));
        let layout = derive_layout(&rows, &table_config());
        assert!(layout.columns.iter().all(|c| c.key != "Lote"));
        assert_eq!(derive_layout(&[], &table_config()), TableLayout::default());
    }

    #[test]
    fn test_next_sort_cycles() {
        let asc = next_sort(None, "Saldo").unwrap();
        assert_eq!(asc.direction, SortDirection::Asc);
        let desc = next_sort(Some(&asc), "Saldo").unwrap();
        assert_eq!(desc.direction, SortDirection::Desc);
        assert_eq!(next_sort(Some(&desc), "Saldo"), None);
        let other = next_sort(Some(&desc), "Codigo").unwrap();
        assert_eq!((other.column.as_str(), other.direction), ("Codigo", SortDirection::Asc));
    }

    #[test]
    fn test_filters_are_case_insensitive_and_combined() {
        let rows = saldos();
        let mut filters = ColumnFilters::new();
        filters.insert("Medicamento".to_string(), "AMOX".to_string());
        assert!(!matches_filters(&rows[0], &filters));
        assert!(matches_filters(&rows[1], &filters));

        filters.insert("Saldo".to_string(), "1".to_string());
        // null не совпадает ни с каким непустым фильтром
        assert!(!matches_filters(&rows[1], &filters));

        filters.insert("Medicamento".to_string(), String::new());
        assert!(matches_filters(&rows[0], &filters));
    }

    #[test]
    fn test_flat_sort_puts_nulls_last() {
        let rows = saldos();
        let layout = derive_layout(&rows, &table_config());
        let asc = SortState { column: "Saldo".to_string(), direction: SortDirection::Asc };
        let display = build_display_rows(&rows, &layout, &ColumnFilters::new(), Some(&asc), &HashSet::new());
        assert_eq!(leaf_indexes(&display), vec![2, 0, 1]);

        let desc = SortState { column: "Saldo".to_string(), direction: SortDirection::Desc };
        let display = build_display_rows(&rows, &layout, &ColumnFilters::new(), Some(&desc), &HashSet::new());
        assert_eq!(leaf_indexes(&display), vec![0, 2, 1]);
    }

    #[test]
    fn test_sort_mixed_types_in_one_column() {
        let rows: Vec<ReportRow> = (0..200)
            .map(|i| {
                let codigo = match i % 3 {
                    0 => json!(i),
                    1 => json!(i.to_string()),
                    _ => json!(format!("x{}", i)),
                };
                row(json!({"Codigo": codigo, "Saldo": i}))
            })
            .collect();
        let layout = derive_layout(&rows, &table_config());

        let asc = SortState { column: "Codigo".to_string(), direction: SortDirection::Asc };
        let display = build_display_rows(&rows, &layout, &ColumnFilters::new(), Some(&asc), &HashSet::new());
        let order = leaf_indexes(&display);
        assert_eq!(order.len(), 200);
        // числа идут перед строками, по возрастанию
        assert_eq!(&order[..3], &[0, 3, 6]);
        assert!(order[..67].iter().all(|i| rows[*i]["Codigo"].is_number()));
        assert!(order[67..].iter().all(|i| rows[*i]["Codigo"].is_string()));

        let desc = SortState { column: "Codigo".to_string(), direction: SortDirection::Desc };
        let display = build_display_rows(&rows, &layout, &ColumnFilters::new(), Some(&desc), &HashSet::new());
        let mut reversed = leaf_indexes(&display);
        reversed.reverse();
        assert_eq!(reversed, order);
    }

    #[test]
    fn test_text_sort_ignores_case() {
        let rows = saldos();
        let layout = derive_layout(&rows, &table_config());
        let asc = SortState { column: "Medicamento".to_string(), direction: SortDirection::Asc };
        let display = build_display_rows(&rows, &layout, &ColumnFilters::new(), Some(&asc), &HashSet::new());
        assert_eq!(leaf_indexes(&display), vec![1, 2, 0]);
    }

    #[test]
    fn test_groups_keep_first_appearance_and_collapse() {
        let rows = preventas();
        let layout = derive_layout(&rows, &table_config());
        let display = build_display_rows(&rows, &layout, &ColumnFilters::new(), None, &HashSet::new());
        assert_eq!(group_keys(&display), vec!["PV-002", "PV-001", "PV-003"]);
        assert!(leaf_indexes(&display).is_empty());
        assert_eq!(
            display[0],
            DisplayRow::Group { key: "PV-002".to_string(), first: 0, len: 2, expanded: false }
        );
    }

    #[test]
    fn test_expanded_group_lists_its_rows() {
        let rows = preventas();
        let layout = derive_layout(&rows, &table_config());
        let mut expanded = HashSet::new();
        toggle_expanded(&mut expanded, "PV-002");
        let display = build_display_rows(&rows, &layout, &ColumnFilters::new(), None, &expanded);
        assert_eq!(display.len(), 5);
        assert_eq!(display[1], DisplayRow::Leaf { index: 0 });
        assert_eq!(display[2], DisplayRow::Leaf { index: 2 });

        toggle_expanded(&mut expanded, "PV-002");
        assert!(expanded.is_empty());
    }

    #[test]
    fn test_sort_by_group_column_orders_groups() {
        let rows = preventas();
        let layout = derive_layout(&rows, &table_config());
        let sort = SortState { column: "Pre_Venta".to_string(), direction: SortDirection::Asc };
        let display = build_display_rows(&rows, &layout, &ColumnFilters::new(), Some(&sort), &HashSet::new());
        assert_eq!(group_keys(&display), vec!["PV-001", "PV-002", "PV-003"]);
    }

    #[test]
    fn test_sort_by_detail_column_orders_within_group() {
        let rows = preventas();
        let layout = derive_layout(&rows, &table_config());
        let expanded: HashSet<String> = ["PV-002".to_string()].into_iter().collect();
        let sort = SortState { column: "Cantidad".to_string(), direction: SortDirection::Asc };
        let display = build_display_rows(&rows, &layout, &ColumnFilters::new(), Some(&sort), &expanded);
        assert_eq!(group_keys(&display), vec!["PV-002", "PV-001", "PV-003"]);
        assert_eq!(leaf_indexes(&display), vec![2, 0]);
        assert_eq!(
            display[0],
            DisplayRow::Group { key: "PV-002".to_string(), first: 2, len: 2, expanded: true }
        );
    }

    #[test]
    fn test_filter_drops_empty_groups() {
        let rows = preventas();
        let layout = derive_layout(&rows, &table_config());
        let mut filters = ColumnFilters::new();
        filters.insert("Producto".to_string(), "ibupro".to_string());
        let display = build_display_rows(&rows, &layout, &filters, None, &HashSet::new());
        assert_eq!(group_keys(&display), vec!["PV-002"]);

        let mut filters = ColumnFilters::new();
        filters.insert("Pre_Venta".to_string(), "pv-00".to_string());
        let display = build_display_rows(&rows, &layout, &filters, None, &HashSet::new());
        assert_eq!(group_keys(&display).len(), 3);
    }

    #[test]
    fn test_cell_content_by_role() {
        let rows = preventas();
        let layout = derive_layout(&rows, &table_config());
        let group = DisplayRow::Group { key: "PV-002".to_string(), first: 0, len: 2, expanded: true };
        let leaf = DisplayRow::Leaf { index: 2 };
        let [pre_venta, estado, fecha, producto, cantidad] = &layout.columns[..] else {
            panic!("unexpected layout: {:?}", layout);
        };

        assert_eq!(
            cell_content(&group, pre_venta, &rows),
            CellContent::GroupToggle { key: "PV-002".to_string(), count: 2, expanded: true }
        );
        assert_eq!(cell_content(&group, estado, &rows), CellContent::Text("Pendiente".to_string()));
        assert_eq!(
            cell_content(&group, fecha, &rows),
            CellContent::Text("15 mar 2024, 10:00 a. m.".to_string())
        );
        assert_eq!(cell_content(&group, producto, &rows), CellContent::Empty);

        assert_eq!(cell_content(&leaf, pre_venta, &rows), CellContent::Empty);
        assert_eq!(cell_content(&leaf, estado, &rows), CellContent::Empty);
        assert_eq!(
            cell_content(&leaf, producto, &rows),
            CellContent::Text("Ibuprofeno 400mg".to_string())
        );
        assert_eq!(cell_content(&leaf, cantidad, &rows), CellContent::Text("1,00".to_string()));
    }

    #[test]
    fn test_new_rows_collapse_groups_but_keep_sort_and_filters() {
        let rows = preventas();
        let layout = derive_layout(&rows, &table_config());
        let mut state = TableViewState::default();
        state.cycle_sort("Cantidad");
        state.set_filter("Producto".to_string(), "mg".to_string());
        state.toggle_group("PV-002");
        assert_eq!(state.display_rows(&rows, &layout).len(), 5);

        state.rows_replaced();
        assert!(state.expanded.is_empty());
        assert_eq!(state.sort.as_ref().map(|s| s.column.as_str()), Some("Cantidad"));
        assert_eq!(state.filter_value("Producto"), "mg");
        let display = state.display_rows(&rows, &layout);
        assert_eq!(group_keys(&display), vec!["PV-002", "PV-001", "PV-003"]);
        assert!(leaf_indexes(&display).is_empty());
    }

    #[test]
    fn test_empty_filter_value_removes_filter() {
        let mut state = TableViewState::default();
        state.set_filter("Producto".to_string(), "para".to_string());
        state.set_filter("Producto".to_string(), String::new());
        assert!(state.filters.is_empty());
        assert_eq!(state.filter_value("Producto"), "");
    }

    #[test]
    fn test_labels() {
        assert_eq!(products_label(1), "(1 producto)");
        assert_eq!(products_label(4), "(4 productos)");
        assert_eq!(row_count_label(1, 4), "Mostrando 1 fila (Total: 4 productos)");
        assert_eq!(row_count_label(3, 4), "Mostrando 3 filas (Total: 4 productos)");
    }
}
