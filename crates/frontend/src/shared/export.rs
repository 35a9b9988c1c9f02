//! Экспорт строк отчёта в книгу Excel

use contracts::reports::ReportRow;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use serde_json::Value;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Заголовки: объединение ключей всех строк в порядке первого появления
pub fn collect_headers(rows: &[ReportRow]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}

pub const SHEET_NAME: &str = "Reporte";

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Записывает значение как есть: числа числами, null и отсутствующие пропускаются
fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: Option<&Value>) -> Result<(), XlsxError> {
    match value {
        None | Some(Value::Null) => {}
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => {
                sheet.write_number(row, col, f)?;
            }
            None => {
                sheet.write_string(row, col, n.to_string())?;
            }
        },
        Some(Value::Bool(b)) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Some(Value::String(s)) => {
            sheet.write_string(row, col, s.as_str())?;
        }
        Some(other) => {
            sheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

/// Собирает книгу .xlsx с одним листом "Reporte": заголовки в первой строке
pub fn build_workbook(rows: &[ReportRow]) -> Result<Vec<u8>, String> {
    if rows.is_empty() {
        return Err("No hay datos para exportar.".to_string());
    }

    let headers = collect_headers(rows);
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(SHEET_NAME)
        .map_err(|e| format!("Failed to name sheet: {}", e))?;

    let write = |sheet: &mut Worksheet| -> Result<(), XlsxError> {
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, header.as_str())?;
        }
        for (i, row) in rows.iter().enumerate() {
            for (col, header) in headers.iter().enumerate() {
                write_cell(sheet, i as u32 + 1, col as u16, row.get(header))?;
            }
        }
        Ok(())
    };
    write(sheet).map_err(|e| format!("Failed to write sheet: {}", e))?;

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Failed to build workbook: {}", e))
}

/// Экспортирует строки в .xlsx и инициирует скачивание
pub fn export_rows_to_excel(rows: &[ReportRow], filename: &str) -> Result<(), String> {
    let bytes = build_workbook(rows)?;
    let blob = create_xlsx_blob(&bytes)?;
    download_blob(&blob, filename)?;
    log::info!("Exported {} rows to {}", rows.len(), filename);
    Ok(())
}

pub fn export_filename(prefix: &str, date_iso: &str) -> String {
    format!("{}_{}.xlsx", prefix, date_iso)
}

/// Создает Blob объект с содержимым книги
fn create_xlsx_blob(bytes: &[u8]) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));

    let properties = BlobPropertyBag::new();
    properties.set_type(XLSX_MIME);

    Blob::new_with_u8_array_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Инициирует скачивание Blob через браузер
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    let body = document.body().ok_or("No body element")?;
    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;

    anchor.click();

    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
    use serde_json::json;
    use std::io::Cursor;

    fn rows() -> Vec<ReportRow> {
        let a = json!({"Pre_Venta": "PV-1", "Producto": "Jarabe; 120ml", "Cantidad": 2});
        let b = json!({"Pre_Venta": "PV-2", "Producto": "Crema \"A\"", "Lote": null, "Cantidad": 1.5, "Activo": true});
        vec![
            a.as_object().unwrap().clone(),
            b.as_object().unwrap().clone(),
        ]
    }

    #[test]
    fn test_headers_are_union_in_first_seen_order() {
        assert_eq!(
            collect_headers(&rows()),
            vec!["Pre_Venta", "Producto", "Cantidad", "Lote", "Activo"]
        );
    }

    #[test]
    fn test_workbook_has_report_sheet_with_raw_values() {
        let bytes = build_workbook(&rows()).unwrap();
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.get_size(), (3, 5));
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("Pre_Venta".to_string())));
        assert_eq!(range.get_value((0, 4)), Some(&Data::String("Activo".to_string())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::String("Jarabe; 120ml".to_string())));
        assert_eq!(range.get_value((1, 2)), Some(&Data::Float(2.0)));
        assert_eq!(range.get_value((2, 2)), Some(&Data::Float(1.5)));
        assert_eq!(range.get_value((2, 4)), Some(&Data::Bool(true)));
        // null и отсутствующие значения остаются пустыми
        assert_eq!(range.get_value((1, 3)), Some(&Data::Empty));
        assert_eq!(range.get_value((2, 3)), Some(&Data::Empty));
    }

    #[test]
    fn test_build_workbook_refuses_empty() {
        assert_eq!(build_workbook(&[]), Err("No hay datos para exportar.".to_string()));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename("Reporte_Farmacia", "2024-03-15"),
            "Reporte_Farmacia_2024-03-15.xlsx"
        );
    }
}
