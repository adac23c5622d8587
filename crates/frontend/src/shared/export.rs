/// Универсальный модуль для экспорта данных в CSV формат
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Имя файла по умолчанию (без расширения)
pub const DEFAULT_CSV_FILENAME: &str = "new_csv_file";

/// Ошибки экспорта
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("No data to export")]
    NoData,

    #[error("Browser error: {0}")]
    Browser(String),
}

/// Trait для типов, которые могут быть экспортированы в CSV
pub trait CsvExportable {
    /// Возвращает массив заголовков колонок
    fn headers() -> Vec<&'static str>;

    /// Преобразует объект в массив значений для CSV
    fn to_csv_row(&self) -> Vec<String>;
}

/// Собирает CSV: UTF-8 BOM, заголовки через запятую, ячейки строк в двойных кавычках
pub fn build_csv<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>]) -> String {
    let mut csv_content = String::new();

    // UTF-8 BOM для корректного отображения кириллицы в Excel
    csv_content.push('\u{FEFF}');

    let header_line: Vec<&str> = headers.iter().map(AsRef::as_ref).collect();
    csv_content.push_str(&header_line.join(","));
    csv_content.push('\n');

    for row in rows {
        let quoted: Vec<String> = row.iter().map(|cell| quote_csv_cell(cell)).collect();
        csv_content.push_str(&quoted.join(","));
        csv_content.push('\n');
    }

    csv_content
}

/// Оборачивает ячейку в кавычки, удваивая кавычки внутри значения
fn quote_csv_cell(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

/// Имя скачиваемого файла с расширением
pub fn csv_filename(filename: &str) -> String {
    let name = filename.trim();
    let name = if name.is_empty() { DEFAULT_CSV_FILENAME } else { name };
    format!("{}.csv", name)
}

/// Создаёт CSV и инициирует скачивание файла `<filename>.csv`
pub fn create_and_download_csv<H: AsRef<str>>(
    headers: &[H],
    rows: &[Vec<String>],
    filename: &str,
) -> Result<(), ExportError> {
    let csv_content = build_csv(headers, rows);
    let blob = create_csv_blob(&csv_content)?;
    download_blob(&blob, &csv_filename(filename))
}

/// Экспортирует список данных в CSV файл и инициирует скачивание
pub fn export_to_csv<T: CsvExportable>(data: &[T], filename: &str) -> Result<(), ExportError> {
    if data.is_empty() {
        return Err(ExportError::NoData);
    }

    let rows: Vec<Vec<String>> = data.iter().map(CsvExportable::to_csv_row).collect();
    let headers = T::headers();
    log::info!("Exporting {} rows to {}", rows.len(), csv_filename(filename));
    create_and_download_csv(headers.as_slice(), &rows, filename)
}

/// Создает Blob объект с CSV данными
fn create_csv_blob(content: &str) -> Result<Blob, ExportError> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| ExportError::Browser(format!("Failed to create blob: {:?}", e)))
}

/// Инициирует скачивание Blob через браузер
fn download_blob(blob: &Blob, filename: &str) -> Result<(), ExportError> {
    let browser = |msg: &str| ExportError::Browser(msg.to_string());

    let window = web_sys::window().ok_or_else(|| browser("No window object"))?;
    let document = window.document().ok_or_else(|| browser("No document object"))?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| browser(&format!("Failed to create object URL: {:?}", e)))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| browser(&format!("Failed to create anchor: {:?}", e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| browser(&format!("Failed to cast to anchor: {:?}", e)))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    Url::revoke_object_url(&url)
        .map_err(|e| browser(&format!("Failed to revoke URL: {:?}", e)))?;

    Ok(())
}
