//! Minimal XLSX reading: first worksheet only, whole cell grid, no header
//! semantics. Cell styles and number formats are ignored; date cells arrive
//! as 1900-epoch serial numbers and are resolved later by coercion.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use tidysheet_model::{CellValue, RawTable};
use tracing::debug;
use zip::ZipArchive;

use crate::error::{IngestError, Result};

type Archive = ZipArchive<BufReader<File>>;

/// Reads the first worksheet of an XLSX file into a raw table.
pub fn read_xlsx(path: &Path) -> Result<RawTable> {
    let mut archive = open_archive(path)?;
    let sheet_target = first_sheet_target(&mut archive, path)?;
    let shared = match entry_string(&mut archive, "xl/sharedStrings.xml", path)? {
        Some(xml) => parse_shared_strings(&xml, path)?,
        None => Vec::new(),
    };
    let sheet_xml = entry_string(&mut archive, &sheet_target, path)?
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?;
    let table = parse_sheet(&sheet_xml, &shared, path)?;
    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        sheet = %sheet_target,
        path = %path.display(),
        "read xlsx"
    );
    Ok(table)
}

fn open_archive(path: &Path) -> Result<Archive> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ZipArchive::new(BufReader::new(file)).map_err(|source| IngestError::Zip {
        path: path.to_path_buf(),
        source,
    })
}

fn entry_string(archive: &mut Archive, name: &str, path: &Path) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(source) => {
            return Err(IngestError::Zip {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(content))
}

fn xml_reader(xml: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let config = reader.config_mut();
    config.check_comments = false;
    config.check_end_names = false;
    config.expand_empty_elements = true;
    reader
}

fn xml_error(path: &Path, source: impl Into<quick_xml::Error>) -> IngestError {
    IngestError::Xml {
        path: path.to_path_buf(),
        source: source.into(),
    }
}

fn attribute(event: &BytesStart<'_>, name: &str, path: &Path) -> Result<Option<String>> {
    let attr = event
        .try_get_attribute(name)
        .map_err(|source| xml_error(path, source))?;
    match attr {
        Some(attr) => {
            let value = attr
                .unescape_value()
                .map_err(|source| xml_error(path, source))?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}

/// Resolves the zip path of the first worksheet via the workbook relationship
/// table. Falls back to the conventional `xl/worksheets/sheet1.xml` when the
/// relationship cannot be followed.
fn first_sheet_target(archive: &mut Archive, path: &Path) -> Result<String> {
    let workbook = entry_string(archive, "xl/workbook.xml", path)?
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?;

    let mut relationship_id = None;
    let mut reader = xml_reader(&workbook);
    loop {
        match reader.read_event().map_err(|e| xml_error(path, e))? {
            Event::Start(event) if event.local_name().as_ref() == b"sheet" => {
                relationship_id = attribute(&event, "r:id", path)?;
                break;
            }
            Event::Eof => break,
            _ => (),
        }
    }

    let fallback = "xl/worksheets/sheet1.xml".to_string();
    let Some(relationship_id) = relationship_id else {
        return Ok(fallback);
    };
    let Some(rels) = entry_string(archive, "xl/_rels/workbook.xml.rels", path)? else {
        return Ok(fallback);
    };

    let mut reader = xml_reader(&rels);
    loop {
        match reader.read_event().map_err(|e| xml_error(path, e))? {
            Event::Start(event) if event.local_name().as_ref() == b"Relationship" => {
                if attribute(&event, "Id", path)?.as_deref() == Some(relationship_id.as_str())
                    && let Some(target) = attribute(&event, "Target", path)?
                {
                    let target = target.trim_start_matches('/');
                    return Ok(if target.starts_with("xl/") {
                        target.to_string()
                    } else {
                        format!("xl/{target}")
                    });
                }
            }
            Event::Eof => break,
            _ => (),
        }
    }
    Ok(fallback)
}

/// Parses `xl/sharedStrings.xml` into the shared-string table. Rich-text runs
/// are concatenated; phonetic annotations are skipped.
fn parse_shared_strings(xml: &str, path: &Path) -> Result<Vec<String>> {
    let mut strings = Vec::new();
    let mut reader = xml_reader(xml);
    let mut in_item = false;
    let mut in_phonetic = false;
    let mut in_text = false;
    let mut current = String::new();
    loop {
        match reader.read_event().map_err(|e| xml_error(path, e))? {
            Event::Start(event) => match event.local_name().as_ref() {
                b"si" => {
                    in_item = true;
                    current.clear();
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_item && !in_phonetic => in_text = true,
                _ => (),
            },
            Event::End(event) => match event.local_name().as_ref() {
                b"si" => {
                    in_item = false;
                    strings.push(std::mem::take(&mut current));
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_text = false,
                _ => (),
            },
            Event::Text(event) if in_text => {
                current.push_str(&event.xml_content().map_err(|e| xml_error(path, e))?);
            }
            Event::GeneralRef(event) if in_text => {
                let raw = event.xml_content().map_err(|e| xml_error(path, e))?;
                if let Some(resolved) = resolve_reference(&raw) {
                    current.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => (),
        }
    }
    Ok(strings)
}

/// Converts the letter part of an A1-style reference to a zero-based column.
fn column_from_reference(reference: &str) -> Option<usize> {
    let letters: String = reference
        .chars()
        .take_while(|ch| ch.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return None;
    }
    let mut column = 0usize;
    for ch in letters.chars() {
        column = column * 26 + (ch.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    Some(column - 1)
}

/// Resolves a general entity reference: numeric character references plus
/// the predefined XML entities. Unknown entities are dropped.
fn resolve_reference(raw: &str) -> Option<String> {
    if let Some(number) = raw.strip_prefix('#') {
        let code = if let Some(hex) = number.strip_prefix('x') {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            number.parse::<u32>().ok()?
        };
        char::from_u32(code).map(String::from)
    } else {
        resolve_xml_entity(raw).map(str::to_string)
    }
}

fn finish_cell(cell_type: Option<&str>, raw: &str, shared: &[String]) -> CellValue {
    match cell_type {
        Some("s") => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|index| shared.get(index))
            .map_or(CellValue::Missing, |text| {
                if text.trim().is_empty() {
                    CellValue::Missing
                } else {
                    CellValue::Text(text.clone())
                }
            }),
        Some("e") => CellValue::Missing,
        Some("b") => CellValue::Text(if raw.trim() == "1" { "true" } else { "false" }.to_string()),
        Some("inlineStr") | Some("str") => {
            if raw.trim().is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(raw.to_string())
            }
        }
        _ => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                CellValue::Missing
            } else if let Ok(number) = trimmed.parse::<f64>() {
                CellValue::Number(number)
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
    }
}

/// Parses one worksheet XML into the raw cell grid. Skipped rows and cells
/// (sparse XML) are padded with missing values so positions match the sheet.
fn parse_sheet(xml: &str, shared: &[String], path: &Path) -> Result<RawTable> {
    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    let mut current: Vec<CellValue> = Vec::new();
    let mut in_row = false;
    let mut cell_type: Option<String> = None;
    let mut cell_column: Option<usize> = None;
    let mut collecting = false;
    let mut raw_value = String::new();
    let mut reader = xml_reader(xml);
    loop {
        match reader.read_event().map_err(|e| xml_error(path, e))? {
            Event::Start(event) => match event.local_name().as_ref() {
                b"row" => {
                    in_row = true;
                    current.clear();
                    // Pad skipped rows so indexes match the visual sheet.
                    if let Some(number) = attribute(&event, "r", path)?
                        .and_then(|value| value.parse::<usize>().ok())
                    {
                        while rows.len() + 1 < number {
                            rows.push(Vec::new());
                        }
                    }
                }
                b"c" if in_row => {
                    cell_type = attribute(&event, "t", path)?;
                    cell_column =
                        attribute(&event, "r", path)?.and_then(|r| column_from_reference(&r));
                    raw_value.clear();
                }
                b"v" | b"t" if in_row => collecting = true,
                _ => (),
            },
            Event::End(event) => match event.local_name().as_ref() {
                b"row" => {
                    in_row = false;
                    rows.push(std::mem::take(&mut current));
                }
                b"c" if in_row => {
                    let cell = finish_cell(cell_type.as_deref(), &raw_value, shared);
                    let column = cell_column.unwrap_or(current.len());
                    while current.len() < column {
                        current.push(CellValue::Missing);
                    }
                    current.push(cell);
                    cell_type = None;
                    cell_column = None;
                }
                b"v" | b"t" => collecting = false,
                _ => (),
            },
            Event::Text(event) if collecting => {
                raw_value.push_str(&event.xml_content().map_err(|e| xml_error(path, e))?);
            }
            Event::GeneralRef(event) if collecting => {
                let raw = event.xml_content().map_err(|e| xml_error(path, e))?;
                if let Some(resolved) = resolve_reference(&raw) {
                    raw_value.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => (),
        }
    }
    Ok(RawTable::new(rows))
}
