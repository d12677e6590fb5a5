use serde::{Deserialize, Serialize};
use tww_core::core_api::{CoreError, CoreErrorCode, Engine, ExportOptions, FieldValue};
use tww_core::layout::{FieldId, SLOT_COUNT};
use tww_render::{
    JsonStyle, TextRenderOptions, format_file_size, render_json_full,
    render_slot_sheet_with_options,
};
use wasm_bindgen::prelude::*;

const SAVE_EXTENSION: &str = ".sav";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebRenderOptions {
    pub json_output: bool,
    pub verbose: bool,
}

/// Edits submitted by the page, applied in order before export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebEditRequest {
    pub fix_checksum: bool,
    pub edits: Vec<WebFieldEdit>,
}

impl Default for WebEditRequest {
    fn default() -> Self {
        Self {
            fix_checksum: true,
            edits: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebFieldEdit {
    /// One-based, as shown in the page.
    pub slot: usize,
    pub field: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescription {
    pub name: String,
    pub size: u64,
    pub size_label: String,
}

#[derive(Debug, Clone)]
struct WebError {
    code: &'static str,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
struct WebErrorPayload {
    code: String,
    message: String,
}

impl WebError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn to_js_value(&self) -> JsValue {
        let payload = WebErrorPayload {
            code: self.code.to_string(),
            message: self.message.clone(),
        };
        serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| {
            JsValue::from_str(&format!("{}: {}", payload.code, payload.message))
        })
    }
}

impl From<CoreError> for WebError {
    fn from(err: CoreError) -> Self {
        let code = match err.code {
            CoreErrorCode::Format => "unsupported_file",
            CoreErrorCode::Range => "out_of_range",
            CoreErrorCode::Parse => "invalid_edit",
        };
        WebError::new(code, err.message)
    }
}

#[wasm_bindgen]
pub fn render_save_text(save_bytes: &[u8], options: JsValue) -> Result<String, JsValue> {
    let parsed_options: WebRenderOptions =
        parse_js_object(options, "web render options").map_err(|err| err.to_js_value())?;
    render_save_text_impl(save_bytes, &parsed_options).map_err(|err| err.to_js_value())
}

#[wasm_bindgen]
pub fn apply_save_edits(save_bytes: &[u8], request: JsValue) -> Result<Vec<u8>, JsValue> {
    let parsed_request: WebEditRequest =
        parse_js_object(request, "edit request").map_err(|err| err.to_js_value())?;
    apply_save_edits_impl(save_bytes, &parsed_request).map_err(|err| err.to_js_value())
}

#[wasm_bindgen]
pub fn describe_file(name: &str, size: f64) -> Result<JsValue, JsValue> {
    let description = describe_file_impl(name, size as u64).map_err(|err| err.to_js_value())?;
    serde_wasm_bindgen::to_value(&description).map_err(|err| {
        WebError::new(
            "render_failed",
            format!("failed to serialize file description: {err}"),
        )
        .to_js_value()
    })
}

fn render_save_text_impl(
    save_bytes: &[u8],
    options: &WebRenderOptions,
) -> Result<String, WebError> {
    if save_bytes.is_empty() {
        return Err(WebError::new(
            "unsupported_file",
            "The uploaded file is empty. Please provide a .sav file.",
        ));
    }

    let session = Engine::new().open_bytes(save_bytes)?;
    let slots = session.slots()?;

    if options.json_output {
        let value = render_json_full(&slots, JsonStyle::CanonicalV1);
        return serde_json::to_string_pretty(&value).map_err(|err| {
            WebError::new(
                "render_failed",
                format!("failed to serialize rendered JSON output: {err}"),
            )
        });
    }

    Ok(render_slot_sheet_with_options(
        &slots,
        TextRenderOptions {
            verbose: options.verbose,
        },
    ))
}

fn apply_save_edits_impl(
    save_bytes: &[u8],
    request: &WebEditRequest,
) -> Result<Vec<u8>, WebError> {
    let mut session = Engine::new().open_bytes(save_bytes)?;

    for edit in &request.edits {
        if edit.slot == 0 || edit.slot > SLOT_COUNT {
            return Err(WebError::new(
                "out_of_range",
                format!("Invalid slot {}. Expected 1..{SLOT_COUNT}", edit.slot),
            ));
        }
        let field: FieldId = edit.field.parse()?;
        session.set_field(edit.slot - 1, field, edit.value.clone())?;
    }

    Ok(session.export(ExportOptions {
        fix_checksums: request.fix_checksum,
    })?)
}

fn describe_file_impl(name: &str, size: u64) -> Result<FileDescription, WebError> {
    if !name.to_ascii_lowercase().ends_with(SAVE_EXTENSION) {
        return Err(WebError::new(
            "unsupported_file",
            format!("'{name}' is not a {SAVE_EXTENSION} file"),
        ));
    }
    Ok(FileDescription {
        name: name.to_string(),
        size,
        size_label: format_file_size(size),
    })
}

fn parse_js_object<T>(value: JsValue, what: &str) -> Result<T, WebError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if value.is_null() || value.is_undefined() {
        return Ok(T::default());
    }

    serde_wasm_bindgen::from_value(value).map_err(|err| {
        WebError::new("invalid_options", format!("Failed to parse {what}: {err}"))
    })
}
