//! Structured error types for dashchart.

/// All errors that can occur while loading chart input or drawing a chart.
#[derive(Debug, thiserror::Error)]
pub enum DashchartError {
    /// Chart spec, config or style JSON could not be decoded.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The drawing surface rejected an operation.
    #[error("Render error: {0}")]
    Render(String),

    /// A prop value that names nothing the renderer knows, such as an
    /// unknown chart `type`.
    #[error("Invalid chart spec: {0}")]
    InvalidSpec(String),

    /// Reading or writing a chart file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DashchartError>;

#[cfg(target_arch = "wasm32")]
impl From<DashchartError> for wasm_bindgen::JsValue {
    fn from(e: DashchartError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for DashchartError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::InvalidSpec(e.to_string())
    }
}
