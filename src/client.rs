use std::io::Write;

use lsp_types::notification::{LogMessage, PublishDiagnostics, ShowMessage};

use crate::prelude::*;

/// Editor-facing half of the JSON-RPC connection. Owns the write side of
/// stdout; responses and notifications go out with `Content-Length` framing.
#[derive(Clone)]
pub(crate) struct Client {
    stdout: Rc<RefCell<dyn Write>>,
}

impl Client {
    pub(crate) fn new(stdout: Rc<RefCell<dyn Write>>) -> Self {
        Self { stdout }
    }

    fn write_message(&self, payload: &Value) -> Result<()> {
        let text = serde_json::to_string(payload)?;
        let mut w = self.stdout.borrow_mut();
        write!(w, "Content-Length: {}\r\n\r\n{}", text.len(), text)?;
        Ok(w.flush()?)
    }

    pub(crate) fn write_response<T: Serialize>(&self, id: Option<Value>, result: T) -> Result<()> {
        let Some(id) = id else {
            return Err(Error::new(format!(
                "missing id for response ({})",
                std::any::type_name::<T>()
            )));
        };
        self.write_message(&json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": result,
        }))
    }

    pub(crate) fn send_notification<N: Notification>(&self, params: N::Params) -> Result<()> {
        self.write_message(&json!({
            "jsonrpc": "2.0",
            "method": N::METHOD,
            "params": serde_json::to_value(params)?,
        }))
    }

    pub(crate) fn log_message(&self, typ: MessageType, message: impl Into<String>) {
        if let Err(error) = self.send_notification::<LogMessage>(LogMessageParams {
            typ,
            message: message.into(),
        }) {
            log::warn!("failed to send window/logMessage: {error}");
        }
    }

    /// Interrupts the user; reserved for actionable problems.
    pub(crate) fn show_message(&self, typ: MessageType, message: impl Into<String>) {
        if let Err(error) = self.send_notification::<ShowMessage>(ShowMessageParams {
            typ,
            message: message.into(),
        }) {
            log::warn!("failed to send window/showMessage: {error}");
        }
    }

    pub(crate) fn publish_diagnostics(
        &self,
        uri: Uri,
        diagnostics: Vec<Diagnostic>,
        version: Option<i32>,
    ) {
        if let Err(error) = self.send_notification::<PublishDiagnostics>(PublishDiagnosticsParams {
            uri,
            diagnostics,
            version,
        }) {
            log::warn!("failed to publish diagnostics: {error}");
        }
    }
}
