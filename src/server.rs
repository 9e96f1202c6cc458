use std::io::{BufRead, Read};

use lsp_types::request::*;

use crate::prelude::*;

/// Read one `Content-Length`-framed JSON-RPC message. `None` on a clean
/// EOF.
fn read_message(reader: &mut impl BufRead) -> Result<Option<Value>> {
    let mut content_length: Option<usize> = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Content-Length:") {
            content_length = Some(value.trim().parse()?);
        }
    }
    let content_length = content_length.ok_or("message without Content-Length header")?;
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;
    Ok(Some(serde_json::from_slice(&body)?))
}

fn params_of<P: DeserializeOwned>(message: &Value) -> Result<P> {
    Ok(serde_json::from_value(
        message.get("params").cloned().unwrap_or(Value::Null),
    )?)
}

/// Answer a request, downgrading a handler failure to a logged null result
/// so one bad request does not take the session down.
fn respond<T: Serialize>(
    client: &Client,
    method: &str,
    id: Option<Value>,
    result: Result<T>,
) -> Result<()> {
    match result {
        Ok(value) => client.write_response(id, value),
        Err(error) => {
            log::error!("{method} failed: {error}");
            client.write_response(id, Value::Null)
        }
    }
}

pub(crate) fn run_server<F, T>(f: F) -> Result<()>
where
    F: FnOnce(Client) -> T,
    T: LanguageServer,
{
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let stdout = Rc::new(RefCell::new(std::io::stdout()));
    let client = Client::new(stdout);
    let mut backend = f(client.clone());
    log::info!("server is running");
    while let Some(message) = read_message(&mut reader)? {
        let Some(method) = message.get("method").and_then(|m| m.as_str()) else {
            // A response to something we sent; nothing outstanding expects
            // one.
            continue;
        };
        let id = message.get("id").cloned();
        match method {
            Initialize::METHOD => {
                let result = params_of(&message).and_then(|params| backend.initialize(params));
                respond(&client, method, id, result)?;
            }
            Shutdown::METHOD => {
                backend.shutdown().ok_or_log("shutdown failed");
                client.write_response(id, Value::Null)?;
            }
            Completion::METHOD => {
                let result = params_of(&message).and_then(|params| backend.completion(params));
                respond(&client, method, id, result)?;
            }
            HoverRequest::METHOD => {
                let result = params_of(&message).and_then(|params| backend.hover(params));
                respond(&client, method, id, result)?;
            }
            GotoDefinition::METHOD => {
                let result = params_of(&message).and_then(|params| backend.goto_definition(params));
                respond(&client, method, id, result)?;
            }
            CodeActionRequest::METHOD => {
                let result = params_of(&message).and_then(|params| backend.code_action(params));
                respond(&client, method, id, result)?;
            }
            ExecuteCommand::METHOD => {
                let result = params_of(&message).and_then(|params| backend.execute_command(params));
                respond(&client, method, id, result)?;
            }
            Initialized::METHOD => {
                if let Some(params) = params_of(&message).ok_or_log("initialized params") {
                    backend.initialized(params);
                }
            }
            DidOpenTextDocument::METHOD => {
                if let Some(params) = params_of(&message).ok_or_log("didOpen params") {
                    backend.did_open(params);
                }
            }
            DidChangeTextDocument::METHOD => {
                if let Some(params) = params_of(&message).ok_or_log("didChange params") {
                    backend.did_change(params);
                }
            }
            DidSaveTextDocument::METHOD => {
                if let Some(params) = params_of(&message).ok_or_log("didSave params") {
                    backend.did_save(params);
                }
            }
            DidCloseTextDocument::METHOD => {
                if let Some(params) = params_of(&message).ok_or_log("didClose params") {
                    backend.did_close(params);
                }
            }
            DidChangeConfiguration::METHOD => {
                if let Some(params) = params_of(&message).ok_or_log("didChangeConfiguration params")
                {
                    backend.did_change_configuration(params);
                }
            }
            Exit::METHOD => break,
            other => log::trace!("ignoring unsupported method '{other}'"),
        }
    }
    Ok(())
}
