// src/main.rs
use crate::prelude::*;
#[macro_use]
extern crate serde_json;

mod checker;
mod client;
mod completion;
mod config;
mod definition;
mod diagnostic;
mod diagnostics_manager;
mod document;
mod error;
mod hover;
mod language_server;
mod prelude;
mod quick_fix;
mod report;
mod server;
mod severity;
mod span;
mod suggestion;
mod utils;
mod word;

/// Documents with any other language id are left alone.
const LANGUAGE_ID: &str = "bpmn";
const CHECK_COMMAND: &str = "bpmn.check";

struct BpmnlsBackend {
    client: Client,
    client_info: Option<ClientInfo>,

    config: BpmnlsConfig,
    checker: Box<dyn Checker>,
    document_storage: HashMap<Uri, DocumentStorage>,
    diagnostics_manager: DiagnosticsManager,
}

impl BpmnlsBackend {
    pub fn new(client: Client, config: BpmnlsConfig, checker: Box<dyn Checker>) -> Self {
        Self {
            diagnostics_manager: DiagnosticsManager::new(client.clone()),
            client,
            client_info: None,
            config,
            checker,
            document_storage: Default::default(),
        }
    }

    fn get_client_name(&self) -> String {
        if let Some(client_info) = self.client_info.as_ref() {
            format!(
                "{}{}{}",
                client_info.name,
                if client_info.version.is_some() { "@" } else { "" },
                client_info.version.as_deref().unwrap_or_default()
            )
        } else {
            String::from("Client?")
        }
    }

    fn get_document(&self, uri: &Uri) -> Result<DocumentStorage> {
        match self.document_storage.get(uri).cloned() {
            Some(ds) => Ok(ds),
            None => Err(Error::new(format!(
                "No document found for uri '{uri}'",
                uri = uri.as_str()
            ))),
        }
    }

    /// Per-document check flow: invoke the checker, translate its report,
    /// replace the document's diagnostic set. Checker failures are logged
    /// here and never crash the session; the next edit or save is the
    /// retry.
    fn run_diagnostics(&mut self, uri: Uri) -> Result<()> {
        let document = self.get_document(&uri)?;
        if document.language_id != LANGUAGE_ID {
            log::trace!(
                "skipping diagnostics [language_id={language_id}]",
                language_id = document.language_id
            );
            return Ok(());
        }
        let file_path = uri.path().as_str().to_string();
        match self.checker.check(&file_path) {
            Ok(report) => {
                let diagnostics = translate_report(&report);
                self.diagnostics_manager
                    .publish(uri, document.version, diagnostics);
            }
            Err(error) if error.is_executable_missing() => {
                log::error!("checker executable missing: {error}");
                self.client.show_message(
                    MessageType::ERROR,
                    format!(
                        "{program} executable not found. Please check your executable_path setting.",
                        program = self.config.executable_path
                    ),
                );
            }
            Err(error) => {
                log::error!("check failed [uri={uri}]: {error}", uri = uri.as_str());
            }
        }
        Ok(())
    }

    fn update_configuration(&mut self, settings: Value) {
        match serde_json::from_value::<BpmnlsConfig>(settings) {
            Ok(config) => {
                if config.executable_path != self.config.executable_path {
                    match ProcessChecker::new(config.executable_path.as_str()) {
                        Ok(checker) => self.checker = Box::new(checker),
                        Err(error) => {
                            log::error!("failed to rebuild checker: {error}");
                            return;
                        }
                    }
                }
                self.client.log_message(
                    MessageType::INFO,
                    format!("configuration changed [config={config:?}]"),
                );
                self.config = config;
            }
            Err(error) => {
                let message = format!("invalid bpmnls configuration [{error}]");
                log::warn!("{}", message);
                self.client.log_message(MessageType::WARNING, message);
            }
        }
    }
}

impl LanguageServer for BpmnlsBackend {
    fn initialize(&mut self, params: InitializeParams) -> Result<InitializeResult> {
        log::info!("initialize called [bpmnls_pid={}]", std::process::id());
        self.client_info = params.client_info;
        if let Some(initialization_options) = params.initialization_options {
            log::info!("initialize updating configuration [{initialization_options:?}]");
            self.update_configuration(initialization_options);
        }
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions::default()),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                definition_provider: Some(OneOf::Left(true)),
                code_action_provider: Some(CodeActionProviderCapability::Options(
                    CodeActionOptions {
                        code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
                        work_done_progress_options: WorkDoneProgressOptions {
                            work_done_progress: Some(false),
                        },
                        resolve_provider: Some(false),
                    },
                )),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![CHECK_COMMAND.to_string()],
                    work_done_progress_options: WorkDoneProgressOptions {
                        work_done_progress: Some(false),
                    },
                }),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    fn initialized(&mut self, _: InitializedParams) {
        log::info!(
            "[{client}] initialized called",
            client = self.get_client_name()
        );
        self.client
            .log_message(MessageType::INFO, "bpmnls server initialized");
    }

    fn did_open(&mut self, params: DidOpenTextDocumentParams) {
        log::info!(
            "[{client}] did_open called [language_id={language_id}]",
            client = self.get_client_name(),
            language_id = params.text_document.language_id
        );
        let uri = params.text_document.uri;
        self.document_storage.insert(
            uri.clone(),
            DocumentStorage {
                language_id: params.text_document.language_id,
                file_contents: params.text_document.text,
                version: DocumentVersion(params.text_document.version),
            },
        );
        if let Err(error) = self.run_diagnostics(uri) {
            log::error!("did_open: {error:?}");
        }
    }

    fn did_change(&mut self, mut params: DidChangeTextDocumentParams) {
        log::trace!("[{client}] did_change called", client = self.get_client_name());
        assert!(params.content_changes.len() == 1);
        let file_contents = params.content_changes.remove(0).text;
        let uri = params.text_document.uri;

        {
            let Some(document_storage) = self.document_storage.get_mut(&uri) else {
                self.client.log_message(
                    MessageType::WARNING,
                    format!("no document found for uri {uri}", uri = uri.as_str()),
                );
                return;
            };
            document_storage.file_contents = file_contents;
            document_storage.version = DocumentVersion(params.text_document.version);
        }

        if let Err(error) = self.run_diagnostics(uri) {
            log::warn!("did_change: {error:?}");
        }
    }

    fn did_save(&mut self, params: DidSaveTextDocumentParams) {
        log::info!("[{client}] did_save called", client = self.get_client_name());
        if let Err(error) = self.run_diagnostics(params.text_document.uri) {
            log::warn!("did_save: {error:?}");
        }
    }

    fn did_close(&mut self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.document_storage.remove(&uri);
        self.diagnostics_manager.clear(&uri);
        log::info!("[{client}] did_close called", client = self.get_client_name());
    }

    fn did_change_configuration(&mut self, dccp: DidChangeConfigurationParams) {
        if dccp.settings.is_null() {
            return;
        }
        if let serde_json::Value::Object(ref map) = dccp.settings {
            if map.is_empty() {
                return;
            }
        }
        self.update_configuration(dccp.settings);
    }

    fn code_action(&mut self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        log::info!("got a textDocument/codeAction request");
        let uri = params.text_document.uri;
        let document = self.get_document(&uri)?;
        let mut actions: CodeActionResponse = Vec::new();
        for diagnostic in params
            .context
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.source.as_deref() == Some(DIAGNOSTIC_SOURCE))
        {
            let candidates = extract_suggestions(&diagnostic.message);
            if candidates.is_empty() {
                continue;
            }
            // The reported range is what gets replaced; the word scan only
            // names the original text in the fix titles.
            let line_text = document
                .file_contents
                .lines()
                .nth(diagnostic.range.start.line as usize)
                .unwrap_or("");
            let (_, _, word) = word_at(line_text, diagnostic.range.start.character + 1);
            actions.extend(
                assemble_fixes(diagnostic.range, &word, &candidates)
                    .into_iter()
                    .map(|fix| {
                        CodeActionOrCommand::CodeAction(fix.into_code_action(&uri, diagnostic))
                    }),
            );
        }
        Ok(if actions.is_empty() { None } else { Some(actions) })
    }

    fn completion(&mut self, _params: CompletionParams) -> Result<Option<CompletionResponse>> {
        Ok(Some(CompletionResponse::Array(completion_items())))
    }

    fn hover(&mut self, params: HoverParams) -> Result<Option<Hover>> {
        let position_params = params.text_document_position_params;
        let document = self.get_document(&position_params.text_document.uri)?;
        Ok(hover_at(&document.file_contents, position_params.position))
    }

    fn goto_definition(
        &mut self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let position_params = params.text_document_position_params;
        let uri = position_params.text_document.uri;
        let document = self.get_document(&uri)?;
        Ok(
            definition_at(&uri, &document.file_contents, position_params.position)
                .map(GotoDefinitionResponse::Scalar),
        )
    }

    fn execute_command(&mut self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        if params.command != CHECK_COMMAND {
            log::error!("unsupported command '{command}'", command = params.command);
            return Ok(None);
        }
        let Some(argument) = params.arguments.first() else {
            return Err(Error::new(format!("{CHECK_COMMAND} requires a document uri argument")));
        };
        let uri: Uri = serde_json::from_value(argument.clone())?;
        self.run_diagnostics(uri)?;
        Ok(None)
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!("[{client}] shutdown called", client = self.get_client_name());
        self.diagnostics_manager.clear_all();
        Ok(())
    }
}

fn setup_logging(base_dirs: &xdg::BaseDirectories, level: log::LevelFilter) -> Result<()> {
    let log_file_path = base_dirs.place_state_file(concat!(env!("CARGO_PKG_NAME"), ".log"))?;
    simple_logging::log_to_file(log_file_path, level)?;
    Ok(())
}

fn read_config(base_dirs: &xdg::BaseDirectories) -> Option<BpmnlsConfig> {
    let config_filename = base_dirs.get_config_file(format!("{}.yaml", env!("CARGO_PKG_NAME")))?;
    log::info!("attempting to read configuration from {config_filename:?}");
    let config = parse_config(
        read_to_string(&config_filename)
            .ok_or_log("failed to read configuration")?
            .as_str(),
    )
    .ok_or_log("failed to parse configuration");
    log::info!(
        "configuration {}read.",
        if config.is_some() {
            "successfully "
        } else {
            "could not be "
        }
    );
    config
}

fn main() -> Result<()> {
    if std::env::args().nth(1) == Some("version".to_string()) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let base_dirs = xdg::BaseDirectories::with_prefix(env!("CARGO_PKG_NAME"));
    setup_logging(&base_dirs, log::LevelFilter::Info)?;

    log::info!(
        "bpmnls started; pid={pid}; parent_process_info={parent_process_info}",
        pid = std::process::id(),
        parent_process_info = fetch_parent_process_info()
    );
    let config = read_config(&base_dirs).unwrap_or_default();
    let checker = ProcessChecker::new(config.executable_path.as_str())?;

    run_server(|client| BpmnlsBackend::new(client, config, Box::new(checker)))
}
