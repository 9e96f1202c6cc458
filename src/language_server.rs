use crate::prelude::*;

pub(crate) trait LanguageServer {
    fn code_action(&mut self, params: CodeActionParams) -> Result<Option<CodeActionResponse>>;
    fn completion(&mut self, params: CompletionParams) -> Result<Option<CompletionResponse>>;
    fn did_change(&mut self, params: DidChangeTextDocumentParams);
    fn did_change_configuration(&mut self, params: DidChangeConfigurationParams);
    fn did_close(&mut self, params: DidCloseTextDocumentParams);
    fn did_open(&mut self, params: DidOpenTextDocumentParams);
    fn did_save(&mut self, params: DidSaveTextDocumentParams);
    fn execute_command(&mut self, params: ExecuteCommandParams) -> Result<Option<Value>>;
    fn goto_definition(
        &mut self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>>;
    fn hover(&mut self, params: HoverParams) -> Result<Option<Hover>>;
    fn initialize(&mut self, params: InitializeParams) -> Result<InitializeResult>;
    fn initialized(&mut self, params: InitializedParams);
    fn shutdown(&mut self) -> Result<()>;
}
