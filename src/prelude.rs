pub use std::{cell::RefCell, collections::HashMap, fs::read_to_string, rc::Rc};

pub use lsp_types::{notification::*, *};
pub use regex::Regex;
pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
pub use serde_json::Value;

pub(crate) use crate::{
    checker::*,
    client::*,
    completion::*,
    config::*,
    definition::*,
    diagnostic::*,
    diagnostics_manager::*,
    document::*,
    error::*,
    hover::*,
    language_server::*,
    quick_fix::*,
    report::*,
    server::*,
    severity::*,
    span::*,
    suggestion::*,
    utils::*,
    word::*,
};
