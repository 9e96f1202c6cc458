use crate::prelude::*;

/// Owner of the per-document diagnostic sets. Each successful checker run
/// replaces a document's set wholesale; nothing is merged. The published
/// version acts as the request token: a report carrying an older version
/// than the latest published one is stale and discarded.
pub(crate) struct DiagnosticsManager {
    client: Client,
    published_versions: HashMap<Uri, DocumentVersion>,
}

impl DiagnosticsManager {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            published_versions: Default::default(),
        }
    }

    pub(crate) fn publish(&mut self, uri: Uri, version: DocumentVersion, diagnostics: Vec<Diagnostic>) {
        if let Some(latest) = self.published_versions.get(&uri) {
            if *latest > version {
                log::info!(
                    "discarding stale diagnostics [uri={uri}, version={version}, latest={latest}]",
                    uri = uri.as_str(),
                );
                return;
            }
        }
        log::info!(
            "publishing diagnostics [uri={uri}, version={version}, count={count}]",
            uri = uri.as_str(),
            count = diagnostics.len(),
        );
        self.published_versions.insert(uri.clone(), version);
        self.client
            .publish_diagnostics(uri, diagnostics, Some(version.0));
    }

    /// Drop a closed document's entry and clear its diagnostics in the
    /// editor.
    pub(crate) fn clear(&mut self, uri: &Uri) {
        if self.published_versions.remove(uri).is_some() {
            self.client.publish_diagnostics(uri.clone(), Vec::new(), None);
        }
    }

    /// Teardown: clear every document this manager ever published for.
    pub(crate) fn clear_all(&mut self) {
        for (uri, _) in std::mem::take(&mut self.published_versions) {
            self.client.publish_diagnostics(uri, Vec::new(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with_capture() -> (DiagnosticsManager, Rc<RefCell<Vec<u8>>>) {
        let buffer: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
        (DiagnosticsManager::new(Client::new(buffer.clone())), buffer)
    }

    fn published_versions(buffer: &Rc<RefCell<Vec<u8>>>) -> Vec<Value> {
        String::from_utf8(buffer.borrow().clone())
            .unwrap()
            .split("Content-Length:")
            .filter_map(|chunk| chunk.split_once("\r\n\r\n"))
            .map(|(_, body)| serde_json::from_str::<Value>(body).unwrap()["params"]["version"].clone())
            .collect()
    }

    #[test]
    fn stale_report_is_discarded() {
        let (mut manager, buffer) = manager_with_capture();
        let uri: Uri = "file:///tmp/order.bpmn".parse().unwrap();
        manager.publish(uri.clone(), DocumentVersion(5), Vec::new());
        manager.publish(uri.clone(), DocumentVersion(3), Vec::new());
        manager.publish(uri, DocumentVersion(6), Vec::new());
        assert_eq!(published_versions(&buffer), vec![json!(5), json!(6)]);
    }

    #[test]
    fn same_version_republishes() {
        let (mut manager, buffer) = manager_with_capture();
        let uri: Uri = "file:///tmp/order.bpmn".parse().unwrap();
        manager.publish(uri.clone(), DocumentVersion(2), Vec::new());
        manager.publish(uri, DocumentVersion(2), Vec::new());
        assert_eq!(published_versions(&buffer), vec![json!(2), json!(2)]);
    }

    #[test]
    fn clear_publishes_an_empty_set_once() {
        let (mut manager, buffer) = manager_with_capture();
        let uri: Uri = "file:///tmp/order.bpmn".parse().unwrap();
        manager.publish(uri.clone(), DocumentVersion(1), Vec::new());
        manager.clear(&uri);
        manager.clear(&uri);
        assert_eq!(published_versions(&buffer), vec![json!(1), json!(null)]);
    }
}
