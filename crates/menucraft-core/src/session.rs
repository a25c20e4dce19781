//! Editor session lifecycle within a host page.

use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::templates::TemplateSource;

/// Layout capabilities the host exposes to the editor.
pub trait HostLayout {
    /// Show or hide the host's footer chrome.
    fn set_footer_visible(&mut self, visible: bool);
}

/// Extract the percent-decoded `template` parameter from a query string
/// such as `?template=template-1&x=y`.
pub fn template_id_from_query(query: &str) -> Option<String> {
    let (_, raw) = query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "template")?;
    let raw = raw.replace('+', " ");
    let value = match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            log::warn!("Template id {:?} is not valid UTF-8 after decoding: {}", raw, e);
            return None;
        }
    };
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// A mounted editor.
///
/// Mounting hides the host footer; unmounting (explicitly or on drop)
/// shows it again.
pub struct EditorSession<H: HostLayout> {
    editor: Editor,
    host: H,
    template_id: Option<String>,
    mounted: bool,
}

impl<H: HostLayout> EditorSession<H> {
    /// Mount the editor, loading `initial_template` when it names a known template.
    pub fn mount(
        mut host: H,
        config: EditorConfig,
        initial_template: Option<&str>,
        templates: &dyn TemplateSource,
    ) -> Self {
        host.set_footer_visible(false);

        let mut editor = Editor::with_empty_design(config);
        let template_id = initial_template.map(str::to_string);
        if let Some(id) = initial_template {
            match templates.design(id) {
                Some(design) => editor.load_design(design),
                None => log::warn!("Unknown template {:?}, starting with an empty design", id),
            }
        }

        log::info!("Editor session mounted");
        Self {
            editor,
            host,
            template_id,
            mounted: true,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Template id the session was opened with.
    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Persist the design. Not implemented; logs the request.
    pub fn save(&self) {
        log::info!(
            "Save requested for design with {} objects (not implemented)",
            self.editor.objects().len()
        );
    }

    /// Download the design. Not implemented; logs the request.
    pub fn download(&self) {
        log::info!("Download requested (not implemented)");
    }

    /// Restore host chrome. Safe to call more than once.
    pub fn unmount(&mut self) {
        if self.mounted {
            self.host.set_footer_visible(true);
            self.mounted = false;
            log::info!("Editor session unmounted");
        }
    }
}

impl<H: HostLayout> Drop for EditorSession<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateCatalog;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingHost {
        calls: Rc<RefCell<Vec<bool>>>,
    }

    impl HostLayout for RecordingHost {
        fn set_footer_visible(&mut self, visible: bool) {
            self.calls.borrow_mut().push(visible);
        }
    }

    #[test]
    fn test_query_parsing() {
        assert_eq!(template_id_from_query("?template=template-1"), Some("template-1".to_string()));
        assert_eq!(template_id_from_query("a=b&template=x"), Some("x".to_string()));
        assert_eq!(template_id_from_query("?template="), None);
        assert_eq!(template_id_from_query(""), None);
        assert_eq!(template_id_from_query("?template=my%20menu"), Some("my menu".to_string()));
        assert_eq!(
            template_id_from_query("?template=caf%C3%A9+menu"),
            Some("café menu".to_string())
        );
        assert_eq!(template_id_from_query("?template=%FF"), None);
    }

    #[test]
    fn test_mount_hides_and_drop_restores_footer() {
        let host = RecordingHost::default();
        let calls = host.calls.clone();
        let catalog = TemplateCatalog::builtin();
        {
            let session = EditorSession::mount(host, EditorConfig::default(), None, &catalog);
            assert!(session.is_mounted());
            assert_eq!(*calls.borrow(), vec![false]);
        }
        assert_eq!(*calls.borrow(), vec![false, true]);
    }

    #[test]
    fn test_unmount_is_idempotent() {
        let host = RecordingHost::default();
        let calls = host.calls.clone();
        let catalog = TemplateCatalog::builtin();
        let mut session = EditorSession::mount(host, EditorConfig::default(), None, &catalog);
        session.unmount();
        session.unmount();
        drop(session);
        assert_eq!(*calls.borrow(), vec![false, true]);
    }

    #[test]
    fn test_mount_loads_initial_template() {
        let session = EditorSession::mount(
            RecordingHost::default(),
            EditorConfig::default(),
            Some("template-2"),
            &TemplateCatalog::builtin(),
        );
        assert_eq!(session.template_id(), Some("template-2"));
        assert_eq!(session.editor().objects().len(), 2);
        assert!(!session.editor().can_undo());
    }

    #[test]
    fn test_mount_with_unknown_template_is_empty() {
        let session = EditorSession::mount(
            RecordingHost::default(),
            EditorConfig::default(),
            Some("missing"),
            &TemplateCatalog::builtin(),
        );
        assert!(session.editor().objects().is_empty());
        assert!(session.editor().design().is_some());
    }
}
