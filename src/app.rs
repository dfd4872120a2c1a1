//! Launcher session.
//!
//! [`Session`] owns the history, search path, handler config location and
//! launch settings, and exposes the operations a front-end drives:
//! candidate production, deletion, activation, reverse search and
//! directory navigation. Front-ends own all control flow and timing.

use std::path::PathBuf;

use crate::config::labels;
use crate::core::{
    CommandResolver, CompletionEngine, HistoryStore, Invocation, LaunchContext, Launcher, PathIndex,
};

// ============================================================================
// Session
// ============================================================================

/// State of one launcher session.
pub struct Session {
    history: HistoryStore,
    paths: PathIndex,
    config_path: PathBuf,
    home: String,
    context: LaunchContext,
    launcher: Launcher,
    /// `(from, to)` pairs of parent-directory steps, innermost last
    nav_stack: Vec<(String, String)>,
    /// Query of the active reverse search
    reverse_query: Option<String>,
    last_invocation: Option<Invocation>,
}

impl Session {
    /// Creates a session with the default launch settings for the search
    /// path's platform profile.
    pub fn new(
        history: HistoryStore,
        paths: PathIndex,
        config_path: impl Into<PathBuf>,
        home: impl Into<String>,
    ) -> Self {
        let launcher = Launcher::new(paths.profile());
        Self {
            history,
            paths,
            config_path: config_path.into(),
            home: home.into(),
            context: LaunchContext::default(),
            launcher,
            nav_stack: Vec::new(),
            reverse_query: None,
            last_invocation: None,
        }
    }

    pub fn with_context(mut self, context: LaunchContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// The invocation of the last successful activation.
    pub fn last_invocation(&self) -> Option<&Invocation> {
        self.last_invocation.as_ref()
    }

    // ========================================================================
    // Candidates
    // ========================================================================

    /// Candidates for the current text. No side effects.
    pub fn produce_candidates(&self, text: &str) -> Vec<String> {
        self.engine().get_completion(text)
    }

    /// Notification that the front-end committed `text` to its entry.
    pub fn apply_choice(&self, text: &str) {
        tracing::debug!(choice = %text, "candidate applied");
    }

    /// Forget `text` in the history.
    pub fn delete_candidate(&mut self, text: &str) {
        self.history.delete(text);
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Resolve and launch `text`, recording it in the history.
    ///
    /// Returns `false` when nothing could be resolved; the front-end should
    /// then show [`labels::NOT_FOUND`].
    pub fn activate(&mut self, text: &str, in_terminal: bool) -> bool {
        let resolver = CommandResolver::new(&self.paths, &self.home, &self.config_path, &self.context);
        let invocation = match resolver.resolve(text, in_terminal) {
            Ok(invocation) => invocation,
            Err(err) => {
                tracing::info!("{}", err);
                return false;
            }
        };

        self.launcher.launch(&invocation);
        self.history.inc_count(text.trim());
        self.last_invocation = Some(invocation);
        true
    }

    // ========================================================================
    // Reverse search
    // ========================================================================

    /// Enter or update a reverse search, returning the best recent match.
    pub fn reverse_search(&mut self, query: &str) -> Option<String> {
        self.reverse_query = Some(query.to_string());
        self.engine().get_reverse_completion(query)
    }

    pub fn reverse_search_end(&mut self) {
        self.reverse_query = None;
    }

    /// Prompt text for the current mode.
    pub fn prompt_label(&self) -> String {
        match &self.reverse_query {
            Some(query) => format!("{}{}", labels::REVERSE_SEARCH, query),
            None => labels::RUN_PROGRAM.to_string(),
        }
    }

    // ========================================================================
    // Directory navigation
    // ========================================================================

    /// Step the last token of `text` up one directory.
    ///
    /// The step is remembered so [`Session::child_directory`] can undo it.
    pub fn parent_directory(&mut self, text: &str) -> String {
        let parent = self.engine().get_parent_directory(text);
        if parent != text {
            self.nav_stack.push((text.to_string(), parent.clone()));
            self.nav_stack.retain(|(_, to)| to.len() >= parent.len());
        }
        parent
    }

    /// Undo the last parent-directory step if `text` is still where it led.
    pub fn child_directory(&mut self, text: &str) -> Option<String> {
        if !self.nav_stack.last().is_some_and(|(_, to)| to == text) {
            return None;
        }
        self.nav_stack.pop().map(|(from, _)| from)
    }

    fn engine(&self) -> CompletionEngine<'_> {
        CompletionEngine::new(&self.history, &self.paths, &self.home)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlatformProfile;

    fn session() -> Session {
        let paths = PathIndex::new(Vec::<PathBuf>::new(), PlatformProfile::posix());
        Session::new(HistoryStore::in_memory(), paths, "/nonexistent/rc", "/home/me")
            .with_launcher(Launcher::new(&PlatformProfile::posix()).dry_run(true))
    }

    #[test]
    fn test_prompt_label() {
        let mut session = session();
        assert_eq!(session.prompt_label(), "Run Program:");
        session.reverse_search("vi");
        assert_eq!(session.prompt_label(), "reverse-i-search: vi");
        session.reverse_search_end();
        assert_eq!(session.prompt_label(), "Run Program:");
    }

    #[test]
    fn test_directory_navigation_round_trip() {
        let mut session = session();
        let up = session.parent_directory("vim /etc/X11/xorg.conf");
        assert_eq!(up, "vim /etc/X11/");
        let up2 = session.parent_directory(&up);
        assert_eq!(up2, "vim /etc/");

        assert_eq!(session.child_directory("vim /etc/"), Some("vim /etc/X11/".to_string()));
        assert_eq!(
            session.child_directory("vim /etc/X11/"),
            Some("vim /etc/X11/xorg.conf".to_string())
        );
        assert_eq!(session.child_directory("vim /etc/X11/xorg.conf"), None);
    }

    #[test]
    fn test_child_directory_requires_matching_text() {
        let mut session = session();
        session.parent_directory("/usr/local/bin");
        assert_eq!(session.child_directory("something else"), None);
        assert_eq!(session.child_directory("/usr/local/"), Some("/usr/local/bin".to_string()));
    }

    #[test]
    fn test_root_does_not_push() {
        let mut session = session();
        assert_eq!(session.parent_directory("/"), "/");
        assert_eq!(session.child_directory("/"), None);
    }

    #[test]
    fn test_failed_activation_is_not_recorded() {
        let mut session = session();
        assert!(!session.activate("nosuchprogram-xyz", false));
        assert!(session.history().entries().is_empty());
        assert!(session.last_invocation().is_none());
    }

    #[test]
    fn test_activation_records_history() {
        let mut session = session();
        assert!(session.activate("http://example.com", false));
        assert_eq!(
            session.last_invocation().map(|inv| inv.command.as_str()),
            Some("firefox http://example.com")
        );
        assert_eq!(session.history().recent(), &["http://example.com".to_string()]);
        assert_eq!(session.produce_candidates(""), vec!["http://example.com"]);
    }
}
