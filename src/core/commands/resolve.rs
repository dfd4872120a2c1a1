//! Turning a finished input line into a shell command line.

use std::path::{Path, PathBuf};

use super::result::{Invocation, LaunchContext};
use crate::core::PathIndex;
use crate::core::error::ResolveError;
use crate::core::parser::{Expander, split_prefix_suffix, unescape};
use crate::models::{HandlerConfig, PlatformProfile};
use crate::utils::{Scheme, detect_scheme};

/// Resolves input lines against the handler config and the search path.
///
/// The handler config is re-read on every call.
#[derive(Clone, Debug)]
pub struct CommandResolver<'a> {
    paths: &'a PathIndex,
    home: &'a str,
    config_path: &'a Path,
    context: &'a LaunchContext,
}

impl<'a> CommandResolver<'a> {
    pub fn new(
        paths: &'a PathIndex,
        home: &'a str,
        config_path: &'a Path,
        context: &'a LaunchContext,
    ) -> Self {
        Self {
            paths,
            home,
            config_path,
            context,
        }
    }

    fn profile(&self) -> &PlatformProfile {
        self.paths.profile()
    }

    /// Resolve `input` into the invocation to launch.
    ///
    /// Picks a handler by URL scheme, or by what the first token names:
    /// an executable runs as-is, a directory opens with the directory
    /// handler (and becomes the working directory), a plain file opens with
    /// the file handler.
    pub fn resolve(&self, input: &str, in_terminal: bool) -> Result<Invocation, ResolveError> {
        let config = HandlerConfig::load(self.config_path, self.profile().default_handlers());
        let mut input = Expander::new(self.home, self.paths).expand_all(input.trim());
        let mut working_dir: Option<PathBuf> = None;

        let handler = match detect_scheme(&input) {
            Some(Scheme::Http) => Some(config.http.clone()),
            Some(Scheme::File) => Some(config.file.clone()),
            Some(Scheme::Ssh) => {
                input = input.replace("ssh://", "");
                Some(config.ssh.clone())
            }
            None => {
                let (prefix, suffix) = split_prefix_suffix(&input, false);
                let mut target = unescape(prefix.trim());
                if target.is_empty() {
                    return Err(ResolveError::EmptyInput);
                }
                if let Some(resolved) = self.paths.which(&target) {
                    target = resolved;
                }
                let path = Path::new(&target);

                if self.paths.is_executable(path) && !path.is_dir() {
                    tracing::debug!(path = %target, "resolved executable");
                    None
                } else if path.is_dir() {
                    tracing::debug!(path = %target, "resolved directory");
                    working_dir = Some(path.to_path_buf());
                    if in_terminal {
                        Some(config.terminal_program().to_string())
                    } else {
                        Some(config.directory.clone())
                    }
                } else if path.is_file() {
                    tracing::debug!(path = %target, "resolved file");
                    if self.profile().is_windows() && config.file.eq_ignore_ascii_case("start") {
                        input = format!("{} {}", quote_for_start(&target), suffix.unwrap_or_default())
                            .trim_end()
                            .to_string();
                    }
                    Some(config.file.clone())
                } else {
                    return Err(ResolveError::NotFound { command: target });
                }
            }
        };

        let mut command = match handler {
            Some(handler) if !handler.is_empty() => format!("{} {}", handler, input),
            _ => input,
        };
        if in_terminal {
            command = format!("{} \"{}\"", config.terminal, command.replace('"', "\\\""));
        }

        let mut invocation = Invocation {
            command,
            working_dir,
        };
        self.apply_context(&mut invocation);
        tracing::debug!(command = %invocation.command, "resolved invocation");
        Ok(invocation)
    }

    fn apply_context(&self, invocation: &mut Invocation) {
        if let Some(dir) = &self.context.working_dir {
            invocation.working_dir = Some(dir.clone());
        }
        if let Some(args) = &self.context.extra_args {
            invocation.command = format!("{} {}", invocation.command, args);
        }
    }
}

/// Quote every segment of a Windows path for `start`:
/// `c:/my dir/a b.txt` → `c:\"my dir"\"a b.txt"`.
fn quote_for_start(path: &str) -> String {
    let quoted = path
        .replace('"', "")
        .replace('/', "\\")
        .replace('\\', "\"\\\"");
    format!("{}\"", quoted).replace(":\"\\", ":\\")
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::core::filesystem::fixtures::{executable, plain};
    use std::fs;

    struct Fixture {
        bin: tempfile::TempDir,
        config_dir: tempfile::TempDir,
        paths: PathIndex,
        context: LaunchContext,
    }

    impl Fixture {
        fn new() -> Self {
            let bin = tempfile::tempdir().unwrap();
            executable(bin.path(), "gimp");
            let paths = PathIndex::new([bin.path()], PlatformProfile::posix());
            Self {
                bin,
                config_dir: tempfile::tempdir().unwrap(),
                paths,
                context: LaunchContext::default(),
            }
        }

        fn config_path(&self) -> PathBuf {
            self.config_dir.path().join("rc")
        }

        fn resolve(&self, input: &str, in_terminal: bool) -> Result<Invocation, ResolveError> {
            let config_path = self.config_path();
            CommandResolver::new(&self.paths, "/home/me", &config_path, &self.context)
                .resolve(input, in_terminal)
        }
    }

    #[test]
    fn test_http_uses_http_handler() {
        let fixture = Fixture::new();
        let invocation = fixture.resolve("http://example.com", false).unwrap();
        assert_eq!(invocation.command, "firefox http://example.com");
        assert_eq!(invocation.working_dir, None);

        let invocation = fixture.resolve("https://example.com/a", false).unwrap();
        assert_eq!(invocation.command, "firefox https://example.com/a");
    }

    #[test]
    fn test_ssh_strips_scheme() {
        let fixture = Fixture::new();
        let invocation = fixture.resolve("ssh://me@host", false).unwrap();
        assert_eq!(invocation.command, "xterm -e ssh me@host");
    }

    #[test]
    fn test_config_is_reread() {
        let fixture = Fixture::new();
        fs::write(fixture.config_path(), "http-handler = chromium\n").unwrap();
        let invocation = fixture.resolve("http://example.com", false).unwrap();
        assert_eq!(invocation.command, "chromium http://example.com");

        fs::write(fixture.config_path(), "http-handler = lynx\n").unwrap();
        let invocation = fixture.resolve("http://example.com", false).unwrap();
        assert_eq!(invocation.command, "lynx http://example.com");
    }

    #[test]
    fn test_executable_runs_as_typed() {
        let fixture = Fixture::new();
        let invocation = fixture.resolve("gimp my\\ pic.png", false).unwrap();
        assert_eq!(invocation.command, "gimp my\\ pic.png");

        let full = format!("{}/gimp", fixture.bin.path().display());
        let invocation = fixture.resolve(&full, false).unwrap();
        assert_eq!(invocation.command, full);
    }

    #[test]
    fn test_full_path_expansion() {
        let fixture = Fixture::new();
        let invocation = fixture.resolve("=gimp", false).unwrap();
        assert_eq!(
            invocation.command,
            format!("{}/gimp", fixture.bin.path().display())
        );
    }

    #[test]
    fn test_directory_uses_directory_handler() {
        let fixture = Fixture::new();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().display().to_string();

        let invocation = fixture.resolve(&target, false).unwrap();
        assert_eq!(invocation.command, format!("nautilus {}", target));
        assert_eq!(invocation.working_dir.as_deref(), Some(dir.path()));

        let invocation = fixture.resolve(&target, true).unwrap();
        assert_eq!(invocation.command, format!("Terminal -e \"Terminal {}\"", target));
        assert_eq!(invocation.working_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_file_uses_file_handler() {
        let fixture = Fixture::new();
        let dir = tempfile::tempdir().unwrap();
        plain(dir.path(), "notes.txt");
        let target = format!("{}/notes.txt", dir.path().display());

        let invocation = fixture.resolve(&target, false).unwrap();
        assert_eq!(invocation.command, format!("gnome-open {}", target));
        assert_eq!(invocation.working_dir, None);
    }

    #[test]
    fn test_terminal_wraps_command() {
        let fixture = Fixture::new();
        let invocation = fixture.resolve("gimp \"a b\"", true).unwrap();
        assert_eq!(invocation.command, "Terminal -e \"gimp a\\ b\"");

        fs::write(fixture.config_path(), "http-handler = open \"quoted\"\n").unwrap();
        let invocation = fixture.resolve("http://x", true).unwrap();
        assert_eq!(
            invocation.command,
            "Terminal -e \"open \\\"quoted\\\" http://x\""
        );
    }

    #[test]
    fn test_not_found() {
        let fixture = Fixture::new();
        assert_eq!(
            fixture.resolve("nosuchprogram --flag", false),
            Err(ResolveError::NotFound {
                command: "nosuchprogram".to_string()
            })
        );
        assert_eq!(fixture.resolve("   ", false), Err(ResolveError::EmptyInput));
        assert!(fixture.resolve("ftp://host", false).is_err());
    }

    #[test]
    fn test_launch_context_applies() {
        let mut fixture = Fixture::new();
        fixture.context = LaunchContext::from_paths(&["/srv/data/a.txt", "/srv/data/b.txt"]);
        let invocation = fixture.resolve("gimp", false).unwrap();
        assert_eq!(
            invocation.command,
            "gimp \"/srv/data/a.txt\" \"/srv/data/b.txt\""
        );
        assert_eq!(invocation.working_dir, Some(PathBuf::from("/srv/data")));
    }

    #[test]
    fn test_quote_for_start() {
        assert_eq!(
            quote_for_start("c:/my dir/a b.txt"),
            "c:\\\"my dir\"\\\"a b.txt\""
        );
        assert_eq!(quote_for_start("c:/x.txt"), "c:\\\"x.txt\"");
    }
}
