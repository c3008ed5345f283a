//! Shared fixtures for integration tests.
//!
//! `FakeSource` stands in for remote repositories: a "clone" is a directory
//! with a marker naming the remote, and a checkout writes the manifest the
//! remote has at that reference. `FakeInvoker` records every command instead
//! of running it.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use puck::core::project::Project;
use puck::core::types::{CommandLine, EnvMap, Source, TagPattern};
use puck::engine::Walker;
use puck::events::{EventSink, Recorder};
use puck::process::{Invocation, InvocationOutput, Invoker, ProcessError};
use puck::source::{SourceError, SourceProvider};
use puck::ui::prompts::{PromptError, Prompter};
use tempfile::TempDir;

const ORIGIN_MARKER: &str = ".fake-origin";
const HEAD_MARKER: &str = ".fake-head";

/// Directory name of a path, for compact logs.
pub fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A remote repository: references, the manifest at each, and its tags.
#[derive(Debug, Clone)]
pub struct FakeRemote {
    default_branch: String,
    manifests: BTreeMap<String, Option<String>>,
    tags: BTreeSet<String>,
    unsigned: BTreeSet<String>,
}

impl FakeRemote {
    /// A remote with an empty `main` branch.
    pub fn new() -> Self {
        let mut manifests = BTreeMap::new();
        manifests.insert("main".to_string(), None);
        Self {
            default_branch: "main".into(),
            manifests,
            tags: BTreeSet::new(),
            unsigned: BTreeSet::new(),
        }
    }

    /// Set the manifest on the default branch.
    pub fn manifest(mut self, json: &str) -> Self {
        let branch = self.default_branch.clone();
        self.manifests.insert(branch, Some(json.to_string()));
        self
    }

    pub fn branch(mut self, name: &str, manifest: Option<&str>) -> Self {
        self.manifests
            .insert(name.to_string(), manifest.map(str::to_string));
        self
    }

    pub fn tag(mut self, name: &str, manifest: Option<&str>) -> Self {
        self.tags.insert(name.to_string());
        self.manifests
            .insert(name.to_string(), manifest.map(str::to_string));
        self
    }

    /// Make `git tag --verify` fail for `tag`.
    pub fn unsigned(mut self, tag: &str) -> Self {
        self.unsigned.insert(tag.to_string());
        self
    }
}

/// In-memory stand-in for git remotes.
#[derive(Debug, Default)]
pub struct FakeSource {
    remotes: RefCell<BTreeMap<String, FakeRemote>>,
    log: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote(self, url: &str, remote: FakeRemote) -> Self {
        self.set_remote(url, remote);
        self
    }

    /// Replace a remote, simulating an upstream push.
    pub fn set_remote(&self, url: &str, remote: FakeRemote) {
        self.remotes.borrow_mut().insert(url.to_string(), remote);
    }

    /// Operations performed so far, e.g. `"clone a"` or `"checkout a v1.0"`.
    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Operations that touched the dependency named `name`.
    pub fn ops_on(&self, name: &str) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter(|op| op.split(' ').nth(1) == Some(name))
            .cloned()
            .collect()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, op: impl Into<String>) {
        self.log.borrow_mut().push(op.into());
    }

    fn remote_at(&self, path: &Path) -> Result<FakeRemote, SourceError> {
        let url = fs::read_to_string(path.join(ORIGIN_MARKER)).map_err(|_| SourceError::NotARepo {
            path: path.to_path_buf(),
        })?;
        self.remotes
            .borrow()
            .get(url.trim())
            .cloned()
            .ok_or_else(|| SourceError::Internal {
                message: format!("unknown remote {url}"),
            })
    }
}

fn internal(err: std::io::Error) -> SourceError {
    SourceError::Internal {
        message: err.to_string(),
    }
}

impl SourceProvider for FakeSource {
    fn fetch_latest(&self, path: &Path, source: &Source) -> Result<(), SourceError> {
        let known = {
            let remotes = self.remotes.borrow();
            source
                .urls()
                .iter()
                .find(|url| remotes.contains_key(url.as_str()))
                .cloned()
        };
        let Some(url) = known else {
            self.record(format!("clone-failed {}", name_of(path)));
            return Err(SourceError::CloneFailed {
                urls: source.urls().join(", "),
                path: path.to_path_buf(),
                message: "no such remote".into(),
            });
        };

        if path.join(ORIGIN_MARKER).is_file() {
            self.record(format!("fetch {}", name_of(path)));
        } else {
            fs::create_dir_all(path).map_err(internal)?;
            fs::write(path.join(ORIGIN_MARKER), &url).map_err(internal)?;
            self.record(format!("clone {}", name_of(path)));
        }
        Ok(())
    }

    fn list_tags(&self, path: &Path, pattern: &TagPattern) -> Result<Vec<String>, SourceError> {
        self.record(format!("list-tags {}", name_of(path)));
        let remote = self.remote_at(path)?;
        Ok(remote
            .tags
            .iter()
            .filter(|tag| pattern.matches(tag))
            .cloned()
            .collect())
    }

    fn verify_tag(&self, path: &Path, tag: &str) -> Result<(), SourceError> {
        self.record(format!("verify {} {tag}", name_of(path)));
        let remote = self.remote_at(path)?;
        if remote.unsigned.contains(tag) {
            return Err(SourceError::Verification {
                path: path.to_path_buf(),
                tag: tag.to_string(),
                message: "no signature found".into(),
            });
        }
        Ok(())
    }

    fn checkout(&self, path: &Path, reference: &str) -> Result<(), SourceError> {
        self.record(format!("checkout {} {reference}", name_of(path)));
        let remote = self.remote_at(path)?;
        let manifest = remote
            .manifests
            .get(reference)
            .ok_or_else(|| SourceError::RefNotFound {
                path: path.to_path_buf(),
                reference: reference.to_string(),
            })?;

        let manifest_path = path.join("Package.json");
        match manifest {
            Some(json) => fs::write(&manifest_path, json).map_err(internal)?,
            None if manifest_path.exists() => fs::remove_file(&manifest_path).map_err(internal)?,
            None => {}
        }
        fs::write(path.join(HEAD_MARKER), reference).map_err(internal)?;
        Ok(())
    }

    fn default_branch(&self, path: &Path) -> Result<String, SourceError> {
        Ok(self.remote_at(path)?.default_branch)
    }
}

/// The reference a fake checkout left in `path`.
pub fn head_of(path: &Path) -> Option<String> {
    fs::read_to_string(path.join(HEAD_MARKER)).ok()
}

/// One recorded command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub cwd: PathBuf,
    pub command: CommandLine,
    pub env: EnvMap,
    pub check: bool,
}

impl Call {
    pub fn dir(&self) -> String {
        name_of(&self.cwd)
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }
}

/// Records invocations; commands run in a directory named in `failing`
/// exit with status 2.
#[derive(Debug, Default)]
pub struct FakeInvoker {
    calls: RefCell<Vec<Call>>,
    failing: BTreeSet<String>,
}

impl FakeInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_in(mut self, dir: &str) -> Self {
        self.failing.insert(dir.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Directory names commands ran in, in order.
    pub fn dirs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(Call::dir).collect()
    }

    pub fn call_in(&self, dir: &str) -> Option<Call> {
        self.calls.borrow().iter().find(|c| c.dir() == dir).cloned()
    }
}

impl Invoker for FakeInvoker {
    fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, ProcessError> {
        let call = Call {
            cwd: invocation.cwd.clone(),
            command: invocation.command.clone(),
            env: invocation.env.clone().unwrap_or_default(),
            check: invocation.check,
        };
        let status = if self.failing.contains(&call.dir()) { 2 } else { 0 };
        self.calls.borrow_mut().push(call);

        if invocation.check && status != 0 {
            return Err(ProcessError::Failed {
                command: invocation.command.to_string(),
                status: Some(status),
                stderr: String::new(),
            });
        }
        Ok(InvocationOutput {
            status: Some(status),
            stdout: None,
        })
    }
}

/// Answers removal prompts from a script.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<PathBuf>>,
    interactive: bool,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            asked: RefCell::default(),
            interactive: true,
        }
    }

    /// A prompter for a session without a terminal.
    pub fn non_interactive() -> Self {
        Self::default()
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().iter().map(|p| name_of(p)).collect()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm_removal(&self, path: &Path) -> Result<bool, PromptError> {
        if !self.interactive {
            return Err(PromptError::NotInteractive);
        }
        self.asked.borrow_mut().push(path.to_path_buf());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or(PromptError::Cancelled)
    }
}

/// A root project named `app` in a temporary directory.
pub struct Workspace {
    _temp: TempDir,
    root: PathBuf,
}

impl Workspace {
    pub fn new(manifest: &str) -> Self {
        let temp = TempDir::new().expect("tempdir");
        let root = temp.path().join("app");
        fs::create_dir_all(&root).expect("create root");
        fs::write(root.join("Package.json"), manifest).expect("write manifest");
        Self { _temp: temp, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn deps(&self) -> PathBuf {
        self.root.join("deps")
    }

    pub fn dep(&self, name: &str) -> PathBuf {
        self.deps().join(name)
    }

    /// Materialize a dependency directory by hand, optionally with a manifest.
    pub fn materialize(&self, name: &str, manifest: Option<&str>) -> PathBuf {
        let dir = self.dep(name);
        fs::create_dir_all(&dir).expect("create dep");
        if let Some(json) = manifest {
            fs::write(dir.join("Package.json"), json).expect("write dep manifest");
        }
        dir
    }

    pub fn project(&self) -> Project {
        Project::load_root(self.root.clone()).expect("load root project")
    }
}

/// An event sink feeding a shared recorder.
pub fn recording_sink() -> (EventSink, Rc<Recorder>) {
    let recorder = Rc::new(Recorder::new());
    let sink = EventSink::new().with(Rc::clone(&recorder));
    (sink, recorder)
}

/// A fixed base environment so tests do not see the host's variables.
pub fn base_env() -> EnvMap {
    let mut env = EnvMap::new();
    env.insert("PATH".into(), "/usr/bin:/bin".into());
    env.insert("LEVEL".into(), "base".into());
    env
}

/// Build a walker over test collaborators with [`base_env`].
pub fn walker<'a>(
    source: &'a dyn SourceProvider,
    invoker: &'a dyn Invoker,
    prompter: &'a dyn Prompter,
    events: &'a EventSink,
) -> Walker<'a> {
    Walker::new(source, invoker, prompter, events).with_base_env(base_env())
}

/// URL of a fake remote named `name`.
pub fn url(name: &str) -> String {
    format!("https://example.test/{name}.git")
}

/// A manifest whose `dependencies` are the given JSON fragments.
pub fn manifest(dependencies: &[String], commands: &str) -> String {
    format!(
        r#"{{ "dependencies": [{}], "commands": {} }}"#,
        dependencies.join(", "),
        commands
    )
}

/// Short-form dependency on a fake remote.
pub fn short(name: &str, pattern: &str) -> String {
    format!(r#"{{ "{}": "{}" }}"#, url(name), pattern)
}

/// Long-form dependency on a fake remote with extra JSON fields.
pub fn long(name: &str, extra: &str) -> String {
    if extra.is_empty() {
        format!(r#"{{ "repo": "{}" }}"#, url(name))
    } else {
        format!(r#"{{ "repo": "{}", {} }}"#, url(name), extra)
    }
}
