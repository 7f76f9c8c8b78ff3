//! Shared test utilities for integration tests.
//!
//! Not all items are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Repository, Signature};

use mantis::config::ConfigStore;
use mantis::error::{CompletionError, ConfigError, HostError};
use mantis::host::{Host, Notice};
use mantis::openai::CompletionBackend;

/// A test git repository in a temp directory, with an initial commit.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let sig = Signature::now("Test User", "test@example.com").expect("signature");
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
                .expect("Failed to create initial commit");
        }
        Self { dir, repo }
    }

    /// Write a file relative to the repo root.
    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write file");
    }

    /// Stage a file by path.
    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
    }

    /// A fresh WorkTree over this repository.
    pub fn worktree(&self) -> mantis::git::WorkTree {
        mantis::git::WorkTree::discover(self.dir.path())
    }
}

/// Config store backed by shared memory so tests can inspect state after
/// the workflow consumed the store.
#[derive(Default)]
pub struct ConfigState {
    pub key: Option<String>,
    pub reads: usize,
    pub writes: usize,
}

#[derive(Default, Clone)]
pub struct SharedConfig(pub Rc<RefCell<ConfigState>>);

impl SharedConfig {
    pub fn with_key(key: &str) -> Self {
        let config = Self::default();
        config.0.borrow_mut().key = Some(key.to_string());
        config
    }

    pub fn key(&self) -> Option<String> {
        self.0.borrow().key.clone()
    }

    pub fn reads(&self) -> usize {
        self.0.borrow().reads
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().writes
    }
}

impl ConfigStore for SharedConfig {
    fn api_key(&self) -> Option<String> {
        let mut state = self.0.borrow_mut();
        state.reads += 1;
        state.key.clone()
    }

    fn set_api_key(&mut self, value: &str) -> Result<(), ConfigError> {
        let mut state = self.0.borrow_mut();
        state.key = Some(value.to_string());
        state.writes += 1;
        Ok(())
    }
}

/// Completion backend that replays a scripted list of responses.
pub struct FakeBackend {
    responses: Mutex<Vec<Result<Vec<String>, CompletionError>>>,
    pub calls: Mutex<Vec<(String, u32)>>,
}

impl FakeBackend {
    pub fn new(responses: Vec<Result<Vec<String>, CompletionError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Credentials seen per call, in order.
    pub fn credentials_used(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(credential, _)| credential.clone())
            .collect()
    }
}

#[async_trait]
impl CompletionBackend for FakeBackend {
    async fn complete(
        &self,
        credential: &str,
        _prompt: &str,
        count: u32,
    ) -> Result<Vec<String>, CompletionError> {
        self.calls
            .lock()
            .unwrap()
            .push((credential.to_string(), count));

        let mut responses = self.responses.lock().unwrap();
        assert!(!responses.is_empty(), "FakeBackend ran out of responses");
        responses.remove(0)
    }
}

/// Host fake with scripted prompt answers and full interaction recording.
#[derive(Default)]
pub struct FakeHost {
    secret_answers: RefCell<Vec<Option<String>>>,
    pick_answers: RefCell<Vec<Option<usize>>>,
    pub secret_prompts: RefCell<usize>,
    pub picks: RefCell<Vec<(String, Vec<String>)>>,
    pub notices: RefCell<Vec<(Notice, String)>>,
    pub run_commands: RefCell<Vec<String>>,
    pub staged_commands: RefCell<Vec<String>>,
    pub pending_messages: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next secret prompt.
    pub fn answer_secret(self, answer: Option<&str>) -> Self {
        self.secret_answers
            .borrow_mut()
            .push(answer.map(String::from));
        self
    }

    /// Queue an answer for the next pick.
    pub fn answer_pick(self, answer: Option<usize>) -> Self {
        self.pick_answers.borrow_mut().push(answer);
        self
    }

    pub fn notices_at(&self, level: Notice) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Host for FakeHost {
    fn prompt_secret(&self, _prompt: &str) -> Result<Option<String>, HostError> {
        *self.secret_prompts.borrow_mut() += 1;
        let mut answers = self.secret_answers.borrow_mut();
        assert!(!answers.is_empty(), "FakeHost ran out of secret answers");
        Ok(answers.remove(0))
    }

    fn pick_one(&self, prompt: &str, items: &[String]) -> Result<Option<usize>, HostError> {
        self.picks
            .borrow_mut()
            .push((prompt.to_string(), items.to_vec()));
        let mut answers = self.pick_answers.borrow_mut();
        assert!(!answers.is_empty(), "FakeHost ran out of pick answers");
        Ok(answers.remove(0))
    }

    fn notify(&self, level: Notice, message: &str) {
        self.notices.borrow_mut().push((level, message.to_string()));
    }

    fn run_command(&self, command: &str) -> Result<(), HostError> {
        self.run_commands.borrow_mut().push(command.to_string());
        Ok(())
    }

    fn stage_command(&self, command: &str) -> Result<(), HostError> {
        self.staged_commands.borrow_mut().push(command.to_string());
        Ok(())
    }

    fn set_pending_message(&self, message: &str) -> Result<(), HostError> {
        self.pending_messages.borrow_mut().push(message.to_string());
        Ok(())
    }
}
