//! Scripted parser used by ingestion and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::parser_client::{ChatReply, ParsedResume, ParserError, ResumeParser};

pub enum Script {
    Parsed(ParsedResume),
    Garbage,
    Down,
    Slow,
}

pub struct StubParser {
    script: Script,
    calls: AtomicUsize,
    last_token: Mutex<Option<String>>,
    last_file_name: Mutex<Option<String>>,
}

impl StubParser {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_token: Mutex::new(None),
            last_file_name: Mutex::new(None),
        }
    }

    pub fn returning(parsed: ParsedResume) -> Self {
        Self::new(Script::Parsed(parsed))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }

    pub fn last_file_name(&self) -> Option<String> {
        self.last_file_name.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeParser for StubParser {
    async fn parse(&self, file_name: &str, auth_token: &str) -> Result<ParsedResume, ParserError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_file_name.lock().unwrap() = Some(file_name.to_string());
        *self.last_token.lock().unwrap() = Some(auth_token.to_string());
        match &self.script {
            Script::Parsed(parsed) => Ok(parsed.clone()),
            Script::Garbage => Err(ParserError::Decode("expected value at line 1".to_string())),
            Script::Down => Err(ParserError::Status {
                status: 503,
                body: "parser offline".to_string(),
            }),
            Script::Slow => Err(ParserError::Timeout(Duration::from_secs(40))),
        }
    }

    async fn chat(&self, session_id: &str, question: &str) -> Result<ChatReply, ParserError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Down => Err(ParserError::Status {
                status: 502,
                body: "chat offline".to_string(),
            }),
            _ => Ok(ChatReply {
                answer: format!("echo: {question}"),
                session_id: session_id.to_string(),
            }),
        }
    }
}
