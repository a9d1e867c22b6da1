#![allow(dead_code)]
use async_trait::async_trait;
use lastfm_scrobble::{
    ApiCredentials, LastFmClient, ScrobbleError, SignedParams, Track, Transport, TransportError,
};
use md5::{Digest, Md5};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "apikey";
pub const SECRET: &str = "secret";

pub const SUCCESSFUL_AUTHORISATION: &str =
    r#"{"session":{"name":"username","key":"sessionkey","subscriber":"0"}}"#;

pub const AUTHORISATION_ERROR: &str =
    r#"{"error":13,"message":"Invalid method signature supplied"}"#;

pub const INVALID_TOKEN: &str =
    r#"{"error":4,"message":"Invalid authentication token supplied"}"#;

pub const SINGLE_RECENT_TRACK: &str = r##"{"recenttracks":{"track":{"artist":{"#text":"The Mae Shi","mbid":""},"name":"Run To Your Grave","album":{"#text":"HLLLYH"}},"@attr":{"user":"username","page":"1","perPage":"1","totalPages":"1"}}}"##;

pub const UPDATE_NOW_PLAYING_SUCCESS: &str = r##"{"nowplaying":{"track":{"corrected":"0","#text":"Run To Your Grave"},"artist":{"corrected":"0","#text":"The Mae Shi"},"ignoredMessage":{"code":"0","#text":""}}}"##;

pub const SCROBBLE_SUCCESS: &str = r##"{"scrobbles":{"scrobble":{"track":{"corrected":"0","#text":"Run To Your Grave"},"artist":{"corrected":"0","#text":"The Mae Shi"},"timestamp":"12345678","ignoredMessage":{"code":"0","#text":""}},"@attr":{"accepted":1,"ignored":0}}}"##;

pub const UPDATE_ERROR: &str = r#"{"error":13,"message":"Invalid method signature supplied"}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Read,
    Write,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub kind: CallKind,
    pub params: SignedParams,
    pub signed: bool,
}

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Fail(String),
}

/// Transport that records every call and answers with a canned reply.
#[derive(Debug, Clone)]
pub struct FakeTransport {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    reply: Reply,
}

impl FakeTransport {
    pub fn returning(body: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: Reply::Body(body.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: Reply::Fail(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls()
            .pop()
            .expect("expected the transport to be called")
    }

    fn answer(
        &self,
        kind: CallKind,
        params: SignedParams,
        signed: bool,
    ) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            kind,
            params,
            signed,
        });
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Fail(message) => Err(TransportError::Other(message.clone())),
        }
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn read(&self, params: SignedParams, signed: bool) -> Result<String, TransportError> {
        self.answer(CallKind::Read, params, signed)
    }

    async fn write(&self, params: SignedParams, signed: bool) -> Result<String, TransportError> {
        self.answer(CallKind::Write, params, signed)
    }
}

pub fn create_test_client(transport: &FakeTransport) -> LastFmClient {
    LastFmClient::new(ApiCredentials::new(API_KEY, SECRET), transport.clone())
}

pub fn run_to_your_grave() -> Track {
    Track::new("Run To Your Grave", "The Mae Shi")
}

/// Signature the service would expect for `params`, computed independently
/// of `SignedParams::sign`.
pub fn expected_signature(params: &SignedParams) -> String {
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .filter(|(key, _)| *key != "api_sig" && *key != "format")
        .collect();
    pairs.sort();
    let mut base = String::new();
    for (key, value) in pairs {
        base.push_str(key);
        base.push_str(value);
    }
    base.push_str(SECRET);
    format!("{:x}", Md5::digest(base.as_bytes()))
}

/// Collects error messages delivered to a callback.
#[derive(Clone, Default)]
pub struct ErrorLog(Rc<RefCell<Vec<String>>>);

impl ErrorLog {
    pub fn callback(&self) -> impl FnOnce(&ScrobbleError) + 'static {
        let log = self.0.clone();
        move |error| log.borrow_mut().push(error.to_string())
    }

    pub fn listener(&self) -> impl FnMut(&ScrobbleError) + 'static {
        let log = self.0.clone();
        move |error| log.borrow_mut().push(error.to_string())
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}
