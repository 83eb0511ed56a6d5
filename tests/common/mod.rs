//! Shared helpers for integration tests

#![allow(dead_code)]

use bdcc::api::{ApiKey, BdccClient, Credentials};
use bdcc::provider::Pause;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_KEY: &str = "test-key";

/// Client pointed at the mock server, authenticated with [`TEST_KEY`]
pub fn client_for(server: &MockServer) -> Arc<BdccClient> {
    let creds = Credentials::new(Some(&server.uri()), ApiKey::new(TEST_KEY).unwrap()).unwrap();
    Arc::new(BdccClient::new(creds).unwrap())
}

/// Records requested pauses instead of sleeping
#[derive(Clone, Default)]
pub struct RecordingPause(Arc<Mutex<Vec<Duration>>>);

impl RecordingPause {
    pub fn recorded(&self) -> Vec<Duration> {
        self.0.lock().unwrap().clone()
    }
}

impl Pause for RecordingPause {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.0.lock().unwrap().push(duration);
        std::future::ready(())
    }
}
