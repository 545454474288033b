//! Scripted providers for dispatcher tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domain::value_objects::notification::NotificationJob;
use crate::errors::ProviderError;
use crate::services::notification::NotificationProvider;

pub enum Behaviour {
    Succeed(Option<&'static str>),
    Fail(ProviderError),
    Hang(Duration),
}

pub struct ScriptedProvider {
    name: &'static str,
    behaviour: Behaviour,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(name: &'static str, behaviour: Behaviour) -> Self {
        Self {
            name,
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationProvider for ScriptedProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn send(&self, _job: &NotificationJob) -> Result<Option<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Succeed(id) => Ok(id.map(str::to_string)),
            Behaviour::Fail(error) => Err(error.clone()),
            Behaviour::Hang(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(Some("too-late".to_string()))
            }
        }
    }
}
