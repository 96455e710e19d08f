//! Simulated backend for offline use and demos

use super::{DispatchError, Dispatcher};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::Mutex;

const DEFAULT_DELAY: Duration = Duration::from_secs(1);

const CANNED_ANSWERS: [&str; 3] = [
    "Interesante pregunta. Déjame pensar...",
    "Podrías reformularlo, por favor.",
    "Estoy procesando eso en mi memoria simulada",
];

/// Answers with a randomly chosen canned reply after a fixed delay
pub struct SimulatedDispatcher<R = StdRng> {
    rng: Mutex<R>,
    delay: Duration,
}

impl SimulatedDispatcher<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), DEFAULT_DELAY)
    }
}

impl<R: Rng + Send> SimulatedDispatcher<R> {
    pub fn new(rng: R, delay: Duration) -> Self {
        Self {
            rng: Mutex::new(rng),
            delay,
        }
    }

    async fn pick(&self, question: &str) -> String {
        let choice = self.rng.lock().await.gen_range(0..=CANNED_ANSWERS.len());
        match CANNED_ANSWERS.get(choice) {
            Some(answer) => (*answer).to_string(),
            None => format!("¿Podrías aclararme a qué te refieres con \"{question}\"?"),
        }
    }
}

#[async_trait]
impl<R: Rng + Send> Dispatcher for SimulatedDispatcher<R> {
    async fn submit(&self, question: &str) -> Result<String, DispatchError> {
        let answer = self.pick(question).await;
        tokio::time::sleep(self.delay).await;
        Ok(answer)
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
