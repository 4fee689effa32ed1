//! In-memory executor for unit tests

use async_trait::async_trait;
use std::sync::Mutex;

use crate::http::{Executor, Method, Outcome, RequestSpec};

type Matcher = Box<dyn Fn(&RequestSpec) -> bool + Send + Sync>;
type Responder = Box<dyn Fn(&RequestSpec) -> Outcome + Send + Sync>;

/// Answers requests from a list of rules and remembers what it was asked
///
/// The first matching rule wins; unmatched requests get the fallback, or a
/// transport failure if there is none.
#[derive(Default)]
pub struct ScriptedExecutor {
    rules: Vec<(Matcher, Responder)>,
    fallback: Option<Outcome>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, method: Method, path: &str, outcome: Outcome) -> Self {
        let path = path.to_string();
        self.when(move |spec| spec.method == method && spec.path == path, outcome)
    }

    pub fn when(
        self,
        matcher: impl Fn(&RequestSpec) -> bool + Send + Sync + 'static,
        outcome: Outcome,
    ) -> Self {
        self.reply(matcher, move |_| outcome.clone())
    }

    /// Build the outcome from the request, e.g. to echo the posted body
    pub fn reply(
        mut self,
        matcher: impl Fn(&RequestSpec) -> bool + Send + Sync + 'static,
        responder: impl Fn(&RequestSpec) -> Outcome + Send + Sync + 'static,
    ) -> Self {
        self.rules.push((Box::new(matcher), Box::new(responder)));
        self
    }

    pub fn fallback(mut self, outcome: Outcome) -> Self {
        self.fallback = Some(outcome);
        self
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn execute(&self, spec: &RequestSpec) -> Outcome {
        self.requests.lock().unwrap().push(spec.clone());

        self.rules
            .iter()
            .find(|(matcher, _)| matcher(spec))
            .map(|(_, respond)| respond(spec))
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| Outcome::transport("connection refused"))
    }
}

/// Matches requests carrying exactly this bearer token
pub fn bearer_is(token: &'static str) -> impl Fn(&RequestSpec) -> bool + Send + Sync {
    move |spec| spec.token.as_ref().map(|t| t.as_str()) == Some(token)
}
