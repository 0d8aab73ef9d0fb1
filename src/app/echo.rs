//! Echo application.
//!
//! Records every lifecycle call into a shared [`Journal`]. Useful for hosts
//! checking their wiring and as the reference application in tests.

use crate::app::collaborators::Collaborators;
use crate::app::descriptor::AppDescriptor;
use crate::app::interface::{AppError, AppResult, Application, Lifecycle};
use crate::core::Result;
use crate::runtime::AppResolver;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Identifier the echo application is registered under.
pub const ECHO_IDENTIFIER: &str = "sample.echo";

/// A recorded lifecycle call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EchoEvent {
    /// `init` with the descriptor's name
    Init(String),
    /// A dispatched selector
    Ran(Lifecycle),
}

/// Shared record of what echo instances did.
#[derive(Debug, Default)]
pub struct Journal {
    constructed: AtomicUsize,
    events: Mutex<Vec<EchoEvent>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of instances constructed so far.
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> Vec<EchoEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times a selector ran.
    pub fn count(&self, selector: Lifecycle) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| **e == EchoEvent::Ran(selector))
            .count()
    }

    fn record(&self, event: EchoEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

/// Application that echoes its lifecycle into a journal.
pub struct EchoApp {
    journal: Arc<Journal>,
    app_name: Option<String>,
}

impl EchoApp {
    /// Create a new echo application.
    pub fn new(journal: Arc<Journal>) -> Self {
        journal.constructed.fetch_add(1, Ordering::SeqCst);
        Self {
            journal,
            app_name: None,
        }
    }

    /// Name taken from the activating descriptor.
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    fn echo(&self, selector: Lifecycle) -> AppResult<()> {
        if self.app_name.is_none() {
            return Err(AppError::failed("echo used before init"));
        }
        tracing::debug!(selector = %selector, "echo");
        self.journal.record(EchoEvent::Ran(selector));
        Ok(())
    }
}

impl Application for EchoApp {
    fn name(&self) -> &str {
        "echo"
    }

    fn init(&mut self, app: &AppDescriptor) -> AppResult<()> {
        self.app_name = Some(app.name.clone());
        self.journal.record(EchoEvent::Init(app.name.clone()));
        Ok(())
    }

    fn install(&self) -> AppResult<()> {
        self.echo(Lifecycle::Install)
    }

    fn configure(&self) -> AppResult<()> {
        self.echo(Lifecycle::Configure)
    }

    fn trigger_on_demand(&self) -> AppResult<()> {
        self.echo(Lifecycle::TriggerOnDemand)
    }
}

/// Register the echo application under [`ECHO_IDENTIFIER`].
pub fn register_echo(resolver: &mut AppResolver, journal: Arc<Journal>) -> Result<()> {
    resolver.register(ECHO_IDENTIFIER, move |_: &Collaborators| {
        Ok(EchoApp::new(Arc::clone(&journal)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_records_calls() {
        let journal = Journal::new();
        let mut app = EchoApp::new(Arc::clone(&journal));

        app.init(&AppDescriptor::new("echo", ECHO_IDENTIFIER)).unwrap();
        app.install().unwrap();
        app.trigger_on_demand().unwrap();

        assert_eq!(journal.constructed(), 1);
        assert_eq!(app.app_name(), Some("echo"));
        assert_eq!(
            journal.events(),
            vec![
                EchoEvent::Init("echo".to_string()),
                EchoEvent::Ran(Lifecycle::Install),
                EchoEvent::Ran(Lifecycle::TriggerOnDemand),
            ]
        );
        assert_eq!(journal.count(Lifecycle::Configure), 0);
    }

    #[test]
    fn test_echo_requires_init() {
        let app = EchoApp::new(Journal::new());
        assert!(matches!(app.configure(), Err(AppError::Failed(_))));
    }

    #[test]
    fn test_register_echo() {
        let mut resolver = AppResolver::new();
        register_echo(&mut resolver, Journal::new()).unwrap();
        assert!(resolver.contains(ECHO_IDENTIFIER));
    }
}
