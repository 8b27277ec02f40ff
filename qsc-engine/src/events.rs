//! Bus de eventos do pipeline

use crate::error::EngineResult;
use qsc_core::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Handler de eventos (callback)
pub type EventHandler = Arc<dyn Fn(&PipelineEvent) + Send + Sync>;

/// Filtro de eventos
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventFilter {
    /// Todos os eventos
    All,
    /// Eventos de progresso de uma etapa
    Step(ProgressStep),
    /// Eventos de progresso de uma operação
    Operation(Operation),
    /// Métricas chave-valor
    Metrics,
    /// Escolha de fallback
    Fallback,
    /// Avisos não-fatais
    Warnings,
}

impl EventFilter {
    /// Verifica se um evento passa pelo filtro
    pub fn matches(&self, event: &PipelineEvent) -> bool {
        match (self, event) {
            (EventFilter::All, _) => true,
            (EventFilter::Step(wanted), PipelineEvent::StepStarted { step, .. })
            | (EventFilter::Step(wanted), PipelineEvent::StepProgress { step, .. })
            | (EventFilter::Step(wanted), PipelineEvent::StepCompleted { step, .. }) => wanted == step,
            (EventFilter::Operation(wanted), PipelineEvent::StepStarted { operation, .. })
            | (EventFilter::Operation(wanted), PipelineEvent::StepProgress { operation, .. })
            | (EventFilter::Operation(wanted), PipelineEvent::StepCompleted { operation, .. }) => {
                wanted == operation
            }
            (EventFilter::Metrics, PipelineEvent::Metric { .. }) => true,
            (EventFilter::Fallback, PipelineEvent::FallbackSelected { .. }) => true,
            (EventFilter::Warnings, PipelineEvent::Warning { .. }) => true,
            _ => false,
        }
    }
}

/// Bus de eventos
///
/// Implementa [`EventSink`]: pode ser injetado direto no engine.
#[derive(Clone)]
pub struct EventBus {
    /// Handlers registrados por filtro
    handlers: Arc<Mutex<HashMap<EventFilter, Vec<EventHandler>>>>,
    /// Histórico de eventos (limitado)
    history: Arc<Mutex<Vec<PipelineEvent>>>,
    max_history: usize,
}

impl EventBus {
    /// Cria novo bus de eventos
    pub fn new() -> Self {
        Self::with_history(100)
    }

    /// Cria com tamanho de histórico customizado
    pub fn with_history(max_history: usize) -> Self {
        Self {
            handlers: Arc::new(Mutex::new(HashMap::new())),
            history: Arc::new(Mutex::new(Vec::new())),
            max_history,
        }
    }

    /// Registra handler para um filtro
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> EngineResult<()>
    where
        F: Fn(&PipelineEvent) + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.lock()?;
        handlers.entry(filter).or_default().push(Arc::new(handler));
        Ok(())
    }

    /// Remove todos os handlers de um filtro
    pub fn unsubscribe(&self, filter: &EventFilter) -> EngineResult<()> {
        let mut handlers = self.handlers.lock()?;
        handlers.remove(filter);
        Ok(())
    }

    /// Emite um evento
    pub fn emit(&self, event: &PipelineEvent) -> EngineResult<()> {
        {
            let mut history = self.history.lock()?;
            history.push(event.clone());
            if history.len() > self.max_history {
                history.remove(0);
            }
        }

        // Clona os handlers: um handler pode se inscrever de novo sem deadlock
        let matching: Vec<EventHandler> = {
            let handlers = self.handlers.lock()?;
            handlers
                .iter()
                .filter(|(filter, _)| filter.matches(event))
                .flat_map(|(_, list)| list.iter().cloned())
                .collect()
        };
        for handler in matching {
            handler(event);
        }

        Ok(())
    }

    /// Retorna histórico de eventos
    pub fn history(&self) -> EngineResult<Vec<PipelineEvent>> {
        let history = self.history.lock()?;
        Ok(history.clone())
    }

    /// Limpa histórico
    pub fn clear_history(&self) -> EngineResult<()> {
        let mut history = self.history.lock()?;
        history.clear();
        Ok(())
    }

    /// Conta handlers registrados
    pub fn handler_count(&self) -> EngineResult<usize> {
        let handlers = self.handlers.lock()?;
        Ok(handlers.values().map(|v| v.len()).sum())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventBus {
    fn record(&self, event: &PipelineEvent) {
        if let Err(error) = self.emit(event) {
            tracing::warn!(%error, "event bus dropped event");
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("max_history", &self.max_history)
            .field("history_len", &self.history.lock().map(|h| h.len()).unwrap_or(0))
            .finish()
    }
}
