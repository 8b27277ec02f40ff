//! Cache de correlações
//!
//! Memoização por analisador, chaveada pelo hash de conteúdo dos dois
//! estados. Leituras dominam: `ShardedLock` permite leitores concorrentes
//! entre os workers de varredura.
//!
//! Capacidade limitada; ao encher, as entradas mais antigas saem primeiro
//! (FIFO). O conteúdo sobrevive entre compressões.

use crate::error::{EntanglementError, EntanglementResult};
use crossbeam_utils::sync::ShardedLock;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

/// Capacidade padrão (entradas)
pub const DEFAULT_CACHE_CAPACITY: usize = 65_536;

type Key = (u64, u64);

/// Estatísticas do cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[derive(Debug, Default)]
struct Entries {
    values: HashMap<Key, f64>,
    /// Ordem de inserção, para despejo
    order: VecDeque<Key>,
}

/// Cache de correlações simétrico
#[derive(Debug)]
pub struct CorrelationCache {
    entries: ShardedLock<Entries>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl Default for CorrelationCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl CorrelationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capacidade 0 desliga a memoização
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: ShardedLock::new(Entries::default()),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Correlação é simétrica: (a, b) e (b, a) compartilham entrada
    fn key(a: u64, b: u64) -> (u64, u64) {
        if a <= b { (a, b) } else { (b, a) }
    }

    pub fn get(&self, a: u64, b: u64) -> EntanglementResult<Option<f64>> {
        let entries = self.entries.read().map_err(|_| EntanglementError::CachePoisoned)?;
        let found = entries.values.get(&Self::key(a, b)).copied();
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        Ok(found)
    }

    pub fn insert(&self, a: u64, b: u64, value: f64) -> EntanglementResult<()> {
        if self.capacity == 0 {
            return Ok(());
        }
        let key = Self::key(a, b);
        let mut entries = self.entries.write().map_err(|_| EntanglementError::CachePoisoned)?;
        if entries.values.insert(key, value).is_none() {
            entries.order.push_back(key);
        }
        while entries.values.len() > self.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.values.remove(&oldest);
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Devolve o valor em cache ou calcula e memoriza
    pub fn get_or_compute<F>(&self, a: u64, b: u64, compute: F) -> EntanglementResult<f64>
    where
        F: FnOnce() -> f64,
    {
        if let Some(value) = self.get(a, b)? {
            return Ok(value);
        }
        let value = compute();
        self.insert(a, b, value)?;
        Ok(value)
    }

    /// Esvazia o cache (sempre seguro)
    pub fn clear(&self) {
        // Lock envenenado: o conteúdo é descartado de qualquer forma
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.values.clear();
        entries.order.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}
