//! Per-handler cache of body readers and writers.
//!
//! Building a reader or writer resolves the body [`Format`] and the type
//! name once; after that every invocation reuses the same `Arc`.
//!
//! # Concurrency
//!
//! A warm handler instance may serve overlapping invocations from several
//! threads, and two of them can hit the same type for the first time
//! together. Both maps are `DashMap`s: `entry().or_insert_with()` holds
//! the lock of the one shard that owns the key, so exactly one instance
//! is built and published per type while lookups for other types proceed
//! on other shards.

use std::any::{Any, TypeId, type_name};
use std::sync::Arc;

use dashmap::DashMap;

use crate::codec::{BodyReader, BodyWriter, Format};

type Erased = Arc<dyn Any + Send + Sync>;

/// Lazily built readers and writers, keyed by exact type.
///
/// Scoped to one handler instance and never evicted.
#[derive(Debug, Default)]
pub struct CodecCache {
    readers: DashMap<TypeId, Erased>,
    writers: DashMap<TypeId, Erased>,
    pretty: bool,
}

impl CodecCache {
    /// Creates an empty cache. `pretty` applies to every writer it builds.
    pub fn new(pretty: bool) -> Self {
        Self {
            readers: DashMap::new(),
            writers: DashMap::new(),
            pretty,
        }
    }

    /// Returns the reader for `T`, building it on first use.
    ///
    /// Repeated calls for the same `T` return the same instance
    /// (`Arc::ptr_eq` holds).
    pub fn reader<T: 'static>(&self) -> Arc<BodyReader<T>> {
        let erased = Arc::clone(
            self.readers
                .entry(TypeId::of::<T>())
                .or_insert_with(|| {
                    tracing::debug!(
                        type_name = type_name::<T>(),
                        format = %Format::of::<T>(),
                        media_type = %Format::of::<T>().media_type(),
                        "building body reader"
                    );
                    Arc::new(BodyReader::<T>::new()) as Erased
                })
                .value(),
        );
        erased
            .downcast::<BodyReader<T>>()
            .expect("reader entries are keyed by their own TypeId")
    }

    /// Returns the writer for `T`, building it on first use.
    pub fn writer<T: 'static>(&self) -> Arc<BodyWriter<T>> {
        let pretty = self.pretty;
        let erased = Arc::clone(
            self.writers
                .entry(TypeId::of::<T>())
                .or_insert_with(|| {
                    tracing::debug!(
                        type_name = type_name::<T>(),
                        format = %Format::of::<T>(),
                        media_type = %Format::of::<T>().media_type(),
                        "building body writer"
                    );
                    Arc::new(BodyWriter::<T>::new(pretty)) as Erased
                })
                .value(),
        );
        erased
            .downcast::<BodyWriter<T>>()
            .expect("writer entries are keyed by their own TypeId")
    }

    /// Number of cached readers plus writers.
    pub fn len(&self) -> usize {
        self.readers.len() + self.writers.len()
    }

    /// Returns `true` if nothing has been built yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
