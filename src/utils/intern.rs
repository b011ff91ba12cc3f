use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, Mutex, OnceLock};

/// Canonical storage for equal values.
///
/// The first value interned wins; every later equal value is answered with
/// a clone of the same `Arc`, so callers can compare with `Arc::ptr_eq`.
/// Entries live as long as the interner, there is no eviction.
#[derive(Debug)]
pub struct Interner<T: ?Sized + Eq + Hash> {
    store: HashSet<Arc<T>>,
}

impl<T: ?Sized + Eq + Hash> Interner<T> {
    pub fn new() -> Self {
        Self {
            store: HashSet::new(),
        }
    }

    /// Intern an owned value
    pub fn intern(&mut self, value: T) -> Arc<T>
    where
        T: Sized,
    {
        if let Some(existing) = self.store.get(&value) {
            return Arc::clone(existing);
        }

        let canonical = Arc::new(value);
        self.store.insert(Arc::clone(&canonical));
        canonical
    }

    /// Intern a borrowed value, allocating only when it is new
    pub fn intern_ref(&mut self, value: &T) -> Arc<T>
    where
        Arc<T>: for<'a> From<&'a T>,
    {
        if let Some(existing) = self.store.get(value) {
            return Arc::clone(existing);
        }

        let canonical: Arc<T> = Arc::from(value);
        self.store.insert(Arc::clone(&canonical));
        canonical
    }

    pub fn contains(&self, value: &T) -> bool {
        self.store.contains(value)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<T: ?Sized + Eq + Hash> Default for Interner<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn global_strings() -> &'static Mutex<Interner<str>> {
    static STRINGS: OnceLock<Mutex<Interner<str>>> = OnceLock::new();
    STRINGS.get_or_init(|| Mutex::new(Interner::new()))
}

/// Intern a string in the process-wide store.
///
/// The store starts empty and is never cleared.
pub fn intern_str(value: &str) -> Arc<str> {
    let mut strings = global_strings()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    strings.intern_ref(value)
}
