//! State-change callbacks registered by the UI layer.

type Callback<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Ordered list of listeners for one event type.
pub struct Listeners<E> {
    callbacks: Vec<Callback<E>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }
}

impl<E> Listeners<E> {
    pub fn subscribe(&mut self, listener: impl Fn(&E) + Send + Sync + 'static) {
        self.callbacks.push(Box::new(listener));
    }

    /// Calls every listener in registration order.
    pub fn emit(&self, event: &E) {
        for callback in &self.callbacks {
            callback(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.callbacks.len())
            .finish()
    }
}
