use leptos::prelude::*;
use std::future::Future;

/// Флаг выполнения запроса
///
/// Флаг не считает вложенные вызовы: параллельные запросы могут сбросить его раньше времени.
#[derive(Clone, Copy)]
pub struct RequestLoading {
    pub is_loading: RwSignal<bool>,
}

impl RequestLoading {
    pub fn new() -> Self {
        Self {
            is_loading: RwSignal::new(false),
        }
    }

    /// Флаг только для чтения
    pub fn is_request_loading(&self) -> Signal<bool> {
        let is_loading = self.is_loading;
        Signal::derive(move || is_loading.get())
    }

    /// Выполняет future с поднятым флагом; флаг сбрасывается до возврата результата
    pub async fn track<F, T>(&self, fut: F) -> T
    where
        F: Future<Output = T>,
    {
        self.is_loading.set(true);
        let result = fut.await;
        self.is_loading.set(false);
        result
    }
}

impl Default for RequestLoading {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_flag_is_raised_while_running() {
        let owner = Owner::new();
        owner.set();

        let loading = RequestLoading::new();
        let read_only = loading.is_request_loading();
        assert!(!read_only.get());

        let seen = loading
            .track(async { loading.is_loading.get_untracked() })
            .await;
        assert!(seen);
        assert!(!read_only.get());
    }

    #[tokio::test]
    async fn test_flag_is_reset_on_error() {
        let owner = Owner::new();
        owner.set();

        let loading = RequestLoading::new();
        let result: Result<(), String> = loading.track(async { Err("boom".to_string()) }).await;
        assert_eq!(result, Err("boom".to_string()));
        assert!(!loading.is_loading.get());
    }
}
