use crate::controller::events::UiError;

/// Last-known value of a query plus its in-flight and failure flags.
#[derive(Debug, Clone)]
pub struct Remote<T> {
    value: Option<T>,
    loading: bool,
    error: Option<UiError>,
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> Remote<T> {
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn resolve(&mut self, value: T) {
        self.value = Some(value);
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, error: UiError) {
        self.loading = false;
        self.error = Some(error);
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&UiError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::UiErrorContext;

    #[test]
    fn keeps_last_value_while_reloading_and_after_failure() {
        let mut remote = Remote::default();
        remote.start();
        assert!(remote.is_loading());
        remote.resolve(1);

        remote.start();
        assert_eq!(remote.value(), Some(&1));
        remote.fail(UiError::from_message(UiErrorContext::General, "boom"));
        assert!(!remote.is_loading());
        assert_eq!(remote.value(), Some(&1));
        assert_eq!(remote.error().map(UiError::message), Some("boom"));

        remote.start();
        assert!(remote.error().is_none());
    }
}
