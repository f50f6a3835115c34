//! リクエストのライフサイクル `Idle -> Loading -> Ready | Failed`

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// 結果を反映する。エラーは表示用文字列にして保持
    pub fn finish(result: Result<T>) -> Self {
        match result {
            Ok(value) => RequestState::Ready(value),
            Err(e) => RequestState::Failed(e.to_string()),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            RequestState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_is_idle() {
        let state: RequestState<u8> = RequestState::default();
        assert_eq!(state, RequestState::Idle);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_finish() {
        let ok: RequestState<u8> = RequestState::finish(Ok(3));
        assert_eq!(ok.ready(), Some(&3));
        assert_eq!(ok.error(), None);

        let failed: RequestState<u8> =
            RequestState::finish(Err(Error::Validation("Please choose a file.".into())));
        assert_eq!(failed.error(), Some("Please choose a file."));
        assert_eq!(failed.ready(), None);
    }
}
