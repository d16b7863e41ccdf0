use crate::error::AppError;
use crate::processing::statistics::AggregateResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Warning,
    Info,
}

/// A message for the user, shown as a modal until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    /// Text offered for the clipboard, if any.
    pub copy_text: Option<String>,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            copy_text: None,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, "Error", message)
    }

    pub fn aggregate(result: &AggregateResult) -> Self {
        Self {
            copy_text: Some(result.value.to_string()),
            ..Self::info(result.kind.title(), result.report())
        }
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::EmptyFilterQuery => {
                Notice::new(NoticeKind::Warning, "Warning", err.to_string())
            }
            _ => Notice::error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_a_warning() {
        let notice = Notice::from(&AppError::EmptyFilterQuery);
        assert_eq!(notice.kind, NoticeKind::Warning);
    }

    #[test]
    fn not_numeric_names_the_column() {
        let notice = Notice::from(&AppError::NotNumeric { column: "price".into() });
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("price"));
    }
}
