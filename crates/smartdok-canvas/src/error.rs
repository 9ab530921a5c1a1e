use crate::command::ShapeKind;

/// Errors raised by command construction and variant-specific operations.
///
/// `NotImplemented` and `NotSupported` mark operations a variant does not
/// offer; calling them is a programming error on the caller's side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown shape kind: {0:?}")]
    UnknownShapeKind(String),

    #[error("{operation} is not implemented for {kind}")]
    NotImplemented { operation: &'static str, kind: ShapeKind },

    #[error("{operation} is not supported for {kind}")]
    NotSupported { operation: &'static str, kind: ShapeKind },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_operation_and_kind() {
        let err = CommandError::NotSupported { operation: "drag", kind: ShapeKind::Background };
        assert_eq!(err.to_string(), "drag is not supported for background");

        let err = CommandError::UnknownShapeKind("hexagon".into());
        assert_eq!(err.to_string(), "unknown shape kind: \"hexagon\"");
    }
}
