use crate::error::CommandError;

use super::shapes::{Background, Circle, Pencil, Rectangle, Text, Triangle};
use super::{Command, CommandArgs, ShapeKind};

/// Instantiates the command variant for `kind`.
pub fn create(kind: ShapeKind, args: CommandArgs) -> Box<dyn Command> {
    match kind {
        ShapeKind::Pencil => Box::new(Pencil::new(&args)),
        ShapeKind::Rectangle => Box::new(Rectangle::new(&args)),
        ShapeKind::Triangle => Box::new(Triangle::new(&args)),
        ShapeKind::Circle => Box::new(Circle::new(&args)),
        ShapeKind::Text => Box::new(Text::new(&args)),
        ShapeKind::Background => Box::new(Background::new(&args)),
    }
}

/// Like [`create`], taking the kind by its lower-case name.
pub fn create_named(name: &str, args: CommandArgs) -> Result<Box<dyn Command>, CommandError> {
    let kind = name.parse::<ShapeKind>()?;
    Ok(create(kind, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::shapes::testing::Harness;
    use crate::coords::Point;

    #[test]
    fn create_dispatches_every_kind() {
        let h = Harness::new();
        for kind in ShapeKind::ALL {
            let command = create(kind, h.args(Point::new(1.0, 2.0)));
            assert_eq!(command.kind(), kind);
            assert!(!command.is_erased());
        }
    }

    #[test]
    fn create_named_parses_lower_case() {
        let h = Harness::new();
        let command = create_named("triangle", h.args(Point::zero())).unwrap();
        assert_eq!(command.kind(), ShapeKind::Triangle);
    }

    #[test]
    fn create_named_rejects_unknown() {
        let h = Harness::new();
        let err = create_named("hexagon", h.args(Point::zero())).err();
        assert_eq!(err, Some(CommandError::UnknownShapeKind("hexagon".into())));
    }

    #[test]
    fn construction_does_not_render() {
        let h = Harness::new();
        for kind in ShapeKind::ALL {
            let _ = create(kind, h.args(Point::zero()));
        }
        assert_eq!(h.render_count(), 0);
        assert_eq!(h.paint_count(), 0);
    }
}
