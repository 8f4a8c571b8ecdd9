//! Built-in placement handlers.
//!
//! Each handler receives the resolved argument vector in signature order
//! and is responsible for its own type checks; a mismatch becomes a
//! [`PlacementError`], never a panic.

use codescape_core::Value;

use crate::error::PlacementError;
use crate::grid::GridCell;
use crate::placement::{ObjectKind, Outcome, RoadDirection};
use crate::world::{Details, World};

// ──────────────────────────────────────────────
// Argument extraction
// ──────────────────────────────────────────────

static NULL: Value = Value::Null;

/// Missing trailing arguments read as None.
fn arg(args: &[Value], idx: usize) -> &Value {
    args.get(idx).unwrap_or(&NULL)
}

fn invalid(param: &str, expected: &str, got: &Value) -> PlacementError {
    PlacementError::InvalidArgument {
        param: param.to_string(),
        expected: expected.to_string(),
        got: got.type_name().to_string(),
    }
}

/// An optional integral coordinate.
fn coord(args: &[Value], idx: usize, param: &str) -> Result<Option<i64>, PlacementError> {
    match arg(args, idx) {
        Value::Null => Ok(None),
        v @ Value::Number(n) => match v.as_i64().filter(|i| i32::try_from(*i).is_ok()) {
            Some(i) => Ok(Some(i)),
            None => Err(PlacementError::OutOfRange {
                param: param.to_string(),
                value: n.to_string(),
            }),
        },
        other => Err(invalid(param, "integer or None", other)),
    }
}

fn required_coord(args: &[Value], idx: usize, param: &str) -> Result<i64, PlacementError> {
    coord(args, idx, param)?.ok_or_else(|| PlacementError::MissingArgument {
        param: param.to_string(),
    })
}

/// A floor count, clamped into `min..=max`.
fn floors(
    args: &[Value],
    idx: usize,
    min: u32,
    max: u32,
) -> Result<u32, PlacementError> {
    let v = arg(args, idx);
    let n = match v {
        Value::Number(_) => v.as_i64().ok_or_else(|| PlacementError::OutOfRange {
            param: "floors".to_string(),
            value: v.to_string(),
        })?,
        other => return Err(invalid("floors", "integer", other)),
    };
    Ok(n.clamp(i64::from(min), i64::from(max)) as u32)
}

/// An optional label; empty strings count as no name.
fn name(args: &[Value], idx: usize) -> Result<Option<String>, PlacementError> {
    match arg(args, idx) {
        Value::Null => Ok(None),
        Value::Str(s) if s.is_empty() => Ok(None),
        Value::Str(s) => Ok(Some(s.clone())),
        other => Err(invalid("name", "str", other)),
    }
}

fn direction(args: &[Value], idx: usize) -> Result<RoadDirection, PlacementError> {
    match arg(args, idx) {
        Value::Null => Ok(RoadDirection::Horizontal),
        Value::Str(s) => RoadDirection::parse(s).ok_or_else(|| PlacementError::InvalidArgument {
            param: "direction".to_string(),
            expected: "'h' or 'v'".to_string(),
            got: format!("'{}'", s),
        }),
        other => Err(invalid("direction", "str", other)),
    }
}

// ──────────────────────────────────────────────
// Handlers
// ──────────────────────────────────────────────

/// `(row, col, name)` landmarks that search for space when needed.
fn build_named(world: &mut World, kind: ObjectKind, args: &[Value]) -> Result<Outcome, PlacementError> {
    let row = coord(args, 0, "row")?;
    let col = coord(args, 1, "col")?;
    let details = Details {
        name: name(args, 2)?,
        ..Details::default()
    };
    world
        .place_near(kind, row, col, details)
        .map(Outcome::Placed)
}

pub fn build_house(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    let row = coord(args, 0, "row")?;
    let col = coord(args, 1, "col")?;
    let details = Details {
        floors: Some(floors(args, 2, 1, u32::MAX)?),
        name: name(args, 3)?,
        ..Details::default()
    };
    world
        .place_near(ObjectKind::House, row, col, details)
        .map(Outcome::Placed)
}

pub fn build_apartment(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    let row = coord(args, 0, "row")?;
    let col = coord(args, 1, "col")?;
    let details = Details {
        floors: Some(floors(args, 2, 2, 10)?),
        name: name(args, 3)?,
        ..Details::default()
    };
    world
        .place_near(ObjectKind::Apartment, row, col, details)
        .map(Outcome::Placed)
}

pub fn build_park(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    build_named(world, ObjectKind::Park, args)
}

pub fn build_pool(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    build_named(world, ObjectKind::Pool, args)
}

pub fn build_library(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    build_named(world, ObjectKind::Library, args)
}

pub fn build_school(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    build_named(world, ObjectKind::School, args)
}

pub fn build_hospital(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    build_named(world, ObjectKind::Hospital, args)
}

pub fn build_shop(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    build_named(world, ObjectKind::Shop, args)
}

pub fn build_fountain(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    build_named(world, ObjectKind::Fountain, args)
}

pub fn build_power_tower(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    let row = coord(args, 0, "row")?;
    let col = coord(args, 1, "col")?;
    world
        .place_near(ObjectKind::PowerTower, row, col, Details::default())
        .map(Outcome::Placed)
}

/// Roads go exactly where asked; there is no search.
pub fn build_road(world: &mut World, args: &[Value]) -> Result<Outcome, PlacementError> {
    let row = required_coord(args, 0, "row")?;
    let col = required_coord(args, 1, "col")?;
    let details = Details {
        direction: Some(direction(args, 2)?),
        ..Details::default()
    };
    world
        .place_at(ObjectKind::Road, GridCell::new(row, col), details)
        .map(Outcome::Placed)
}

pub fn clear_all(world: &mut World, _args: &[Value]) -> Result<Outcome, PlacementError> {
    Ok(Outcome::Cleared {
        removed: world.clear(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::grid::ValidityMask;
    use crate::placement::Placement;

    fn world() -> World {
        World::new(ValidityMask::all_land(10), &SessionConfig::with_grid_size(10))
    }

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn house_at_requested_cell() {
        let mut w = world();
        let out = build_house(&mut w, &[num(2.0), num(3.0), num(2.0), "Home".into()]).unwrap();
        assert_eq!(
            out,
            Outcome::Placed(Placement {
                row: 2,
                col: 3,
                kind: ObjectKind::House
            })
        );
        let placed = &w.placed()[0];
        assert_eq!(placed.name.as_deref(), Some("Home"));
        assert_eq!(placed.floors, Some(2));
    }

    #[test]
    fn floors_are_clamped() {
        let mut w = world();
        build_house(&mut w, &[Value::Null, Value::Null, num(0.0), "".into()]).unwrap();
        build_apartment(&mut w, &[Value::Null, Value::Null, num(30.0), "".into()]).unwrap();
        build_apartment(&mut w, &[Value::Null, Value::Null, num(1.0), "".into()]).unwrap();
        let floors: Vec<Option<u32>> = w.placed().iter().map(|p| p.floors).collect();
        assert_eq!(floors, vec![Some(1), Some(10), Some(2)]);
        assert_eq!(w.placed()[0].name, None);
    }

    #[test]
    fn wrong_types_are_reported() {
        let mut w = world();
        let err = build_park(&mut w, &["north".into(), num(1.0), "".into()]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument 'row': expected integer or None, got str"
        );
        let err = build_house(&mut w, &[num(1.0), num(1.0), "two".into(), "".into()]).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidArgument { ref param, .. } if param == "floors"));
        let err = build_shop(&mut w, &[num(1.5), num(1.0), "".into()]).unwrap_err();
        assert!(matches!(err, PlacementError::OutOfRange { .. }));
        let err = build_shop(&mut w, &[num(1.0), num(3e9), "".into()]).unwrap_err();
        assert_eq!(err.to_string(), "argument 'col' out of range: 3000000000");
        assert!(w.placed().is_empty());
    }

    #[test]
    fn road_needs_free_land_at_the_exact_cell() {
        let mut w = world();
        let out = build_road(&mut w, &[num(4.0), num(4.0), "v".into()]).unwrap();
        assert!(matches!(out, Outcome::Placed(Placement { row: 4, col: 4, .. })));
        assert_eq!(w.placed()[0].direction, Some(RoadDirection::Vertical));

        let err = build_road(&mut w, &[num(4.0), num(4.0), "h".into()]).unwrap_err();
        assert_eq!(err, PlacementError::CellUnavailable { row: 4, col: 4 });

        let err = build_road(&mut w, &[num(40.0), num(4.0), "h".into()]).unwrap_err();
        assert_eq!(err, PlacementError::CellUnavailable { row: 40, col: 4 });

        let err = build_road(&mut w, &[Value::Null, num(4.0), "h".into()]).unwrap_err();
        assert_eq!(err.to_string(), "missing argument 'row'");

        let err = build_road(&mut w, &[num(1.0), num(1.0), "diagonal".into()]).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidArgument { .. }));
    }

    #[test]
    fn clear_all_reports_removed_count() {
        let mut w = world();
        build_pool(&mut w, &[Value::Null, Value::Null, "".into()]).unwrap();
        build_power_tower(&mut w, &[Value::Null, Value::Null]).unwrap();
        assert_eq!(clear_all(&mut w, &[]).unwrap(), Outcome::Cleared { removed: 2 });
        assert_eq!(w.grid().reserved_count(), 0);
    }
}
