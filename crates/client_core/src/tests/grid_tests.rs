use super::*;

fn grid(rows: &[&str]) -> Grid {
    Grid::parse(rows).expect("grid")
}

#[test]
fn locate_returns_last_match_in_row_major_order() {
    let model = GridModel::new(&grid(&["S0S", "010", "G0S"]));
    assert_eq!(model.locate(CellKind::Start), Position::new(2, 2));
    assert_eq!(model.locate(CellKind::Goal), Position::new(2, 0));
}

#[test]
fn locate_defaults_to_origin_when_missing() {
    let model = GridModel::new(&grid(&["00", "1G"]));
    assert_eq!(model.locate(CellKind::Start), Position::new(0, 0));
}

#[test]
fn walls_and_out_of_bounds_are_not_walkable() {
    let model = GridModel::new(&grid(&["S0", "1G"]));
    assert!(model.is_walkable(Position::new(0, 0)));
    assert!(model.is_walkable(Position::new(0, 1)));
    assert!(model.is_walkable(Position::new(1, 1)));
    assert!(!model.is_walkable(Position::new(1, 0)));
    assert!(!model.is_walkable(Position::new(2, 0)));
    assert!(!model.is_walkable(Position::new(0, 2)));
}

#[test]
fn load_replaces_the_active_grid_with_a_copy() {
    let first = grid(&["S0", "1G"]);
    let second = grid(&["SG"]);
    let mut model = GridModel::new(&first);
    model.load(&second);
    assert_eq!(model.grid(), &second);
    assert_eq!(model.kind_at(Position::new(0, 1)), Some(CellKind::Goal));
    assert_eq!(model.kind_at(Position::new(1, 0)), None);
}
